// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::store;
use crate::utils::{get_active_user, get_ai_endpoint, pretty_table, set_ai_endpoint};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-ai-endpoint", sub)) => {
            let url = sub.get_one::<String>("url").unwrap().trim();
            set_ai_endpoint(conn, url)?;
            println!("Narrative endpoint set to {}", url);
        }
        Some(("show", _)) => {
            let active = match get_active_user(conn)? {
                Some(id) => store::get_user(conn, id)?.name,
                None => "(none)".to_string(),
            };
            let rows = vec![
                vec!["database".to_string(), db::db_path()?.display().to_string()],
                vec!["active user".to_string(), active],
                vec!["ai endpoint".to_string(), get_ai_endpoint(conn)?],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
