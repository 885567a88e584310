// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{get_active_user, pretty_table, set_active_user};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let user = store::create_user(conn, name)?;
            if get_active_user(conn)?.is_none() {
                set_active_user(conn, user.id)?;
                println!("Added user '{}' (now active)", user.name);
            } else {
                println!("Added user '{}'", user.name);
            }
        }
        Some(("list", _)) => {
            let active = get_active_user(conn)?;
            let mut data = Vec::new();
            for u in store::list_users(conn)? {
                let marker = if active == Some(u.id) { "*" } else { "" };
                data.push(vec![marker.to_string(), u.name, u.created_at]);
            }
            println!("{}", pretty_table(&["Active", "Name", "Created"], data));
        }
        Some(("use", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let id = store::user_id_for(conn, name)?;
            set_active_user(conn, id)?;
            println!("Active user is now '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
