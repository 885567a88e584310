// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::errors::LedgerError;
use crate::models::TxKind;
use crate::store;
use crate::utils::{pretty_table, require_active_user};
use anyhow::Result;
use rusqlite::Connection;
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => list(conn)?,
        Some(("add", sub)) => add(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let transactions = store::list_transactions(conn, user_id)?;
    let count_for =
        |name: &str| transactions.iter().filter(|t| t.category == name).count();

    let mut data = Vec::new();
    for c in catalog::DEFAULT_CATEGORIES.iter() {
        data.push(vec![
            c.icon.to_string(),
            c.name.to_string(),
            c.kind.to_string(),
            c.color.to_string(),
            count_for(c.name).to_string(),
        ]);
    }
    for c in store::list_categories(conn, user_id)? {
        data.push(vec![
            c.icon.clone(),
            c.name.clone(),
            c.kind.to_string(),
            c.color.clone(),
            count_for(&c.name).to_string(),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["", "Category", "Type", "Color", "Transactions"], data)
    );
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let name = sub.get_one::<String>("name").unwrap().trim();
    let kind = TxKind::from_str(sub.get_one::<String>("type").unwrap())
        .map_err(|e| anyhow::Error::from(LedgerError::Validation(e)))?;
    let icon = sub.get_one::<String>("icon").map(|s| s.as_str()).unwrap_or("📦");
    let color = sub
        .get_one::<String>("color")
        .map(|s| s.as_str())
        .unwrap_or_else(|| catalog::color_for(name));
    let c = store::insert_category(conn, user_id, name, icon, color, kind)?;
    println!("Added category '{}' ({})", c.name, c.kind);
    Ok(())
}
