// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::models::TxKind;
use crate::reconcile;
use crate::utils::{parse_date, parse_decimal, require_active_user};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// All-or-nothing: a bad row rolls the whole import back. Reconciliation
/// runs once after the commit rather than per row.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut imported = 0usize;
    for result in rdr.records() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let kind_raw = rec.get(1).context("type missing")?.trim();
        let category = rec.get(2).context("category missing")?.trim();
        let amount_raw = rec.get(3).context("amount missing")?.trim();
        let description = rec
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let date = parse_date(date_raw)
            .with_context(|| format!("Invalid transaction date '{}'", date_raw))?;
        let kind = TxKind::from_str(kind_raw)
            .map_err(|e| anyhow::Error::from(LedgerError::Validation(e)))?;
        let amount = parse_decimal(amount_raw)
            .with_context(|| format!("Invalid amount '{}' on {}", amount_raw, date_raw))?;
        if amount < Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "Amount must be non-negative on {}",
                date_raw
            ))
            .into());
        }

        tx.execute(
            "INSERT INTO transactions(user_id, kind, category, amount, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                kind.as_str(),
                category,
                amount.to_string(),
                date.to_string(),
                description.as_deref()
            ],
        )?;
        imported += 1;
    }
    tx.commit()?;
    reconcile::reconcile(conn, user_id)?;
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}
