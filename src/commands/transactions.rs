// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::guard;
use crate::models::{Transaction, TxKind};
use crate::reconcile;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, require_active_user};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<TxKind> {
    TxKind::from_str(s).map_err(|e| LedgerError::Validation(e).into())
}

fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount < Decimal::ZERO {
        return Err(LedgerError::Validation("Amount must be non-negative".into()).into());
    }
    Ok(amount)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").map(|s| s.trim().to_string());

    if kind == TxKind::Expense {
        let transactions = store::list_transactions(conn, user_id)?;
        let budgets =
            reconcile::recompute_spent(&transactions, &store::list_budgets(conn, user_id)?);

        if !guard::can_accept_expense(&transactions, amount) {
            return Err(LedgerError::Rejected(
                "Cannot add expense: would exceed available funds".into(),
            )
            .into());
        }
        let check = guard::check_budget_limit(&budgets, &category, amount);
        if !check.allowed {
            return Err(LedgerError::Rejected(check.message.unwrap_or_default()).into());
        }
        if let Some(warning) = guard::low_headroom_warning(&check, &category, amount) {
            eprintln!("{}", warning);
        }
    }

    let tx = store::insert_transaction(
        conn,
        user_id,
        kind,
        &category,
        amount,
        date,
        description.as_deref(),
    )?;
    reconcile::reconcile(conn, user_id)?;
    println!(
        "Recorded {} {} on {} ({})",
        kind,
        fmt_money(tx.amount),
        tx.date,
        tx.category
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut tx = store::get_transaction(conn, user_id, id)?;

    if let Some(s) = sub.get_one::<String>("type") {
        tx.kind = parse_kind(s)?;
    }
    if let Some(s) = sub.get_one::<String>("category") {
        tx.category = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("amount") {
        tx.amount = parse_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("date") {
        tx.date = parse_date(s)?;
    }
    if let Some(s) = sub.get_one::<String>("description") {
        tx.description = Some(s.trim().to_string());
    }

    store::update_transaction(conn, &tx)?;
    reconcile::reconcile(conn, user_id)?;
    println!("Updated transaction #{}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_transaction(conn, user_id, id)?;
    reconcile::reconcile(conn, user_id)?;
    println!("Deleted transaction #{}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let user_id = require_active_user(conn)?;
    let month = sub.get_one::<String>("month");
    let category = sub.get_one::<String>("category");
    let kind = sub
        .get_one::<String>("type")
        .map(|s| parse_kind(s))
        .transpose()?;

    let mut rows: Vec<TransactionRow> = store::list_transactions(conn, user_id)?
        .into_iter()
        .filter(|t| month.is_none_or(|m| t.date.format("%Y-%m").to_string() == *m))
        .filter(|t| category.is_none_or(|c| &t.category == c))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .map(row_for)
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn row_for(t: Transaction) -> TransactionRow {
    TransactionRow {
        id: t.id,
        date: t.date.to_string(),
        kind: t.kind.to_string(),
        category: t.category,
        amount: t.amount.to_string(),
        description: t.description.unwrap_or_default(),
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Category", "Amount", "Description"],
                rows,
            )
        );
    }
    Ok(())
}
