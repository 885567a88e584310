// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::errors::LedgerError;
use crate::guard::{self, BudgetCreation};
use crate::reconcile;
use crate::store;
use crate::summary::budget_flag;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table, require_active_user};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn parse_limit(s: &str) -> Result<Decimal> {
    let limit = parse_decimal(s)?;
    if limit <= Decimal::ZERO {
        return Err(
            LedgerError::Validation("Budget limit must be greater than ₹0".into()).into(),
        );
    }
    Ok(limit)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let limit = parse_limit(sub.get_one::<String>("limit").unwrap())?;
    let color = sub
        .get_one::<String>("color")
        .map(|s| s.to_string())
        .unwrap_or_else(|| catalog::color_for(&category).to_string());

    if store::find_budget(conn, user_id, &category)?.is_some() {
        return Err(LedgerError::Validation(format!(
            "Budget already exists for category '{}'",
            category
        ))
        .into());
    }

    let transactions = store::list_transactions(conn, user_id)?;
    let spent = match guard::vet_budget_creation(&transactions, &category, limit) {
        BudgetCreation::Rejected { message, .. } => {
            return Err(LedgerError::Rejected(message).into());
        }
        BudgetCreation::NeedsConfirm { spent, message } => {
            if sub.get_flag("yes") {
                eprintln!("{}", message);
            } else {
                eprintln!("{}", message);
                if !confirm("Create this budget anyway?")? {
                    println!("Budget not created.");
                    return Ok(());
                }
            }
            spent
        }
        BudgetCreation::Ok { spent } => spent,
    };

    let budget = store::insert_budget(conn, user_id, &category, limit, spent, &color)?;
    reconcile::reconcile(conn, user_id)?;
    println!(
        "Created budget for {} with limit {} (spent so far: {})",
        budget.category,
        fmt_money(budget.limit),
        fmt_money(budget.spent)
    );
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let category = sub.get_one::<String>("category").unwrap().trim();
    let limit = sub
        .get_one::<String>("limit")
        .map(|s| parse_limit(s))
        .transpose()?;
    let color = sub.get_one::<String>("color").map(|s| s.as_str());
    let budget = store::update_budget(conn, user_id, category, limit, color)?;
    println!(
        "Updated budget for {} (limit {})",
        budget.category,
        fmt_money(budget.limit)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let category = sub.get_one::<String>("category").unwrap().trim();
    store::delete_budget(conn, user_id, category)?;
    println!("Removed budget for {} (transactions untouched)", category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = require_active_user(conn)?;
    let budgets = store::list_budgets(conn, user_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let rows = budgets
            .iter()
            .map(|b| {
                vec![
                    b.category.clone(),
                    fmt_money(b.limit),
                    fmt_money(b.spent),
                    b.color.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Limit", "Spent", "Color"], rows));
    }
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = require_active_user(conn)?;
    let transactions = store::list_transactions(conn, user_id)?;
    let budgets = reconcile::recompute_spent(&transactions, &store::list_budgets(conn, user_id)?);

    let hundred = Decimal::from(100);
    let rows: Vec<Vec<String>> = budgets
        .iter()
        .map(|b| {
            let pct = if b.limit.is_zero() {
                Decimal::ZERO
            } else {
                b.spent / b.limit * hundred
            };
            vec![
                b.category.clone(),
                format!("{}/{}", fmt_money(b.spent), fmt_money(b.limit)),
                format!("{:.0}%", pct),
                fmt_money(b.limit - b.spent),
                budget_flag(pct).to_string(),
            ]
        })
        .collect();

    if json_flag || jsonl_flag {
        maybe_print_json(json_flag, jsonl_flag, &budgets)?;
    } else {
        println!(
            "{}",
            pretty_table(&["Category", "Spent/Limit", "Used", "Remaining", "Status"], rows)
        );
    }
    Ok(())
}
