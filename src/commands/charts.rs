// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::periods::{self, Period, Series};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, require_active_user};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spending", sub)) => spending(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_period(sub: &clap::ArgMatches) -> Result<Period> {
    Period::from_str(sub.get_one::<String>("period").unwrap())
        .map_err(|e| LedgerError::Validation(e).into())
}

fn print_series(sub: &clap::ArgMatches, series: &Series, header: &str) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, series)? {
        let rows = series
            .labels
            .iter()
            .zip(&series.values)
            .map(|(l, v)| vec![l.clone(), fmt_money(*v)])
            .collect();
        println!("{}", pretty_table(&[header, "Spent"], rows));
    }
    Ok(())
}

fn spending(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let period = parse_period(sub)?;
    let today = Utc::now().date_naive();
    let transactions = store::list_transactions(conn, user_id)?;
    let filtered = periods::filter_by_period(&transactions, period, today);
    let series = periods::bucket_series(&filtered, period, today)?;
    if !series.has_data() {
        println!("No spending data for the selected period ({})", period);
        return Ok(());
    }
    print_series(sub, &series, "Bucket")
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let period = parse_period(sub)?;
    let today = Utc::now().date_naive();
    let transactions = store::list_transactions(conn, user_id)?;
    let filtered = periods::filter_by_period(&transactions, period, today);
    let series = periods::category_totals(&filtered);
    if !series.has_data() {
        println!("No category data for the selected period ({})", period);
        return Ok(());
    }
    print_series(sub, &series, "Category")
}
