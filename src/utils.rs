// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

const UA: &str = concat!(
    "budgetpro/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/budgetpro)"
);

/// Client for the narrative-generation call. The timeout doubles as the
/// cancellation bound: on expiry the caller falls back to the plain report.
pub fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// All monetary output uses a fixed symbol and two decimal places; amounts
/// themselves are stored as plain decimals.
pub fn fmt_money(d: Decimal) -> String {
    format!("₹{:.2}", d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Active-user setting: every ledger command is scoped to one user id.
pub fn get_active_user(conn: &Connection) -> Result<Option<i64>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='active_user'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => Ok(Some(s.parse::<i64>().with_context(|| {
            format!("Invalid active_user setting '{}'", s)
        })?)),
        None => Ok(None),
    }
}

pub fn set_active_user(conn: &Connection, user_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('active_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![user_id.to_string()],
    )?;
    Ok(())
}

pub fn require_active_user(conn: &Connection) -> Result<i64> {
    get_active_user(conn)?
        .context("No active user; run 'budgetpro user add <name>' first")
}

const DEFAULT_AI_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";

pub fn get_ai_endpoint(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='ai_endpoint'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_AI_ENDPOINT.to_string()))
}

pub fn set_ai_endpoint(conn: &Connection, url: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('ai_endpoint', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![url],
    )?;
    Ok(())
}

/// First day of the calendar month `months_back` months before `today`.
pub fn month_back(today: NaiveDate, months_back: u32) -> Result<NaiveDate> {
    use chrono::Datelike;
    let total = today.year() * 12 + today.month() as i32 - 1 - months_back as i32;
    let (y, m) = (total.div_euclid(12), total.rem_euclid(12) as u32 + 1);
    NaiveDate::from_ymd_opt(y, m, 1)
        .with_context(|| format!("Invalid month {} months before {}", months_back, today))
}

pub fn short_month_day(d: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}", d.format("%b"), d.day())
}
