// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Time-windowed aggregation of expenses into chart-ready {labels, values}
//! series. All windows are calendar-day comparisons, inclusive on both
//! ends; "today" comes in as a parameter so bucketing never consults the
//! clock.

use crate::models::{Transaction, TxKind};
use crate::utils::{month_back, short_month_day};
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    SevenDays,
    ThirtyDays,
    NinetyDays,
    OneYear,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::SevenDays,
        Period::ThirtyDays,
        Period::NinetyDays,
        Period::OneYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::SevenDays => "7days",
            Period::ThirtyDays => "30days",
            Period::NinetyDays => "90days",
            Period::OneYear => "1year",
        }
    }

    /// Lookback in days before today; "7 days" means today plus 6 prior
    /// days, so the window always holds exactly one bucket per day.
    fn days_back(&self) -> i64 {
        match self {
            Period::SevenDays => 6,
            Period::ThirtyDays => 29,
            Period::NinetyDays => 89,
            Period::OneYear => 365,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7days" => Ok(Period::SevenDays),
            "30days" => Ok(Period::ThirtyDays),
            "90days" => Ok(Period::NinetyDays),
            "1year" => Ok(Period::OneYear),
            other => Err(format!(
                "Unknown period '{}' (use 7days|30days|90days|1year)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl Series {
    /// An all-zero series means "no data", which callers render as an
    /// empty state rather than a zero-flat chart.
    pub fn has_data(&self) -> bool {
        self.values.iter().any(|v| !v.is_zero())
    }
}

/// Expense transactions whose calendar date falls within
/// `[today - N, today]` inclusive.
pub fn filter_by_period(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<Transaction> {
    let start = today - Duration::days(period.days_back());
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense && t.date >= start && t.date <= today)
        .cloned()
        .collect()
}

fn expense_sum<F>(transactions: &[Transaction], in_window: F) -> Decimal
where
    F: Fn(NaiveDate) -> bool,
{
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense && in_window(t.date))
        .map(|t| t.amount)
        .sum()
}

/// Dense series, oldest bucket first; days with no expenses yield 0.
pub fn bucket_series(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Result<Series> {
    match period {
        Period::SevenDays => Ok(daily_series(transactions, 7, today)),
        Period::ThirtyDays => Ok(daily_series(transactions, 30, today)),
        Period::NinetyDays => Ok(weekly_series(transactions, 13, today)),
        Period::OneYear => monthly_series(transactions, 12, today),
    }
}

fn daily_series(transactions: &[Transaction], days: i64, today: NaiveDate) -> Series {
    let mut labels = Vec::with_capacity(days as usize);
    let mut values = Vec::with_capacity(days as usize);
    for i in (0..days).rev() {
        let day = today - Duration::days(i);
        let label = if days <= 7 {
            format!("{} {}", day.format("%a"), day.day())
        } else {
            format!("{} {}", day.day(), day.format("%b"))
        };
        labels.push(label);
        values.push(expense_sum(transactions, |d| d == day));
    }
    Series { labels, values }
}

/// Trailing 7-day windows ending on today − 7i, newest window last.
fn weekly_series(transactions: &[Transaction], weeks: i64, today: NaiveDate) -> Series {
    let mut labels = Vec::with_capacity(weeks as usize);
    let mut values = Vec::with_capacity(weeks as usize);
    for i in (0..weeks).rev() {
        let end = today - Duration::days(7 * i);
        let start = end - Duration::days(6);
        labels.push(format!(
            "{} – {}",
            short_month_day(start),
            short_month_day(end)
        ));
        values.push(expense_sum(transactions, |d| d >= start && d <= end));
    }
    Series { labels, values }
}

fn monthly_series(
    transactions: &[Transaction],
    months: u32,
    today: NaiveDate,
) -> Result<Series> {
    let mut labels = Vec::with_capacity(months as usize);
    let mut values = Vec::with_capacity(months as usize);
    for i in (0..months).rev() {
        let first = month_back(today, i)?;
        labels.push(format!("{} {}", first.format("%b"), first.year()));
        values.push(expense_sum(transactions, |d| {
            d.year() == first.year() && d.month() == first.month()
        }));
    }
    Ok(Series { labels, values })
}

/// Expense totals grouped by category string, in first-seen order.
pub fn category_totals(transactions: &[Transaction]) -> Series {
    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<Decimal> = Vec::new();
    for t in transactions.iter().filter(|t| t.kind == TxKind::Expense) {
        match labels.iter().position(|c| c == &t.category) {
            Some(i) => values[i] += t.amount,
            None => {
                labels.push(t.category.clone());
                values.push(t.amount);
            }
        }
    }
    Series { labels, values }
}
