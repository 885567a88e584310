// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Current-month financial summary: the structured input for reports and
//! for narrative generation. Pure computation, no I/O.

use crate::models::{Budget, Transaction, TxKind};
use crate::utils::month_back;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_savings: Decimal,
    /// Percent of income kept; 0 when there is no income this month.
    pub savings_rate: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage_used: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthTrend {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub month: String,
    pub year: i32,
    pub overview: Overview,
    pub category_breakdown: Vec<CategorySpend>,
    pub budget_analysis: Vec<BudgetStatus>,
    pub spending_trends: Vec<MonthTrend>,
    pub transaction_count: usize,
}

fn hundred() -> Decimal {
    Decimal::from(100)
}

fn in_month(date: NaiveDate, of: NaiveDate) -> bool {
    date.year() == of.year() && date.month() == of.month()
}

fn month_totals(transactions: &[Transaction], of: NaiveDate) -> (Decimal, Decimal) {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for t in transactions.iter().filter(|t| in_month(t.date, of)) {
        match t.kind {
            TxKind::Income => income += t.amount,
            TxKind::Expense => expenses += t.amount,
        }
    }
    (income, expenses)
}

pub fn summarize(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> Result<FinancialSummary> {
    let current: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| in_month(t.date, today))
        .collect();

    let (total_income, total_expenses) = month_totals(transactions, today);
    let net_savings = total_income - total_expenses;
    let savings_rate = if total_income.is_zero() {
        Decimal::ZERO
    } else {
        net_savings / total_income * hundred()
    };

    // First-seen order, like the chart category series.
    let mut category_breakdown: Vec<CategorySpend> = Vec::new();
    for t in current.iter().filter(|t| t.kind == TxKind::Expense) {
        match category_breakdown
            .iter_mut()
            .find(|c| c.category == t.category)
        {
            Some(entry) => {
                entry.amount += t.amount;
                entry.count += 1;
            }
            None => category_breakdown.push(CategorySpend {
                category: t.category.clone(),
                amount: t.amount,
                count: 1,
            }),
        }
    }

    let budget_analysis = budgets
        .iter()
        .map(|b| BudgetStatus {
            category: b.category.clone(),
            limit: b.limit,
            spent: b.spent,
            remaining: b.limit - b.spent,
            percentage_used: if b.limit.is_zero() {
                Decimal::ZERO
            } else {
                b.spent / b.limit * hundred()
            },
        })
        .collect();

    // Current month and the two preceding, oldest first.
    let mut spending_trends = Vec::with_capacity(3);
    for i in (0..3u32).rev() {
        let first = month_back(today, i)?;
        let (income, expenses) = month_totals(transactions, first);
        spending_trends.push(MonthTrend {
            month: first.format("%b").to_string(),
            income,
            expenses,
            savings: income - expenses,
        });
    }

    Ok(FinancialSummary {
        month: today.format("%B").to_string(),
        year: today.year(),
        overview: Overview {
            total_income,
            total_expenses,
            net_savings,
            savings_rate,
        },
        category_breakdown,
        budget_analysis,
        spending_trends,
        transaction_count: current.len(),
    })
}

/// Display flag for a budget's usage level, shared by `budget status` and
/// the exported report.
pub fn budget_flag(percentage_used: Decimal) -> &'static str {
    if percentage_used >= hundred() {
        "EXCEEDED"
    } else if percentage_used >= Decimal::from(90) {
        "CRITICAL"
    } else if percentage_used >= Decimal::from(75) {
        "WARNING"
    } else {
        "ON TRACK"
    }
}
