// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetpro::models::{Budget, Transaction, TxKind};
use budgetpro::reconcile::{category_spend, recompute_spent};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(kind: TxKind, category: &str, amount: &str, date: NaiveDate) -> Transaction {
    Transaction {
        id: 0,
        user_id: 1,
        kind,
        category: category.into(),
        amount: dec(amount),
        date,
        description: None,
        created_at: String::new(),
    }
}

fn budget(category: &str, limit: &str, spent: &str) -> Budget {
    Budget {
        id: 0,
        user_id: 1,
        category: category.into(),
        limit: dec(limit),
        spent: dec(spent),
        color: "#3b82f6".into(),
        created_at: String::new(),
    }
}

#[test]
fn spent_equals_expense_sum_per_category() {
    let day = d(2025, 8, 1);
    let txs = vec![
        tx(TxKind::Expense, "Food & Dining", "25.50", day),
        tx(TxKind::Expense, "Food & Dining", "10", day),
        tx(TxKind::Income, "Food & Dining", "500", day), // income never counts
        tx(TxKind::Expense, "Transportation", "40", day),
        tx(TxKind::Expense, "Shopping", "15", day), // no budget for this one
    ];
    let budgets = vec![
        budget("Food & Dining", "100", "0"),
        budget("Transportation", "80", "999"), // stale value must be overwritten
    ];

    let out = recompute_spent(&txs, &budgets);
    assert_eq!(out[0].spent, dec("35.50"));
    assert_eq!(out[1].spent, dec("40"));
}

#[test]
fn recompute_is_idempotent() {
    let day = d(2025, 8, 3);
    let txs = vec![
        tx(TxKind::Expense, "Food & Dining", "12.34", day),
        tx(TxKind::Expense, "Food & Dining", "7.66", day),
    ];
    let budgets = vec![budget("Food & Dining", "50", "0")];

    let once = recompute_spent(&txs, &budgets);
    let twice = recompute_spent(&txs, &once);
    assert_eq!(once[0].spent, twice[0].spent);
}

#[test]
fn category_match_is_exact_string_equality() {
    let day = d(2025, 8, 5);
    let txs = vec![
        tx(TxKind::Expense, "Food", "10", day),
        tx(TxKind::Expense, "food", "20", day),
        tx(TxKind::Expense, "Food ", "30", day),
    ];
    assert_eq!(category_spend(&txs, "Food"), dec("10"));
}

#[test]
fn budget_with_no_matching_expenses_resets_to_zero() {
    let txs = vec![tx(TxKind::Income, "Salary", "1000", d(2025, 8, 1))];
    let budgets = vec![budget("Entertainment", "60", "45")];
    let out = recompute_spent(&txs, &budgets);
    assert_eq!(out[0].spent, Decimal::ZERO);
}

// Scenario: one 50 expense against a 100 budget reconciles to half used.
#[test]
fn food_budget_half_used() {
    let txs = vec![tx(TxKind::Expense, "Food", "50", d(2025, 8, 1))];
    let budgets = vec![budget("Food", "100", "0")];
    let out = recompute_spent(&txs, &budgets);
    assert_eq!(out[0].spent, dec("50"));
    assert_eq!(out[0].limit - out[0].spent, dec("50"));

    let analysis =
        budgetpro::summary::summarize(&txs, &out, d(2025, 8, 15)).unwrap();
    assert_eq!(analysis.budget_analysis[0].remaining, dec("50"));
    assert_eq!(analysis.budget_analysis[0].percentage_used, dec("50"));
}
