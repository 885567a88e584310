// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetpro::commands::reports::render_text_report;
use budgetpro::models::{Budget, Transaction, TxKind};
use budgetpro::summary::summarize;
use chrono::NaiveDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample() -> budgetpro::summary::FinancialSummary {
    let txs = vec![
        Transaction {
            id: 1,
            user_id: 1,
            kind: TxKind::Income,
            category: "Salary".into(),
            amount: "2000".parse().unwrap(),
            date: d(2025, 8, 1),
            description: None,
            created_at: String::new(),
        },
        Transaction {
            id: 2,
            user_id: 1,
            kind: TxKind::Expense,
            category: "Food & Dining".into(),
            amount: "120".parse().unwrap(),
            date: d(2025, 8, 4),
            description: None,
            created_at: String::new(),
        },
        Transaction {
            id: 3,
            user_id: 1,
            kind: TxKind::Expense,
            category: "Transportation".into(),
            amount: "480".parse().unwrap(),
            date: d(2025, 8, 6),
            description: None,
            created_at: String::new(),
        },
    ];
    let budgets = vec![Budget {
        id: 1,
        user_id: 1,
        category: "Food & Dining".into(),
        limit: "400".parse().unwrap(),
        spent: "120".parse().unwrap(),
        color: "#f59e0b".into(),
        created_at: String::new(),
    }];
    summarize(&txs, &budgets, d(2025, 8, 20)).unwrap()
}

#[test]
fn report_has_every_section() {
    let text = render_text_report(&sample(), None);
    assert!(text.contains("BUDGETPRO FINANCIAL REPORT"));
    assert!(text.contains("EXECUTIVE SUMMARY - August 2025"));
    assert!(text.contains("Total Income:        ₹2000.00"));
    assert!(text.contains("SPENDING BREAKDOWN BY CATEGORY"));
    assert!(text.contains("BUDGET PERFORMANCE"));
    assert!(text.contains("3-MONTH SPENDING TRENDS"));
    assert!(text.contains("END OF REPORT"));
    assert!(!text.contains("AI-POWERED"));
}

#[test]
fn categories_are_sorted_by_amount_in_the_report() {
    let text = render_text_report(&sample(), None);
    let transport = text.find("Transportation").unwrap();
    let food = text.find("Food & Dining").unwrap();
    assert!(transport < food);
}

#[test]
fn budget_section_flags_usage() {
    let text = render_text_report(&sample(), None);
    assert!(text.contains("30% used"));
    assert!(text.contains("Status: ON TRACK"));
}

#[test]
fn analysis_section_appears_when_present() {
    let text = render_text_report(&sample(), Some("Spend less on transport."));
    assert!(text.contains("AI-POWERED FINANCIAL ANALYSIS"));
    assert!(text.contains("Spend less on transport."));
}
