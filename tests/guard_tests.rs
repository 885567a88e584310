// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetpro::guard::{
    balance, can_accept_expense, check_budget_limit, low_headroom_warning, vet_budget_creation,
    BudgetCreation,
};
use budgetpro::models::{Budget, Transaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(kind: TxKind, category: &str, amount: &str) -> Transaction {
    Transaction {
        id: 0,
        user_id: 1,
        kind,
        category: category.into(),
        amount: dec(amount),
        date: d(2025, 8, 1),
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

// Income 1000 against expenses 400 + 700: the ledger is already 100 under,
// so even a zero-amount expense is refused and the balance reads -100.
#[test]
fn overdrawn_ledger_refuses_any_expense() {
    let txs = vec![
        tx(TxKind::Income, "Salary", "1000"),
        tx(TxKind::Expense, "Shopping", "400"),
        tx(TxKind::Expense, "Healthcare", "700"),
    ];
    assert!(!can_accept_expense(&txs, Decimal::ZERO));
    assert_eq!(balance(&txs), dec("-100"));
}

#[test]
fn expense_up_to_exact_balance_is_allowed() {
    let txs = vec![
        tx(TxKind::Income, "Salary", "500"),
        tx(TxKind::Expense, "Food & Dining", "200"),
    ];
    assert!(can_accept_expense(&txs, dec("300")));
    assert!(!can_accept_expense(&txs, dec("300.01")));
}

// Budget at 90/100: a 20 expense would land at 110, so the gate closes and
// the message names both the limit and the current spend.
#[test]
fn over_limit_expense_is_rejected_with_amounts() {
    let budgets = vec![budget("Food", "100", "90")];
    let check = check_budget_limit(&budgets, "Food", dec("20"));
    assert!(!check.allowed);
    assert_eq!(check.remaining, dec("10"));
    let message = check.message.unwrap();
    assert!(message.contains("₹100.00"));
    assert!(message.contains("₹90.00"));
}

#[test]
fn unbudgeted_category_is_always_allowed() {
    let budgets = vec![budget("Food", "100", "90")];
    let check = check_budget_limit(&budgets, "Travel", dec("5000"));
    assert!(check.allowed);
    assert_eq!(check.remaining, Decimal::ZERO);
    assert!(check.message.is_none());
}

#[test]
fn exact_fit_expense_is_allowed() {
    let budgets = vec![budget("Food", "100", "90")];
    let check = check_budget_limit(&budgets, "Food", dec("10"));
    assert!(check.allowed);
}

#[test]
fn low_headroom_warns_without_blocking() {
    let budgets = vec![budget("Food", "100", "50")];
    // remaining 50; spending 45 leaves 5, under the 10 threshold (20% of 50)
    let check = check_budget_limit(&budgets, "Food", dec("45"));
    assert!(check.allowed);
    let warning = low_headroom_warning(&check, "Food", dec("45")).unwrap();
    assert!(warning.contains("₹5.00"));

    // spending 20 leaves 30, comfortably above the threshold
    let check = check_budget_limit(&budgets, "Food", dec("20"));
    assert!(low_headroom_warning(&check, "Food", dec("20")).is_none());
}

// Travel already has 60 of spend; a 50 budget can never be created.
#[test]
fn budget_under_existing_spend_is_rejected() {
    let txs = vec![
        tx(TxKind::Expense, "Travel", "35"),
        tx(TxKind::Expense, "Travel", "25"),
    ];
    match vet_budget_creation(&txs, "Travel", dec("50")) {
        BudgetCreation::Rejected { spent, message } => {
            assert_eq!(spent, dec("60"));
            assert!(message.contains("₹60.00"));
            assert!(message.contains("₹50.00"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn budget_near_existing_spend_needs_confirmation() {
    let txs = vec![tx(TxKind::Expense, "Travel", "95")];
    match vet_budget_creation(&txs, "Travel", dec("100")) {
        BudgetCreation::NeedsConfirm { spent, .. } => assert_eq!(spent, dec("95")),
        other => panic!("expected confirmation request, got {:?}", other),
    }
}

#[test]
fn budget_with_headroom_is_clean() {
    let txs = vec![tx(TxKind::Expense, "Travel", "40")];
    match vet_budget_creation(&txs, "Travel", dec("100")) {
        BudgetCreation::Ok { spent } => assert_eq!(spent, dec("40")),
        other => panic!("expected clean creation, got {:?}", other),
    }
}
