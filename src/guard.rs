// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense gates consulted before a write is attempted. All functions here
//! are advisory and side-effect free: the command handler decides whether
//! to proceed, warn, or abort.

use crate::models::{Budget, Transaction, TxKind};
use crate::utils::fmt_money;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::Income)
        .map(|t| t.amount)
        .sum()
}

pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense)
        .map(|t| t.amount)
        .sum()
}

pub fn balance(transactions: &[Transaction]) -> Decimal {
    total_income(transactions) - total_expenses(transactions)
}

/// Hard rule: the running balance must never go negative. Computed fresh
/// from the full ledger on every call, never cached.
pub fn can_accept_expense(transactions: &[Transaction], amount: Decimal) -> bool {
    balance(transactions) - amount >= Decimal::ZERO
}

#[derive(Debug, Clone)]
pub struct BudgetCheck {
    pub allowed: bool,
    pub remaining: Decimal,
    pub message: Option<String>,
}

/// Checks one expense against the category's budget. No budget for the
/// category means the expense is always allowed (remaining 0).
pub fn check_budget_limit(budgets: &[Budget], category: &str, amount: Decimal) -> BudgetCheck {
    let Some(budget) = budgets.iter().find(|b| b.category == category) else {
        return BudgetCheck {
            allowed: true,
            remaining: Decimal::ZERO,
            message: None,
        };
    };
    let would_exceed = budget.spent + amount > budget.limit;
    BudgetCheck {
        allowed: !would_exceed,
        remaining: budget.limit - budget.spent,
        message: would_exceed.then(|| {
            format!(
                "This expense would exceed your {} budget limit of {}. Current spent: {}",
                category,
                fmt_money(budget.limit),
                fmt_money(budget.spent)
            )
        }),
    }
}

static ONE_FIFTH: Lazy<Decimal> = Lazy::new(|| Decimal::new(2, 1));

/// Soft warning when the headroom left after this expense drops below 20%
/// of the pre-expense headroom. Never blocks the write.
pub fn low_headroom_warning(
    check: &BudgetCheck,
    category: &str,
    amount: Decimal,
) -> Option<String> {
    if !check.allowed || check.remaining <= Decimal::ZERO {
        return None;
    }
    let after = check.remaining - amount;
    (after < check.remaining * *ONE_FIFTH).then(|| {
        format!(
            "Warning: only {} remaining in {} budget after this expense",
            fmt_money(after),
            category
        )
    })
}

#[derive(Debug, Clone)]
pub enum BudgetCreation {
    /// Existing category spend already exceeds the requested limit.
    Rejected { spent: Decimal, message: String },
    /// Spend is past 90% of the limit; the human must confirm.
    NeedsConfirm { spent: Decimal, message: String },
    Ok { spent: Decimal },
}

static NINE_TENTHS: Lazy<Decimal> = Lazy::new(|| Decimal::new(9, 1));
static HUNDRED: Lazy<Decimal> = Lazy::new(|| Decimal::from(100));

/// Vets a new budget against the expenses already recorded for its
/// category. `spent` in every variant is the amount the budget starts with.
pub fn vet_budget_creation(
    transactions: &[Transaction],
    category: &str,
    limit: Decimal,
) -> BudgetCreation {
    let spent = crate::reconcile::category_spend(transactions, category);
    if spent > limit {
        return BudgetCreation::Rejected {
            spent,
            message: format!(
                "Cannot create budget: already spent {} in {}, which exceeds the limit of {}. Set a higher limit.",
                fmt_money(spent),
                category,
                fmt_money(limit)
            ),
        };
    }
    if spent > limit * *NINE_TENTHS {
        let pct = (spent / limit) * *HUNDRED;
        return BudgetCreation::NeedsConfirm {
            spent,
            message: format!(
                "Warning: already spent {} ({:.0}% of budget) in {}",
                fmt_money(spent),
                pct,
                category
            ),
        };
    }
    BudgetCreation::Ok { spent }
}
