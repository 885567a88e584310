// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget reconciliation: every budget's `spent` is a pure function of the
//! transaction list. Recomputation is total, not incremental, so no partial
//! state is ever observable; the cost is O(transactions × budgets) per
//! mutation, which is fine at personal-ledger scale.

use crate::models::{Budget, Transaction, TxKind};
use crate::store;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Sum of expense amounts whose category equals `category` exactly.
pub fn category_spend(transactions: &[Transaction], category: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense && t.category == category)
        .map(|t| t.amount)
        .sum()
}

/// Returns the budget list with each `spent` recomputed from scratch.
/// Idempotent: running it twice over the same inputs yields the same values.
pub fn recompute_spent(transactions: &[Transaction], budgets: &[Budget]) -> Vec<Budget> {
    budgets
        .iter()
        .map(|b| {
            let mut out = b.clone();
            out.spent = category_spend(transactions, &b.category);
            out
        })
        .collect()
}

/// Reloads the user's ledger, recomputes every `spent`, and writes the
/// values back. Called after every transaction add/edit/delete and after
/// every budget add, before anything reads `spent`.
pub fn reconcile(conn: &Connection, user_id: i64) -> Result<Vec<Budget>> {
    let transactions = store::list_transactions(conn, user_id)?;
    let budgets = store::list_budgets(conn, user_id)?;
    let updated = recompute_spent(&transactions, &budgets);
    for b in &updated {
        store::save_spent(conn, b.id, b.spent)?;
    }
    Ok(updated)
}
