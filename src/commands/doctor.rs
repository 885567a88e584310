// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::models::TxKind;
use crate::reconcile;
use crate::store;
use crate::utils::{fmt_money, pretty_table, require_active_user};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let user_id = require_active_user(conn)?;
    let transactions = store::list_transactions(conn, user_id)?;
    let budgets = store::list_budgets(conn, user_id)?;
    let mut rows = Vec::new();

    // 1) Stored `spent` that drifted from the transaction set
    for b in &budgets {
        let actual = reconcile::category_spend(&transactions, &b.category);
        if actual != b.spent {
            rows.push(vec![
                "spent_drift".into(),
                format!(
                    "{}: stored {}, actual {}",
                    b.category,
                    fmt_money(b.spent),
                    fmt_money(actual)
                ),
            ]);
        }
    }

    // 2) Negative amounts that slipped past validation
    for t in &transactions {
        if t.amount < Decimal::ZERO {
            rows.push(vec![
                "negative_amount".into(),
                format!("#{} on {}: {}", t.id, t.date, t.amount),
            ]);
        }
    }

    // 3) Expense categories with neither a budget nor a catalog entry
    let user_categories = store::list_categories(conn, user_id)?;
    let mut unknown: Vec<&str> = Vec::new();
    for t in transactions.iter().filter(|t| t.kind == TxKind::Expense) {
        let cat = t.category.as_str();
        let known = budgets.iter().any(|b| b.category == cat)
            || catalog::lookup(cat).is_some()
            || user_categories.iter().any(|c| c.name == cat);
        if !known && !unknown.contains(&cat) {
            unknown.push(cat);
            rows.push(vec!["untracked_category".into(), cat.to_string()]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
