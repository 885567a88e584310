// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger read/write boundary. Rows are normalized into model structs with
//! one canonical `id` here; core logic never sees raw rows. Transactions
//! are returned reverse-chronological, the order every call site expects.

use crate::errors::LedgerError;
use crate::models::{Budget, Category, Transaction, TxKind, User};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn create_user(conn: &Connection, name: &str) -> Result<User> {
    let existing: Option<i64> = conn
        .query_row("SELECT id FROM users WHERE name=?1", params![name], |r| {
            r.get(0)
        })
        .optional()?;
    if existing.is_some() {
        return Err(LedgerError::Validation(format!("User '{}' already exists", name)).into());
    }
    conn.execute("INSERT INTO users(name) VALUES (?1)", params![name])?;
    get_user(conn, conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, id: i64) -> Result<User> {
    conn.query_row(
        "SELECT id, name, created_at FROM users WHERE id=?1",
        params![id],
        |r| {
            Ok(User {
                id: r.get(0)?,
                name: r.get(1)?,
                created_at: r.get(2)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| LedgerError::NotFound(format!("User #{}", id)).into())
}

pub fn user_id_for(conn: &Connection, name: &str) -> Result<i64> {
    conn.query_row("SELECT id FROM users WHERE name=?1", params![name], |r| {
        r.get(0)
    })
    .optional()?
    .ok_or_else(|| LedgerError::NotFound(format!("User '{}'", name)).into())
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM users ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(User {
            id: r.get(0)?,
            name: r.get(1)?,
            created_at: r.get(2)?,
        });
    }
    Ok(out)
}

fn tx_from_row(
    id: i64,
    user_id: i64,
    kind: String,
    category: String,
    amount: String,
    date: String,
    description: Option<String>,
    created_at: String,
) -> Result<Transaction> {
    Ok(Transaction {
        id,
        user_id,
        kind: TxKind::from_str(&kind).map_err(anyhow::Error::msg)?,
        category,
        amount: amount
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount))?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' in transactions", date))?,
        description,
        created_at,
    })
}

pub fn list_transactions(conn: &Connection, user_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, kind, category, amount, date, description, created_at
         FROM transactions WHERE user_id=?1 ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(tx_from_row(
            r.get(0)?,
            r.get(1)?,
            r.get(2)?,
            r.get(3)?,
            r.get(4)?,
            r.get(5)?,
            r.get(6)?,
            r.get(7)?,
        )?);
    }
    Ok(out)
}

pub fn get_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<Transaction> {
    let row = conn
        .query_row(
            "SELECT id, user_id, kind, category, amount, date, description, created_at
             FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, user_id],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, String>(4)?,
                    r.get::<_, String>(5)?,
                    r.get::<_, Option<String>>(6)?,
                    r.get::<_, String>(7)?,
                ))
            },
        )
        .optional()?;
    match row {
        Some((id, uid, kind, cat, amt, date, desc, created)) => {
            tx_from_row(id, uid, kind, cat, amt, date, desc, created)
        }
        None => Err(LedgerError::NotFound(format!("Transaction #{}", id)).into()),
    }
}

pub fn insert_transaction(
    conn: &Connection,
    user_id: i64,
    kind: TxKind,
    category: &str,
    amount: Decimal,
    date: NaiveDate,
    description: Option<&str>,
) -> Result<Transaction> {
    conn.execute(
        "INSERT INTO transactions(user_id, kind, category, amount, date, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            kind.as_str(),
            category,
            amount.to_string(),
            date.to_string(),
            description
        ],
    )?;
    get_transaction(conn, user_id, conn.last_insert_rowid())
}

/// Replaces kind/category/amount/date/description of an existing record.
pub fn update_transaction(conn: &Connection, tx: &Transaction) -> Result<()> {
    let n = conn.execute(
        "UPDATE transactions SET kind=?1, category=?2, amount=?3, date=?4, description=?5
         WHERE id=?6 AND user_id=?7",
        params![
            tx.kind.as_str(),
            tx.category,
            tx.amount.to_string(),
            tx.date.to_string(),
            tx.description,
            tx.id,
            tx.user_id
        ],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound(format!("Transaction #{}", tx.id)).into());
    }
    Ok(())
}

pub fn delete_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound(format!("Transaction #{}", id)).into());
    }
    Ok(())
}

fn budget_from_row(
    id: i64,
    user_id: i64,
    category: String,
    limit: String,
    spent: String,
    color: String,
    created_at: String,
) -> Result<Budget> {
    Ok(Budget {
        id,
        user_id,
        category,
        limit: limit
            .parse::<Decimal>()
            .with_context(|| format!("Invalid limit '{}' in budgets", limit))?,
        spent: spent
            .parse::<Decimal>()
            .with_context(|| format!("Invalid spent '{}' in budgets", spent))?,
        color,
        created_at,
    })
}

pub fn list_budgets(conn: &Connection, user_id: i64) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, category, limit_amount, spent, color, created_at
         FROM budgets WHERE user_id=?1 ORDER BY category",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(budget_from_row(
            r.get(0)?,
            r.get(1)?,
            r.get(2)?,
            r.get(3)?,
            r.get(4)?,
            r.get(5)?,
            r.get(6)?,
        )?);
    }
    Ok(out)
}

pub fn find_budget(conn: &Connection, user_id: i64, category: &str) -> Result<Option<Budget>> {
    let row = conn
        .query_row(
            "SELECT id, user_id, category, limit_amount, spent, color, created_at
             FROM budgets WHERE user_id=?1 AND category=?2",
            params![user_id, category],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, String>(4)?,
                    r.get::<_, String>(5)?,
                    r.get::<_, String>(6)?,
                ))
            },
        )
        .optional()?;
    match row {
        Some((id, uid, cat, limit, spent, color, created)) => {
            Ok(Some(budget_from_row(id, uid, cat, limit, spent, color, created)?))
        }
        None => Ok(None),
    }
}

pub fn insert_budget(
    conn: &Connection,
    user_id: i64,
    category: &str,
    limit: Decimal,
    spent: Decimal,
    color: &str,
) -> Result<Budget> {
    conn.execute(
        "INSERT INTO budgets(user_id, category, limit_amount, spent, color)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id,
            category,
            limit.to_string(),
            spent.to_string(),
            color
        ],
    )?;
    find_budget(conn, user_id, category)?
        .ok_or_else(|| LedgerError::NotFound(format!("Budget '{}'", category)).into())
}

pub fn update_budget(
    conn: &Connection,
    user_id: i64,
    category: &str,
    limit: Option<Decimal>,
    color: Option<&str>,
) -> Result<Budget> {
    let existing = find_budget(conn, user_id, category)?
        .ok_or_else(|| anyhow::Error::from(LedgerError::NotFound(format!("Budget '{}'", category))))?;
    let new_limit = limit.unwrap_or(existing.limit);
    let new_color = color.unwrap_or(&existing.color);
    conn.execute(
        "UPDATE budgets SET limit_amount=?1, color=?2 WHERE id=?3",
        params![new_limit.to_string(), new_color, existing.id],
    )?;
    find_budget(conn, user_id, category)?
        .ok_or_else(|| LedgerError::NotFound(format!("Budget '{}'", category)).into())
}

pub fn delete_budget(conn: &Connection, user_id: i64, category: &str) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM budgets WHERE user_id=?1 AND category=?2",
        params![user_id, category],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound(format!("Budget '{}'", category)).into());
    }
    Ok(())
}

pub fn save_spent(conn: &Connection, budget_id: i64, spent: Decimal) -> Result<()> {
    conn.execute(
        "UPDATE budgets SET spent=?1 WHERE id=?2",
        params![spent.to_string(), budget_id],
    )?;
    Ok(())
}

pub fn list_categories(conn: &Connection, user_id: i64) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, icon, color, kind
         FROM categories WHERE user_id=?1 ORDER BY name",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(5)?;
        out.push(Category {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            icon: r.get(3)?,
            color: r.get(4)?,
            kind: TxKind::from_str(&kind).map_err(anyhow::Error::msg)?,
        });
    }
    Ok(out)
}

pub fn insert_category(
    conn: &Connection,
    user_id: i64,
    name: &str,
    icon: &str,
    color: &str,
    kind: TxKind,
) -> Result<Category> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM categories WHERE user_id=?1 AND name=?2",
            params![user_id, name],
            |r| r.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Err(
            LedgerError::Validation(format!("Category '{}' already exists", name)).into(),
        );
    }
    conn.execute(
        "INSERT INTO categories(user_id, name, icon, color, kind) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, name, icon, color, kind.as_str()],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Category {
        id,
        user_id,
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        kind,
    })
}
