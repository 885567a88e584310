// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetpro::errors::LedgerError;
use budgetpro::models::TxKind;
use budgetpro::{db, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let user = store::create_user(&conn, "tester").unwrap();
    let id = user.id;
    (conn, id)
}

#[test]
fn transactions_come_back_newest_first() {
    let (conn, user) = setup();
    for (date, amt) in [
        (d(2025, 8, 1), "10"),
        (d(2025, 8, 3), "20"),
        (d(2025, 8, 2), "30"),
    ] {
        store::insert_transaction(&conn, user, TxKind::Expense, "Food", dec(amt), date, None)
            .unwrap();
    }
    let txs = store::list_transactions(&conn, user).unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0].date, d(2025, 8, 3));
    assert_eq!(txs[1].date, d(2025, 8, 2));
    assert_eq!(txs[2].date, d(2025, 8, 1));
}

#[test]
fn inserted_transaction_round_trips() {
    let (conn, user) = setup();
    let tx = store::insert_transaction(
        &conn,
        user,
        TxKind::Expense,
        "Food & Dining",
        dec("25.50"),
        d(2025, 8, 5),
        Some("lunch"),
    )
    .unwrap();
    let fetched = store::get_transaction(&conn, user, tx.id).unwrap();
    assert_eq!(fetched.amount, dec("25.50"));
    assert_eq!(fetched.category, "Food & Dining");
    assert_eq!(fetched.description.as_deref(), Some("lunch"));
    assert_eq!(fetched.kind, TxKind::Expense);
}

#[test]
fn missing_transaction_is_not_found() {
    let (conn, user) = setup();
    let err = store::get_transaction(&conn, user, 42).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NotFound(_))
    ));
    let err = store::delete_transaction(&conn, user, 42).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NotFound(_))
    ));
}

#[test]
fn records_are_scoped_to_their_owner() {
    let (conn, user) = setup();
    let other = store::create_user(&conn, "other").unwrap().id;
    let tx = store::insert_transaction(
        &conn,
        user,
        TxKind::Income,
        "Salary",
        dec("100"),
        d(2025, 8, 1),
        None,
    )
    .unwrap();
    // the other user cannot see or delete it
    assert!(store::list_transactions(&conn, other).unwrap().is_empty());
    assert!(store::get_transaction(&conn, other, tx.id).is_err());
    assert!(store::delete_transaction(&conn, other, tx.id).is_err());
    assert_eq!(store::list_transactions(&conn, user).unwrap().len(), 1);
}

#[test]
fn budget_update_changes_limit_but_not_spent() {
    let (conn, user) = setup();
    store::insert_budget(&conn, user, "Food", dec("100"), dec("40"), "#f59e0b").unwrap();
    let updated = store::update_budget(&conn, user, "Food", Some(dec("150")), None).unwrap();
    assert_eq!(updated.limit, dec("150"));
    assert_eq!(updated.spent, dec("40"));
    assert_eq!(updated.color, "#f59e0b");
}

#[test]
fn budget_delete_leaves_transactions_alone() {
    let (conn, user) = setup();
    store::insert_transaction(&conn, user, TxKind::Expense, "Food", dec("10"), d(2025, 8, 1), None)
        .unwrap();
    store::insert_budget(&conn, user, "Food", dec("100"), dec("10"), "#f59e0b").unwrap();
    store::delete_budget(&conn, user, "Food").unwrap();
    assert!(store::find_budget(&conn, user, "Food").unwrap().is_none());
    assert_eq!(store::list_transactions(&conn, user).unwrap().len(), 1);

    let err = store::delete_budget(&conn, user, "Food").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NotFound(_))
    ));
}

#[test]
fn save_spent_persists() {
    let (conn, user) = setup();
    let b = store::insert_budget(&conn, user, "Food", dec("100"), dec("0"), "#f59e0b").unwrap();
    store::save_spent(&conn, b.id, dec("62.75")).unwrap();
    let reread = store::find_budget(&conn, user, "Food").unwrap().unwrap();
    assert_eq!(reread.spent, dec("62.75"));
}

#[test]
fn duplicate_user_is_a_validation_error() {
    let (conn, _user) = setup();
    let err = store::create_user(&conn, "tester").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::Validation(_))
    ));
}
