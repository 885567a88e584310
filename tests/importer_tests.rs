// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetpro::commands::importer;
use budgetpro::{cli, db, store, utils};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let user = store::create_user(&conn, "tester").unwrap();
    utils::set_active_user(&conn, user.id).unwrap();
    (conn, user.id)
}

fn import(conn: &mut Connection, path: &str) -> anyhow::Result<()> {
    let matches =
        cli::build_cli().get_matches_from(["budgetpro", "import", "transactions", path]);
    let (_, sub) = matches.subcommand().unwrap();
    importer::handle(conn, sub)
}

#[test]
fn csv_rows_become_transactions_and_budgets_reconcile() {
    let (mut conn, user) = setup();
    store::insert_budget(&conn, user, "Food", "100".parse().unwrap(), Decimal::ZERO, "#f59e0b")
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "date,type,category,amount,description").unwrap();
    writeln!(f, "2025-08-01,income,Salary,1000,pay").unwrap();
    writeln!(f, "2025-08-02,expense,Food,25.50,lunch").unwrap();
    writeln!(f, "2025-08-03,expense,Food,10,").unwrap();
    drop(f);

    import(&mut conn, path.to_str().unwrap()).unwrap();

    let txs = store::list_transactions(&conn, user).unwrap();
    assert_eq!(txs.len(), 3);
    let food = store::find_budget(&conn, user, "Food").unwrap().unwrap();
    assert_eq!(food.spent, "35.50".parse::<Decimal>().unwrap());
    // empty description column normalizes to none
    assert!(txs[0].description.is_none());
}

#[test]
fn bad_row_rolls_back_the_whole_import() {
    let (mut conn, user) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "date,type,category,amount,description").unwrap();
    writeln!(f, "2025-08-01,income,Salary,1000,").unwrap();
    writeln!(f, "2025-08-02,expense,Food,not-a-number,").unwrap();
    drop(f);

    assert!(import(&mut conn, path.to_str().unwrap()).is_err());
    assert!(store::list_transactions(&conn, user).unwrap().is_empty());
}
