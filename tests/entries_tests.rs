// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerly::error::LedgerError;
use ledgerly::models::TxKind;
use ledgerly::{cli, commands::entries, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["ledgerly"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("income", m)) => entries::handle(conn, TxKind::Income, m),
        Some(("expense", m)) => entries::handle(conn, TxKind::Expense, m),
        _ => panic!("no entry subcommand"),
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

#[test]
fn add_writes_to_matching_table_only() {
    let conn = setup();
    run(
        &conn,
        &[
            "expense", "add", "--amount", "200", "--category", "Food", "--date", "5/1/2024",
            "--time", "10:0:0", "--description", "groceries",
        ],
    )
    .unwrap();
    assert_eq!(count(&conn, "expense"), 1);
    assert_eq!(count(&conn, "income"), 0);

    let stored: (String, String, String) = conn
        .query_row("SELECT amount, date, time FROM expense", [], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?))
        })
        .unwrap();
    assert_eq!(stored, ("200".into(), "2024-01-05".into(), "10:0:0".into()));
}

#[test]
fn add_stamps_time_when_missing() {
    let conn = setup();
    run(
        &conn,
        &["income", "add", "--amount", "1000", "--category", "Salary", "--date", "2024-01-05"],
    )
    .unwrap();
    let rec = store::get(&conn, TxKind::Income, 1).unwrap().unwrap();
    assert!(ledgerly::utils::parse_time(&rec.time).is_some());
}

#[test]
fn invalid_input_writes_nothing() {
    let conn = setup();
    let err = run(
        &conn,
        &["expense", "add", "--amount=-3", "--category", "Food", "--date", "2024-01-05"],
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::NegativeAmount("-3".into()))
    );

    let err = run(
        &conn,
        &["expense", "add", "--amount", "3", "--category", "Food", "--date", "2024-13-45"],
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InvalidDate(_))
    ));
    assert_eq!(count(&conn, "expense"), 0);
}

#[test]
fn category_must_belong_to_kind() {
    let conn = setup();
    // Salary is an income label
    let err = run(
        &conn,
        &["expense", "add", "--amount", "3", "--category", "Salary", "--date", "2024-01-05"],
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::UnknownCategory { kind: TxKind::Expense, .. })
    ));
    assert_eq!(count(&conn, "expense"), 0);

    ledgerly::commands::categories::add(&conn, TxKind::Expense, "Rent").unwrap();
    run(
        &conn,
        &["expense", "add", "--amount", "900", "--category", "Rent", "--date", "2024-01-01"],
    )
    .unwrap();
    assert_eq!(count(&conn, "expense"), 1);
}

#[test]
fn update_changes_fields_and_keeps_time() {
    let conn = setup();
    run(
        &conn,
        &[
            "income", "add", "--amount", "500", "--category", "Salary", "--date", "2024-02-01",
            "--time", "8:30:0",
        ],
    )
    .unwrap();
    run(
        &conn,
        &["income", "update", "--id", "1", "--amount", "750.25", "--category", "Investment"],
    )
    .unwrap();
    let rec = store::get(&conn, TxKind::Income, 1).unwrap().unwrap();
    assert_eq!(rec.amount, Some(Decimal::new(75025, 2)));
    assert_eq!(rec.category, "Investment");
    assert_eq!(rec.date, "2024-02-01");
    assert_eq!(rec.time, "8:30:0");
}

#[test]
fn update_and_delete_report_missing_ids() {
    let conn = setup();
    let err = run(&conn, &["expense", "update", "--id", "9", "--amount", "1"]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::NotFound { kind: TxKind::Expense, id: 9 })
    );
    let err = run(&conn, &["income", "rm", "--id", "4"]).unwrap_err();
    assert_eq!(err.to_string(), "No income entry with id 4");
}

#[test]
fn delete_only_touches_its_collection() {
    let conn = setup();
    run(
        &conn,
        &["income", "add", "--amount", "10", "--category", "Other", "--date", "2024-01-01"],
    )
    .unwrap();
    run(
        &conn,
        &["expense", "add", "--amount", "5", "--category", "Other", "--date", "2024-01-01"],
    )
    .unwrap();
    run(&conn, &["expense", "rm", "--id", "1"]).unwrap();
    assert_eq!(count(&conn, "expense"), 0);
    assert_eq!(count(&conn, "income"), 1);
}

#[test]
fn missing_id_is_an_error_not_id_zero() {
    use clap::{Arg, Command, value_parser};

    let conn = setup();
    run(
        &conn,
        &["expense", "add", "--amount", "5", "--category", "Food", "--date", "2024-01-01"],
    )
    .unwrap();
    conn.execute("UPDATE expense SET id = 0", []).unwrap();

    let id = || Arg::new("id").long("id").value_parser(value_parser!(i64));
    let matches = Command::new("expense")
        .subcommand(Command::new("rm").arg(id()))
        .subcommand(Command::new("update").arg(id()))
        .get_matches_from(["expense", "rm"]);
    let err = entries::handle(&conn, TxKind::Expense, &matches).unwrap_err();
    assert!(err.to_string().contains("--id is required"));

    let matches = Command::new("expense")
        .subcommand(Command::new("rm").arg(id()))
        .subcommand(Command::new("update").arg(id()))
        .get_matches_from(["expense", "update"]);
    assert!(entries::handle(&conn, TxKind::Expense, &matches).is_err());
    assert_eq!(count(&conn, "expense"), 1);
}
