// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerly::models::TxKind;
use ledgerly::{cli, commands::ledger, db};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let income = [
        ("1000", "Salary", "2024-05-31", "9:0:0"),
        ("250.50", "Freelancing", "2024-06-01", "8:0:0"),
    ];
    for (amount, cat, date, time) in income {
        conn.execute(
            "INSERT INTO income(amount, category, description, date, time) VALUES (?1,?2,'',?3,?4)",
            params![amount, cat, date, time],
        )
        .unwrap();
    }
    let expense = [
        ("40", "Food", "2024-06-01", "13:5:0"),
        ("120", "Bills", "2024-05-01", "10:0:0"),
    ];
    for (amount, cat, date, time) in expense {
        conn.execute(
            "INSERT INTO expense(amount, category, description, date, time) VALUES (?1,?2,'',?3,?4)",
            params![amount, cat, date, time],
        )
        .unwrap();
    }
    conn
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["ledgerly", "ledger"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("ledger", ledger_m)) => match ledger_m.subcommand() {
            Some((_, m)) => m.clone(),
            None => panic!("no ledger subcommand"),
        },
        _ => panic!("no ledger command"),
    }
}

#[test]
fn list_merges_both_tables_newest_first() {
    let conn = setup();
    let rows = ledger::query(&conn, &sub_matches(&["list"]), today()).unwrap();
    let order: Vec<(&str, TxKind)> = rows.iter().map(|t| (t.category.as_str(), t.kind)).collect();
    assert_eq!(
        order,
        vec![
            ("Food", TxKind::Expense),
            ("Freelancing", TxKind::Income),
            ("Salary", TxKind::Income),
            ("Bills", TxKind::Expense),
        ]
    );
    // ids are per table, so both collections start at 1
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[1].id, 2);
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = ledger::query(&conn, &sub_matches(&["list", "--limit", "2"]), today()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2024-06-01");
}

#[test]
fn list_filters_by_kind_and_range() {
    let conn = setup();
    let rows = ledger::query(
        &conn,
        &sub_matches(&["list", "--category", "Expense", "--range", "today"]),
        today(),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Food");

    let rows = ledger::query(
        &conn,
        &sub_matches(&["list", "--range", "2024-05-01..2024-05-31"]),
        today(),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn bad_range_is_an_error() {
    let conn = setup();
    let err = ledger::query(&conn, &sub_matches(&["list", "--range", "soon"]), today())
        .unwrap_err();
    assert!(err.to_string().contains("soon"));
}

#[test]
fn legacy_rows_are_read_leniently() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expense(amount, category, description, date, time) VALUES ('abc','Other',NULL,'1/6/2024','7:0:0')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO income(amount, category, description, date, time) VALUES (12.5,'Other','tip','1/6/2024','6:0:0')",
        [],
    )
    .unwrap();

    let rows = ledger::query(
        &conn,
        &sub_matches(&["list", "--category", "Other", "--range", "today"]),
        today(),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|t| t.date == "2024-06-01"));
    assert_eq!(rows[0].kind, TxKind::Expense);
    assert_eq!(rows[0].amount, None);
    assert_eq!(rows[0].description, "");
    assert_eq!(rows[1].amount, Some(Decimal::new(125, 1)));

    let t = ledgerly::ledger::totals(&rows);
    assert_eq!(t.income, Decimal::new(125, 1));
    assert_eq!(t.expense, Decimal::ZERO);
}

#[test]
fn totals_and_chart_follow_selection() {
    let conn = setup();
    let rows = ledger::query(&conn, &sub_matches(&["totals"]), today()).unwrap();
    let t = ledgerly::ledger::totals(&rows);
    assert_eq!(t.income, Decimal::new(125050, 2));
    assert_eq!(t.expense, Decimal::from(160));
    assert_eq!(t.balance, Decimal::new(109050, 2));

    let groups = ledger::chart_groups(&conn, &sub_matches(&["chart", "--range", "30d"]), today())
        .unwrap();
    let dates: Vec<&str> = groups.iter().map(|g| g.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-05-31", "2024-06-01"]);
    assert_eq!(groups[1].income, Decimal::new(25050, 2));
    assert_eq!(groups[1].expense, Decimal::from(40));
}
