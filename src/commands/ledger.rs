// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, CategoryFilter, DateRange};
use crate::models::{DailyTotals, Transaction};
use crate::store;
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const BAR_WIDTH: u32 = 30;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub, today)?,
        Some(("totals", sub)) => totals(conn, sub, today)?,
        Some(("chart", sub)) => chart(conn, sub, today)?,
        _ => {}
    }
    Ok(())
}

/// Reads both tables and merges them into the full ledger.
pub fn load(conn: &Connection) -> Result<Vec<Transaction>> {
    let income = store::list_income(conn)?;
    let expense = store::list_expense(conn)?;
    Ok(ledger::merge_and_sort(income, expense))
}

pub fn selection(sub: &clap::ArgMatches) -> Result<(CategoryFilter, DateRange)> {
    let category = match sub.get_one::<String>("category") {
        Some(c) => c.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };
    let range = match sub.get_one::<String>("range") {
        Some(r) => r
            .parse::<DateRange>()
            .with_context(|| format!("Bad --range '{}'", r))?,
        None => DateRange::All,
    };
    Ok((category, range))
}

/// The ledger filtered by the command's `--category`/`--range` and cut to `--limit`.
pub fn query(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<Vec<Transaction>> {
    let (category, range) = selection(sub)?;
    let all = load(conn)?;
    let mut rows = ledger::filter(&all, &category, &range, today);
    if let Ok(Some(limit)) = sub.try_get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    tracing::debug!(total = all.len(), shown = rows.len(), %category, "ledger query");
    Ok(rows)
}

fn list(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let data = query(conn, sub, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    println!("{}", entry_table(&data, &symbol));
    Ok(())
}

pub fn entry_table(data: &[Transaction], symbol: &str) -> String {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.clone(),
                t.time.clone(),
                t.kind.to_string(),
                t.category.clone(),
                fmt_money(&t.amount_or_zero(), symbol),
                t.description.clone(),
            ]
        })
        .collect();
    pretty_table(
        &["ID", "Date", "Time", "Type", "Category", "Amount", "Description"],
        rows,
    )
    .to_string()
}

fn totals(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let data = query(conn, sub, today)?;
    let t = ledger::totals(&data);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&t.income, &symbol),
                fmt_money(&t.expense, &symbol),
                fmt_money(&t.balance, &symbol),
            ]],
        )
    );
    Ok(())
}

/// Per-date groups oldest first, so the chart reads top to bottom in time.
pub fn chart_groups(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<Vec<DailyTotals>> {
    let mut data = query(conn, sub, today)?;
    data.reverse();
    Ok(ledger::group_by_date(&data))
}

fn chart(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let groups = chart_groups(conn, sub, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &groups)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let max = groups
        .iter()
        .flat_map(|g| [g.income, g.expense])
        .max()
        .unwrap_or(Decimal::ZERO);
    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            vec![
                g.date.clone(),
                fmt_money(&g.income, &symbol),
                fmt_money(&g.expense, &symbol),
                format!("{}\n{}", bar(g.income, max, '█'), bar(g.expense, max, '░')),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Income", "Expense", "Income █ / Expense ░"], rows)
    );
    Ok(())
}

pub fn bar(value: Decimal, max: Decimal, glyph: char) -> String {
    if max.is_zero() || value <= Decimal::ZERO {
        return String::new();
    }
    let cells = (value / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .max(1);
    std::iter::repeat_n(glyph, cells).collect()
}
