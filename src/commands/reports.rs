// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::ledger::entry_table;
use crate::ledger::Period;
use crate::models::{Totals, Transaction};
use crate::store;
use crate::utils::{fmt_money, get_currency_symbol, get_setting, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub period: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(flatten)]
    pub totals: Totals,
    /// The period's entries, newest first. Absent for the all-time summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Transaction>>,
}

/// Whole-table totals when `period` is `None`, otherwise totals and entries
/// for the period ending `today`. Sums come pre-aggregated from SQLite.
pub fn summary_for(conn: &Connection, period: Option<Period>, today: NaiveDate) -> Result<Summary> {
    let summary = match period {
        None => Summary {
            period: "all".into(),
            from: None,
            to: None,
            totals: Totals::new(store::sum_income(conn)?, store::sum_expense(conn)?),
            entries: None,
        },
        Some(p) => {
            let (start, end) = p.bounds(today);
            Summary {
                period: format!("{:?}", p).to_lowercase(),
                from: Some(start),
                to: Some(end),
                totals: Totals::new(
                    store::sum_income_in_range(conn, start, end)?,
                    store::sum_expense_in_range(conn, start, end)?,
                ),
                entries: Some(store::list_in_range(conn, start, end)?),
            }
        }
    };
    Ok(summary)
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = match sub.get_one::<String>("period").map(String::as_str) {
        None | Some("all") => None,
        Some(p) => Some(p.parse::<Period>()?),
    };
    let today = chrono::Local::now().date_naive();
    let s = summary_for(conn, period, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }

    if let Some(name) = get_setting(conn, "user_name")? {
        println!("Welcome, {}!", name);
    }
    let symbol = get_currency_symbol(conn)?;
    let span = match (s.from, s.to) {
        (Some(f), Some(t)) => format!("{} .. {}", f, t),
        _ => "all time".to_string(),
    };
    println!(
        "{}",
        pretty_table(
            &["Period", "Dates", "Income", "Expense", "Balance"],
            vec![vec![
                s.period.clone(),
                span,
                fmt_money(&s.totals.income, &symbol),
                fmt_money(&s.totals.expense, &symbol),
                fmt_money(&s.totals.balance, &symbol),
            ]],
        )
    );
    if let Some(entries) = &s.entries {
        if entries.is_empty() {
            println!("No entries in this period");
        } else {
            println!("{}", entry_table(entries, &symbol));
        }
    }
    Ok(())
}
