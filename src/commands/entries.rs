// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::CategoryStore;
use crate::error::LedgerError;
use crate::models::{NewEntry, TxKind};
use crate::store;
use crate::utils::{fmt_money, get_currency_symbol};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, kind: TxKind, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = add(conn, kind, sub)?;
            println!("{} saved successfully! (id {})", kind, id);
        }
        Some(("update", sub)) => update(conn, kind, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            store::delete(conn, kind, id)?;
            println!("Deleted {} {}", kind.noun(), id);
        }
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name).map(String::as_str)
}

/// Validates the form, checks the category against the kind's list and writes
/// the entry. Nothing is written when validation fails.
pub fn add(conn: &Connection, kind: TxKind, sub: &clap::ArgMatches) -> Result<i64> {
    let entry = NewEntry::from_input(
        kind,
        arg(sub, "amount").unwrap_or(""),
        arg(sub, "category").unwrap_or(""),
        arg(sub, "description"),
        arg(sub, "date").unwrap_or(""),
        arg(sub, "time"),
    )?;
    ensure_known_category(conn, kind, &entry.category)?;
    let id = store::insert(conn, kind, &entry)?;
    Ok(id)
}

fn update(conn: &Connection, kind: TxKind, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let current = store::get(conn, kind, id)?.ok_or(LedgerError::NotFound { kind, id })?;

    let amount = match arg(sub, "amount") {
        Some(a) => a.to_string(),
        None => current.amount_or_zero().to_string(),
    };
    let entry = NewEntry::from_input(
        kind,
        &amount,
        arg(sub, "category").unwrap_or(&current.category),
        Some(arg(sub, "description").unwrap_or(&current.description)),
        arg(sub, "date").unwrap_or(&current.date),
        // creation time is not rewritten by updates
        None,
    )?;
    if entry.category != current.category {
        ensure_known_category(conn, kind, &entry.category)?;
    }
    store::update(conn, kind, id, &entry)?;

    let symbol = get_currency_symbol(conn)?;
    println!(
        "Updated {} {}: {} {} on {}",
        kind.noun(),
        id,
        fmt_money(&entry.amount, &symbol),
        entry.category,
        entry.date
    );
    Ok(())
}

fn ensure_known_category(conn: &Connection, kind: TxKind, name: &str) -> Result<()> {
    let cats = CategoryStore::load(conn)?;
    if !cats.contains(kind, name) {
        return Err(LedgerError::UnknownCategory {
            kind,
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}
