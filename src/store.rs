// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row access for the `income` and `expense` tables. Rows are mapped into
//! [`RawRecord`] here so the two-table layout stays behind this module.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Params, params};
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::ledger::merge_and_sort;
use crate::models::{NewEntry, RawRecord, Transaction, TxKind};
use crate::utils::{normalize_date, parse_amount_lenient, parse_decimal};

const COLUMNS: &str = "id, amount, category, description, date, time";

pub fn list_income(conn: &Connection) -> Result<Vec<RawRecord>> {
    list(conn, TxKind::Income)
}

pub fn list_expense(conn: &Connection) -> Result<Vec<RawRecord>> {
    list(conn, TxKind::Expense)
}

pub fn list(conn: &Connection, kind: TxKind) -> Result<Vec<RawRecord>> {
    let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, kind.noun());
    let rows = query_records(conn, &sql, [])
        .with_context(|| format!("List {} entries", kind.noun()))?;
    tracing::debug!(kind = kind.noun(), rows = rows.len(), "listed entries");
    Ok(rows)
}

/// Both collections restricted to `[start, end]`, tagged and sorted.
pub fn list_in_range(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
    let mut parts = Vec::with_capacity(2);
    for kind in TxKind::ALL {
        let sql = format!(
            "SELECT {} FROM {} WHERE date BETWEEN ?1 AND ?2 ORDER BY id",
            COLUMNS,
            kind.noun()
        );
        let rows = query_records(conn, &sql, params![start.to_string(), end.to_string()])
            .with_context(|| format!("List {} entries in range", kind.noun()))?;
        parts.push(rows);
    }
    let expense = parts.pop().unwrap_or_default();
    let income = parts.pop().unwrap_or_default();
    Ok(merge_and_sort(income, expense))
}

pub fn get(conn: &Connection, kind: TxKind, id: i64) -> Result<Option<Transaction>> {
    let sql = format!("SELECT {} FROM {} WHERE id=?1", COLUMNS, kind.noun());
    let mut stmt = conn.prepare(&sql)?;
    let rec = stmt.query_row(params![id], read_record).optional()?;
    Ok(rec.map(|r| r.tag(kind)))
}

pub fn sum_income(conn: &Connection) -> Result<Decimal> {
    sum(conn, TxKind::Income, None)
}

pub fn sum_expense(conn: &Connection) -> Result<Decimal> {
    sum(conn, TxKind::Expense, None)
}

pub fn sum_income_in_range(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Decimal> {
    sum(conn, TxKind::Income, Some((start, end)))
}

pub fn sum_expense_in_range(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Decimal> {
    sum(conn, TxKind::Expense, Some((start, end)))
}

// SQLite's SUM reads non-numeric text as 0, which is the tolerance we want.
// Ranges compare stored date text, so legacy D/M/YYYY rows fall outside every
// window here even though `ledger::filter` normalises and counts them.
fn sum(conn: &Connection, kind: TxKind, range: Option<(NaiveDate, NaiveDate)>) -> Result<Decimal> {
    let total: String = match range {
        Some((start, end)) => conn.query_row(
            &format!(
                "SELECT printf('%.2f', IFNULL(SUM(amount),0)) FROM {} WHERE date BETWEEN ?1 AND ?2",
                kind.noun()
            ),
            params![start.to_string(), end.to_string()],
            |r| r.get(0),
        ),
        None => conn.query_row(
            &format!("SELECT printf('%.2f', IFNULL(SUM(amount),0)) FROM {}", kind.noun()),
            [],
            |r| r.get(0),
        ),
    }
    .with_context(|| format!("Sum {} entries", kind.noun()))?;
    parse_decimal(&total)
}

pub fn insert(conn: &Connection, kind: TxKind, entry: &NewEntry) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {}(amount, category, description, date, time) VALUES (?1, ?2, ?3, ?4, ?5)",
            kind.noun()
        ),
        params![
            entry.amount.to_string(),
            entry.category,
            entry.description,
            entry.date.to_string(),
            entry.time
        ],
    )
    .with_context(|| format!("Failed to save {}. Please try again.", kind.noun()))?;
    let id = conn.last_insert_rowid();
    tracing::info!(kind = kind.noun(), id, amount = %entry.amount, "entry saved");
    Ok(id)
}

/// Rewrites amount, category, description and date. The creation time is kept.
pub fn update(conn: &Connection, kind: TxKind, id: i64, entry: &NewEntry) -> Result<()> {
    let n = conn
        .execute(
            &format!(
                "UPDATE {} SET amount=?1, category=?2, description=?3, date=?4 WHERE id=?5",
                kind.noun()
            ),
            params![
                entry.amount.to_string(),
                entry.category,
                entry.description,
                entry.date.to_string(),
                id
            ],
        )
        .with_context(|| format!("Failed to update {} {}", kind.noun(), id))?;
    if n == 0 {
        return Err(LedgerError::NotFound { kind, id }.into());
    }
    tracing::info!(kind = kind.noun(), id, "entry updated");
    Ok(())
}

pub fn delete(conn: &Connection, kind: TxKind, id: i64) -> Result<()> {
    let n = conn
        .execute(&format!("DELETE FROM {} WHERE id=?1", kind.noun()), params![id])
        .with_context(|| format!("Failed to delete {} {}", kind.noun(), id))?;
    if n == 0 {
        return Err(LedgerError::NotFound { kind, id }.into());
    }
    tracing::info!(kind = kind.noun(), id, "entry deleted");
    Ok(())
}

fn query_records<P: Params>(conn: &Connection, sql: &str, p: P) -> Result<Vec<RawRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(p, read_record)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

fn read_record(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawRecord> {
    let id: i64 = r.get(0)?;
    let amount: Value = r.get(1)?;
    let category: Option<String> = r.get(2)?;
    let description: Option<String> = r.get(3)?;
    let date: Option<String> = r.get(4)?;
    let time: Option<String> = r.get(5)?;
    Ok(RawRecord {
        id,
        amount: amount_from_value(amount),
        category: category.unwrap_or_default(),
        description: description.unwrap_or_default(),
        date: normalize_date(&date.unwrap_or_default()),
        time: time.unwrap_or_default(),
    })
}

// Older databases kept amounts as REAL; accept any storage class.
fn amount_from_value(v: Value) -> Option<Decimal> {
    match v {
        Value::Text(s) => parse_amount_lenient(Some(&s)),
        Value::Integer(i) => Some(Decimal::from(i)),
        Value::Real(f) => Decimal::try_from(f).ok(),
        Value::Null | Value::Blob(_) => None,
    }
}
