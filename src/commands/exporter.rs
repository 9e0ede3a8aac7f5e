// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::ledger::query;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ledger", sub)) => export_ledger(conn, sub),
        _ => Ok(()),
    }
}

fn export_ledger(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub.get_one::<String>("out").context("--out is required")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let today = chrono::Local::now().date_naive();
    let rows = query(conn, sub, today)?;

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
        wtr.write_record([
            "type", "id", "date", "time", "category", "amount", "description",
        ])?;
        for t in &rows {
            wtr.write_record(&[
                t.kind.as_str().to_string(),
                t.id.to_string(),
                t.date.clone(),
                t.time.clone(),
                t.category.clone(),
                t.amount.map(|a| a.to_string()).unwrap_or_default(),
                t.description.clone(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Write {}", out))?;
    }
    tracing::info!(rows = rows.len(), format = %fmt, "ledger exported");
    println!("Exported {} entries to {}", rows.len(), out);
    Ok(())
}
