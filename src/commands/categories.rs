// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::CategoryStore;
use crate::models::TxKind;
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = kind_of(sub)?;
            let name = sub.get_one::<String>("name").context("--name is required")?;
            if add(conn, kind, name)? {
                println!("Category added successfully!");
            } else {
                println!("Category already exists");
            }
        }
        Some(("list", sub)) => {
            let kind = kind_of(sub)?;
            let store = CategoryStore::load(conn)?;
            let data = store
                .list(kind)
                .iter()
                .map(|c| vec![c.clone()])
                .collect();
            let header = format!("{} categories", kind);
            println!("{}", pretty_table(&[header.as_str()], data));
        }
        _ => {}
    }
    Ok(())
}

fn kind_of(sub: &clap::ArgMatches) -> Result<TxKind> {
    let raw = sub.get_one::<String>("kind").context("--kind is required")?;
    Ok(raw.parse()?)
}

/// Load, append if absent, save. Returns whether the label was new.
pub fn add(conn: &Connection, kind: TxKind, name: &str) -> Result<bool> {
    let mut store = CategoryStore::load(conn)?;
    let added = store.add_if_absent(kind, name)?;
    if added {
        store.persist(conn)?;
        tracing::info!(kind = kind.noun(), name = name.trim(), "category added");
    }
    Ok(added)
}
