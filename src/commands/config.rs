// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency_symbol, get_setting, pretty_table, set_currency_symbol, set_setting};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["currency_symbol".into(), get_currency_symbol(conn)?],
                vec![
                    "user_name".into(),
                    get_setting(conn, "user_name")?.unwrap_or_default(),
                ],
                vec![
                    "user_location".into(),
                    get_setting(conn, "user_location")?.unwrap_or_default(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-currency", sub)) => {
            let symbol = sub.get_one::<String>("symbol").context("symbol is required")?;
            let symbol = symbol.trim();
            if symbol.is_empty() {
                bail!("Currency symbol cannot be empty");
            }
            set_currency_symbol(conn, symbol)?;
            println!("Currency symbol set to {}", symbol);
        }
        Some(("set-profile", sub)) => {
            let name = sub.get_one::<String>("name").map(|s| s.trim()).unwrap_or("");
            let location = sub
                .get_one::<String>("location")
                .map(|s| s.trim())
                .unwrap_or("");
            set_profile(conn, name, location)?;
            println!("Details saved successfully!");
        }
        _ => {}
    }
    Ok(())
}

pub fn set_profile(conn: &Connection, name: &str, location: &str) -> Result<()> {
    if name.is_empty() || location.is_empty() {
        bail!("Please fill in all fields.");
    }
    set_setting(conn, "user_name", name)?;
    set_setting(conn, "user_location", location)?;
    Ok(())
}
