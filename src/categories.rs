// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::error::LedgerError;
use crate::models::TxKind;
use crate::utils::{get_setting, set_setting};

const DEFAULT_INCOME: &[&str] = &["Salary", "Freelancing", "Investment", "Other"];
const DEFAULT_EXPENSE: &[&str] = &["Food", "Transport", "Bills", "Other"];

/// The income and expense category lists. Each list is stored as a JSON array
/// under `<kind>_categories` in the settings table; labels can only be
/// appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStore {
    income: Vec<String>,
    expense: Vec<String>,
}

impl Default for CategoryStore {
    fn default() -> Self {
        CategoryStore {
            income: Self::defaults(TxKind::Income),
            expense: Self::defaults(TxKind::Expense),
        }
    }
}

impl CategoryStore {
    pub fn defaults(kind: TxKind) -> Vec<String> {
        let labels = match kind {
            TxKind::Income => DEFAULT_INCOME,
            TxKind::Expense => DEFAULT_EXPENSE,
        };
        labels.iter().map(|s| s.to_string()).collect()
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        let mut store = CategoryStore::default();
        for kind in TxKind::ALL {
            if let Some(raw) = get_setting(conn, &setting_key(kind))? {
                let labels: Vec<String> = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt {} category list", kind.noun()))?;
                *store.labels_mut(kind) = labels;
            }
        }
        Ok(store)
    }

    pub fn list(&self, kind: TxKind) -> &[String] {
        match kind {
            TxKind::Income => &self.income,
            TxKind::Expense => &self.expense,
        }
    }

    pub fn contains(&self, kind: TxKind, label: &str) -> bool {
        self.list(kind).iter().any(|l| l == label)
    }

    /// Appends `label` unless an identical one exists. Returns whether it was added.
    pub fn add_if_absent(&mut self, kind: TxKind, label: &str) -> Result<bool, LedgerError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(LedgerError::EmptyCategoryName);
        }
        if self.contains(kind, label) {
            return Ok(false);
        }
        self.labels_mut(kind).push(label.to_string());
        Ok(true)
    }

    pub fn persist(&self, conn: &Connection) -> Result<()> {
        for kind in TxKind::ALL {
            let raw = serde_json::to_string(self.list(kind))?;
            set_setting(conn, &setting_key(kind), &raw)?;
        }
        Ok(())
    }

    fn labels_mut(&mut self, kind: TxKind) -> &mut Vec<String> {
        match kind {
            TxKind::Income => &mut self.income,
            TxKind::Expense => &mut self.expense,
        }
    }
}

fn setting_key(kind: TxKind) -> String {
    format!("{}_categories", kind.noun())
}
