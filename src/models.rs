// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::utils::{format_time, parse_entry_date, parse_time};

/// Which of the two collections a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub const ALL: [TxKind; 2] = [TxKind::Income, TxKind::Expense];

    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "Income",
            TxKind::Expense => "Expense",
        }
    }

    /// Lowercase form, used for table names, setting keys and messages.
    pub fn noun(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(LedgerError::UnknownKind(other.to_string())),
        }
    }
}

/// A row as read from either the `income` or the `expense` table. It carries no
/// kind; the aggregator tags it when merging.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub id: i64,
    pub amount: Option<Decimal>,
    pub category: String,
    pub description: String,
    pub date: String,
    pub time: String,
}

impl RawRecord {
    pub fn tag(self, kind: TxKind) -> Transaction {
        Transaction {
            id: self.id,
            kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
            time: self.time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    /// `None` when the stored amount was missing or unparsable.
    pub amount: Option<Decimal>,
    pub category: String,
    pub description: String,
    pub date: String, // YYYY-MM-DD
    pub time: String, // H:M:S
}

impl Transaction {
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

/// A validated entry ready to be written to one of the two tables.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
}

impl NewEntry {
    /// Validates raw form input. Checks run in the order the entry form
    /// reports them: amount, category, date.
    pub fn from_input(
        kind: TxKind,
        amount: &str,
        category: &str,
        description: Option<&str>,
        date: &str,
        time: Option<&str>,
    ) -> Result<Self, LedgerError> {
        let amount = amount.trim();
        let category = category.trim();
        let date = date.trim();
        if amount.is_empty() {
            return Err(LedgerError::MissingAmount(kind));
        }
        if category.is_empty() {
            return Err(LedgerError::MissingCategory);
        }
        if date.is_empty() {
            return Err(LedgerError::MissingDate);
        }

        let parsed = amount
            .parse::<Decimal>()
            .map_err(|_| LedgerError::InvalidAmount(amount.to_string()))?;
        if parsed.is_sign_negative() && !parsed.is_zero() {
            return Err(LedgerError::NegativeAmount(amount.to_string()));
        }
        let date = parse_entry_date(date)?;
        let time = match time.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => {
                let (h, m, s) =
                    parse_time(t).ok_or_else(|| LedgerError::InvalidTime(t.to_string()))?;
                format_time(h, m, s)
            }
            None => {
                let now = chrono::Local::now();
                format_time(now.hour(), now.minute(), now.second())
            }
        };

        Ok(NewEntry {
            amount: parsed,
            category: category.to_string(),
            description: description.map(|d| d.trim().to_string()).unwrap_or_default(),
            date,
            time,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Totals {
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Per-date income/expense pair, one bar group in the chart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    pub date: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_validation_order_matches_form() {
        let err = NewEntry::from_input(TxKind::Expense, "", "", None, "", None).unwrap_err();
        assert_eq!(err, LedgerError::MissingAmount(TxKind::Expense));
        assert_eq!(err.to_string(), "Please enter the expense amount.");

        let err = NewEntry::from_input(TxKind::Expense, "10", " ", None, "", None).unwrap_err();
        assert_eq!(err, LedgerError::MissingCategory);

        let err = NewEntry::from_input(TxKind::Expense, "10", "Food", None, "", None).unwrap_err();
        assert_eq!(err, LedgerError::MissingDate);
    }

    #[test]
    fn entry_rejects_bad_amounts() {
        let err =
            NewEntry::from_input(TxKind::Income, "ten", "Salary", None, "2024-01-05", None)
                .unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount("ten".into()));
        let err = NewEntry::from_input(TxKind::Income, "-5", "Salary", None, "2024-01-05", None)
            .unwrap_err();
        assert_eq!(err, LedgerError::NegativeAmount("-5".into()));
    }

    #[test]
    fn entry_normalises_picker_date_and_time() {
        let e = NewEntry::from_input(
            TxKind::Income,
            "1000",
            "Salary",
            Some("  March pay "),
            "5/3/2024",
            Some("09:05:00"),
        )
        .unwrap();
        assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(e.time, "9:5:0");
        assert_eq!(e.description, "March pay");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("INCOME".parse::<TxKind>().unwrap(), TxKind::Income);
        assert_eq!("expense".parse::<TxKind>().unwrap(), TxKind::Expense);
        assert!("savings".parse::<TxKind>().is_err());
    }
}
