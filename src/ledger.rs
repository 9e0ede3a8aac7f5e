// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger aggregation: merge the income and expense collections into one
//! ordered view, filter it, and derive totals.
//!
//! Everything here is a pure function over already-fetched records. Callers
//! keep the unfiltered list around and re-run [`filter`] whenever the user
//! changes the selection; nothing is cached.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::models::{DailyTotals, RawRecord, Totals, Transaction, TxKind};
use crate::utils::{parse_entry_date, parse_time};

/// Tags both collections, concatenates them and sorts newest first.
pub fn merge_and_sort(income: Vec<RawRecord>, expense: Vec<RawRecord>) -> Vec<Transaction> {
    let mut out = Vec::with_capacity(income.len() + expense.len());
    out.extend(income.into_iter().map(|r| r.tag(TxKind::Income)));
    out.extend(expense.into_iter().map(|r| r.tag(TxKind::Expense)));
    out.sort_by(|a, b| ledger_order(b, a));
    out
}

/// Ascending `(date, time)` order. Dates compare as ISO strings; times compare
/// by their numeric fields since they are stored without zero padding.
pub fn ledger_order(a: &Transaction, b: &Transaction) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| compare_times(&a.time, &b.time))
}

fn compare_times(a: &str, b: &str) -> Ordering {
    match (parse_time(a), parse_time(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        // unreadable times sink below readable ones within a day
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Kind(TxKind),
    /// Exact, case-sensitive match on the category label.
    Label(String),
}

impl CategoryFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Kind(k) => t.kind == *k,
            CategoryFilter::Label(l) => t.category == *l,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "All" => CategoryFilter::All,
            "Income" => CategoryFilter::Kind(TxKind::Income),
            "Expense" => CategoryFilter::Kind(TxKind::Expense),
            other => CategoryFilter::Label(other.to_string()),
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Kind(k) => write!(f, "{}", k),
            CategoryFilter::Label(l) => f.write_str(l),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Yesterday,
    LastDays(u32),
    LastMonths(u32),
    LastYears(u32),
    Between { start: NaiveDate, end: NaiveDate },
}

/// Inclusive bounds in ISO text form; `None` leaves that side open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateBounds {
    fn day(d: NaiveDate) -> Self {
        DateBounds {
            start: Some(d.to_string()),
            end: Some(d.to_string()),
        }
    }

    fn since(d: Option<NaiveDate>) -> Self {
        DateBounds {
            start: d.map(|d| d.to_string()),
            end: None,
        }
    }

    /// An open range admits every record. A bounded range only admits ISO
    /// dates; unparsable stored text never matches.
    pub fn contains(&self, date: &str) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return false;
        }
        self.start.as_deref().is_none_or(|s| date >= s)
            && self.end.as_deref().is_none_or(|e| date <= e)
    }
}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if end < start {
            return Err(LedgerError::InvalidRange(format!("{}..{}", start, end)));
        }
        Ok(DateRange::Between { start, end })
    }

    /// Anchors the range on `today`.
    pub fn resolve(&self, today: NaiveDate) -> DateBounds {
        match *self {
            DateRange::All => DateBounds::default(),
            DateRange::Today => DateBounds::day(today),
            DateRange::Yesterday => {
                DateBounds::day(today.checked_sub_days(Days::new(1)).unwrap_or(today))
            }
            DateRange::LastDays(n) => {
                DateBounds::since(today.checked_sub_days(Days::new(u64::from(n))))
            }
            DateRange::LastMonths(n) => DateBounds::since(today.checked_sub_months(Months::new(n))),
            DateRange::LastYears(n) => {
                DateBounds::since(today.checked_sub_months(Months::new(n.saturating_mul(12))))
            }
            DateRange::Between { start, end } => DateBounds {
                start: Some(start.to_string()),
                end: Some(end.to_string()),
            },
        }
    }
}

impl FromStr for DateRange {
    type Err = LedgerError;

    /// Accepts `all`, `today`, `yesterday`, `START..END`, compact `30d` / `6m` /
    /// `1y`, and worded forms such as `last-30-days`, `Last 90 days`,
    /// `6 months` or `last year`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidRange(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "all" => return Ok(DateRange::All),
            "today" => return Ok(DateRange::Today),
            "yesterday" => return Ok(DateRange::Yesterday),
            _ => {}
        }
        if let Some((a, b)) = lower.split_once("..") {
            let start = parse_entry_date(a).map_err(|_| invalid())?;
            let end = parse_entry_date(b).map_err(|_| invalid())?;
            return DateRange::between(start, end);
        }

        let mut words: Vec<&str> = lower
            .split(|c: char| c == ' ' || c == '-')
            .filter(|w| !w.is_empty())
            .collect();
        if words.first() == Some(&"last") {
            words.remove(0);
        }
        let (n, unit) = match words.as_slice() {
            [compact] if compact.len() > 1 && compact.is_char_boundary(compact.len() - 1) => {
                let (num, unit) = compact.split_at(compact.len() - 1);
                match num.parse::<u32>() {
                    Ok(n) => (n, unit),
                    // "last year", "last month"
                    Err(_) => (1, *compact),
                }
            }
            [count, unit] => {
                let n = match *count {
                    "one" | "a" => 1,
                    other => other.parse::<u32>().map_err(|_| invalid())?,
                };
                (n, *unit)
            }
            _ => return Err(invalid()),
        };
        match unit {
            "d" | "day" | "days" => Ok(DateRange::LastDays(n)),
            "m" | "month" | "months" => Ok(DateRange::LastMonths(n)),
            "y" | "year" | "years" => Ok(DateRange::LastYears(n)),
            _ => Err(invalid()),
        }
    }
}

/// Home screen summary windows, all ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Period::Daily => today,
            Period::Weekly => today.checked_sub_days(Days::new(7)).unwrap_or(today),
            Period::Monthly => today.with_day(1).unwrap_or(today),
            Period::Yearly => today.with_ordinal(1).unwrap_or(today),
        };
        (start, today)
    }
}

impl FromStr for Period {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Period::Daily),
            "weekly" | "week" => Ok(Period::Weekly),
            "monthly" | "month" => Ok(Period::Monthly),
            "yearly" | "year" => Ok(Period::Yearly),
            _ => Err(LedgerError::InvalidRange(s.to_string())),
        }
    }
}

/// Returns the records matching both predicates, in input order.
pub fn filter(
    transactions: &[Transaction],
    category: &CategoryFilter,
    range: &DateRange,
    today: NaiveDate,
) -> Vec<Transaction> {
    let bounds = range.resolve(today);
    transactions
        .iter()
        .filter(|t| category.matches(t) && bounds.contains(&t.date))
        .cloned()
        .collect()
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(inc, exp), t| match t.kind {
            TxKind::Income => (inc + t.amount_or_zero(), exp),
            TxKind::Expense => (inc, exp + t.amount_or_zero()),
        },
    );
    Totals::new(income, expense)
}

/// One entry per distinct date, in the order dates are first seen.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<DailyTotals> {
    let mut out: Vec<DailyTotals> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for t in transactions {
        let i = *index.entry(t.date.as_str()).or_insert_with(|| {
            out.push(DailyTotals {
                date: t.date.clone(),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            });
            out.len() - 1
        });
        match t.kind {
            TxKind::Income => out[i].income += t.amount_or_zero(),
            TxKind::Expense => out[i].expense += t.amount_or_zero(),
        }
    }
    out
}
