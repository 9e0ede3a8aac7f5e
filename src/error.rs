// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::TxKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Please enter the {} amount.", .0.noun())]
    MissingAmount(TxKind),
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Amount must not be negative (got {0})")]
    NegativeAmount(String),
    #[error("Please select a category.")]
    MissingCategory,
    #[error("Please select a date.")]
    MissingDate,
    #[error("Invalid date '{0}', expected YYYY-MM-DD or D/M/YYYY")]
    InvalidDate(String),
    #[error("Invalid time '{0}', expected H:M:S")]
    InvalidTime(String),
    #[error("Unknown {} category '{}', add it with `ledgerly category add`", .kind.noun(), .name)]
    UnknownCategory { kind: TxKind, name: String },
    #[error("Category name cannot be empty")]
    EmptyCategoryName,
    #[error("Unknown entry kind '{0}', expected income or expense")]
    UnknownKind(String),
    #[error("Invalid date range '{0}'")]
    InvalidRange(String),
    #[error("No {} entry with id {}", .kind.noun(), .id)]
    NotFound { kind: TxKind, id: i64 },
}
