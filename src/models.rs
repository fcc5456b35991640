// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "EXPENSE")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_cli(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

pub const INCOME_CATEGORIES: &[&str] = &["Sales", "Services", "Investment", "Other Income"];
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Inventory",
    "Rent",
    "Utilities",
    "Salaries",
    "Transport",
    "Marketing",
    "Other Expense",
];

pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
}

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount must be greater than zero, got '{0}'")]
    NonPositiveAmount(Decimal),
    #[error("'{category}' is not a valid {kind} category")]
    UnknownCategory { kind: &'static str, category: String },
}

pub fn validate_entry(
    description: &str,
    amount: Decimal,
    kind: TransactionKind,
    category: &str,
) -> Result<(), EntryError> {
    if description.trim().is_empty() {
        return Err(EntryError::EmptyDescription);
    }
    if amount <= Decimal::ZERO {
        return Err(EntryError::NonPositiveAmount(amount));
    }
    if !categories_for(kind).contains(&category) {
        return Err(EntryError::UnknownCategory {
            kind: kind.as_str(),
            category: category.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        description: &str,
        amount: Decimal,
        kind: TransactionKind,
        category: &str,
    ) -> Result<Self, EntryError> {
        validate_entry(description, amount, kind, category)?;
        Ok(Self {
            date,
            description: description.to_string(),
            amount,
            kind,
            category: category.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerRow {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub running_balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightStatus {
    Good,
    Warning,
    Critical,
}

impl InsightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightStatus::Good => "good",
            InsightStatus::Warning => "warning",
            InsightStatus::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub status: InsightStatus,
    pub message: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
}
