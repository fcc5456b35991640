// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{CategoryTotal, LedgerRow, NewTransaction, Summary, Transaction, TransactionKind};

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => {
                summary.income += tx.amount;
                summary.balance += tx.amount;
            }
            TransactionKind::Expense => {
                summary.expense += tx.amount;
                summary.balance -= tx.amount;
            }
        }
    }
    summary
}

/// Groups expense amounts by category in first-seen order. The order feeds
/// positional color assignment downstream, so it must stay stable for a
/// stable input collection.
pub fn categorize_expenses(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut groups: Vec<CategoryTotal> = Vec::new();
    for tx in transactions {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        match groups.iter_mut().find(|g| g.category == tx.category) {
            Some(group) => group.total += tx.amount,
            None => groups.push(CategoryTotal {
                category: tx.category.clone(),
                total: tx.amount,
            }),
        }
    }
    groups
}

/// Sorts chronologically, attaches the cumulative balance after each
/// transaction, then reverses so the newest row comes first for display.
/// The attached balances are chronological and are not recomputed after the
/// reversal; same-date rows keep their input order (stable sort).
pub fn with_running_balance(transactions: &[Transaction]) -> Vec<LedgerRow> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    let mut running = Decimal::ZERO;
    let mut rows: Vec<LedgerRow> = sorted
        .into_iter()
        .map(|tx| {
            match tx.kind {
                TransactionKind::Income => running += tx.amount,
                TransactionKind::Expense => running -= tx.amount,
            }
            LedgerRow {
                transaction: tx,
                running_balance: running,
            }
        })
        .collect();
    rows.reverse();
    rows
}

pub fn add(snapshot: &[Transaction], new: NewTransaction) -> Vec<Transaction> {
    let tx = Transaction {
        id: Uuid::new_v4().to_string(),
        date: new.date,
        description: new.description,
        amount: new.amount,
        kind: new.kind,
        category: new.category,
    };
    let mut next = Vec::with_capacity(snapshot.len() + 1);
    next.push(tx);
    next.extend_from_slice(snapshot);
    next
}

/// Replaces the record whose id matches. A missing id yields the snapshot
/// unchanged rather than an error; the boundary decides whether to mention it.
pub fn update(snapshot: &[Transaction], updated: Transaction) -> Vec<Transaction> {
    snapshot
        .iter()
        .map(|tx| {
            if tx.id == updated.id {
                updated.clone()
            } else {
                tx.clone()
            }
        })
        .collect()
}

pub fn delete(snapshot: &[Transaction], id: &str) -> Vec<Transaction> {
    snapshot.iter().filter(|tx| tx.id != id).cloned().collect()
}

pub fn reset_all() -> Vec<Transaction> {
    Vec::new()
}
