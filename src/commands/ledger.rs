// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::auth;
use crate::ledger;
use crate::models::TransactionKind;
use crate::store::{self, KvStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(store)?;
    let snapshot = store::load_snapshot(store, &user.id)?;
    if snapshot.is_empty() {
        println!("No transactions recorded yet.");
        return Ok(());
    }
    let rows = ledger::with_running_balance(&snapshot);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let tx = &row.transaction;
            let (debit, credit) = match tx.kind {
                TransactionKind::Income => (fmt_money(&tx.amount), "-".to_string()),
                TransactionKind::Expense => ("-".to_string(), fmt_money(&tx.amount)),
            };
            vec![
                tx.id.clone(),
                tx.date.format("%d/%m/%Y").to_string(),
                tx.description.clone(),
                tx.category.clone(),
                debit,
                credit,
                fmt_money(&row.running_balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Description", "Category", "Debit", "Credit", "Balance"],
            table_rows,
        )
    );
    Ok(())
}
