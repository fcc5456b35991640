// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::auth;
use crate::ledger;
use crate::store::{self, KvStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub),
        Some(("spend-by-category", sub)) => spend_by_category(store, sub),
        _ => Ok(()),
    }
}

fn summary(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(store)?;
    let snapshot = store::load_snapshot(store, &user.id)?;
    let summary = ledger::summarize(&snapshot);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Income".to_string(), fmt_money(&summary.income)],
        vec!["Expense".to_string(), fmt_money(&summary.expense)],
        vec!["Balance".to_string(), fmt_money(&summary.balance)],
    ];
    println!("{}", pretty_table(&["Measure", "Amount"], rows));
    Ok(())
}

fn spend_by_category(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(store)?;
    let snapshot = store::load_snapshot(store, &user.id)?;
    let groups = ledger::categorize_expenses(&snapshot);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &groups)? {
        return Ok(());
    }
    if groups.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| vec![g.category.clone(), fmt_money(&g.total)])
        .collect();
    println!("{}", pretty_table(&["Category", "Total"], rows));
    Ok(())
}
