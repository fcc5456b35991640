// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::auth;
use crate::ledger;
use crate::models::{validate_entry, NewTransaction, TransactionKind};
use crate::store::{self, KvStore};
use crate::utils::{confirm, fmt_money, parse_amount, parse_date};

pub fn handle(store: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("edit", sub)) => edit(store, sub),
        Some(("rm", sub)) => rm(store, sub),
        _ => Ok(()),
    }
}

fn add(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(store)?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let description = sub.get_one::<String>("description").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind = TransactionKind::from_cli(sub.get_one::<String>("kind").unwrap()).unwrap();
    let category = sub.get_one::<String>("category").unwrap();

    let new = NewTransaction::new(date, description, amount, kind, category)?;
    let snapshot = store::load_snapshot(store, &user.id)?;
    let next = ledger::add(&snapshot, new);
    store::save_snapshot(store, &user.id, &next)?;
    println!(
        "Recorded {} {} '{}' on {} ({})",
        kind.as_str(),
        fmt_money(&amount),
        description,
        date,
        category
    );
    Ok(())
}

fn edit(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(store)?;
    let id = sub.get_one::<String>("id").unwrap();
    let snapshot = store::load_snapshot(store, &user.id)?;
    let Some(existing) = snapshot.iter().find(|tx| &tx.id == id) else {
        println!("No transaction with id {}.", id);
        return Ok(());
    };

    let mut updated = existing.clone();
    if let Some(s) = sub.get_one::<String>("date") {
        updated.date = parse_date(s)?;
    }
    if let Some(s) = sub.get_one::<String>("description") {
        updated.description = s.to_string();
    }
    if let Some(s) = sub.get_one::<String>("amount") {
        updated.amount = parse_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("kind") {
        updated.kind = TransactionKind::from_cli(s).unwrap();
    }
    if let Some(s) = sub.get_one::<String>("category") {
        updated.category = s.to_string();
    }
    validate_entry(
        &updated.description,
        updated.amount,
        updated.kind,
        &updated.category,
    )?;

    let next = ledger::update(&snapshot, updated);
    store::save_snapshot(store, &user.id, &next)?;
    println!("Updated transaction {}.", id);
    Ok(())
}

fn rm(store: &dyn KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(store)?;
    let id = sub.get_one::<String>("id").unwrap();
    let snapshot = store::load_snapshot(store, &user.id)?;
    let next = ledger::delete(&snapshot, id);
    if next.len() == snapshot.len() {
        println!("No transaction with id {}.", id);
        return Ok(());
    }
    if !confirm("Delete this transaction?", sub.get_flag("yes"))? {
        println!("Aborted.");
        return Ok(());
    }
    store::save_snapshot(store, &user.id, &next)?;
    println!("Deleted transaction {}.", id);
    Ok(())
}
