// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use serde_json::json;

use crate::auth;
use crate::ledger;
use crate::store::{self, KvStore};

pub fn handle(store: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();

    let user = auth::require_user(store)?;
    let snapshot = store::load_snapshot(store, &user.id)?;
    // Display order is newest first; files read better oldest first.
    let mut rows = ledger::with_running_balance(&snapshot);
    rows.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "description",
                "kind",
                "category",
                "amount",
                "running_balance",
            ])?;
            for row in &rows {
                let tx = &row.transaction;
                wtr.write_record([
                    tx.date.to_string(),
                    tx.description.clone(),
                    tx.kind.as_str().to_string(),
                    tx.category.clone(),
                    tx.amount.to_string(),
                    row.running_balance.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in &rows {
                let tx = &row.transaction;
                items.push(json!({
                    "date": tx.date,
                    "description": tx.description,
                    "kind": tx.kind.as_str(),
                    "category": tx.category,
                    "amount": tx.amount,
                    "running_balance": row.running_balance,
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported ledger to {}", out);
    Ok(())
}
