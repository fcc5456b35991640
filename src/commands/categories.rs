// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{categories_for, TransactionKind};
use crate::utils::pretty_table;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let kinds: Vec<TransactionKind> = match m.get_one::<String>("kind") {
        Some(s) => vec![TransactionKind::from_cli(s).unwrap()],
        None => vec![TransactionKind::Income, TransactionKind::Expense],
    };
    let mut rows = Vec::new();
    for kind in kinds {
        for name in categories_for(kind) {
            rows.push(vec![kind.as_str().to_string(), name.to_string()]);
        }
    }
    println!("{}", pretty_table(&["Kind", "Category"], rows));
    Ok(())
}
