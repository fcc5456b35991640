// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::insight::{API_KEY_SETTING, DEFAULT_MODEL, MODEL_SETTING};
use crate::store::{self, KvStore};
use crate::utils::pretty_table;

pub fn handle(store: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-key", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            store::set_setting(store, API_KEY_SETTING, key)?;
            println!("API key stored.");
            Ok(())
        }
        Some(("set-model", sub)) => {
            let model = sub.get_one::<String>("model").unwrap();
            store::set_setting(store, MODEL_SETTING, model)?;
            println!("Insight model set to {}.", model);
            Ok(())
        }
        Some(("show", _)) => show(store),
        _ => Ok(()),
    }
}

fn show(store: &dyn KvStore) -> Result<()> {
    // Never echo the key itself.
    let key = match store::get_setting(store, API_KEY_SETTING)? {
        Some(_) => "set",
        None => "unset",
    };
    let model = store::get_setting(store, MODEL_SETTING)?
        .unwrap_or_else(|| format!("{} (default)", DEFAULT_MODEL));
    let rows = vec![
        vec![API_KEY_SETTING.to_string(), key.to_string()],
        vec![MODEL_SETTING.to_string(), model],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
