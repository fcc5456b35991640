// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::auth;
use crate::ledger;
use crate::store::{self, KvStore};
use crate::utils::confirm;

pub fn handle(store: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(store)?;
    if !confirm(
        "This will permanently delete ALL of your ledger data. Continue?",
        m.get_flag("yes"),
    )? {
        println!("Aborted.");
        return Ok(());
    }
    store::save_snapshot(store, &user.id, &ledger::reset_all())?;
    println!("All ledger data deleted.");
    Ok(())
}
