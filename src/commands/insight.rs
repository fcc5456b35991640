// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::auth;
use crate::insight::InsightClient;
use crate::store::{self, KvStore};

pub fn handle(store: &dyn KvStore, m: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(store)?;
    let snapshot = store::load_snapshot(store, &user.id)?;
    let client = InsightClient::from_store(store)?;
    let insight = client.analyze(&snapshot)?;
    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&insight)?);
        return Ok(());
    }
    println!("[{}] {}", insight.status.as_str().to_uppercase(), insight.message);
    for (i, rec) in insight.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, rec);
    }
    Ok(())
}
