// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use kasbook::store::SqliteStore;
use kasbook::{cli, commands, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = SqliteStore::new(db::open_or_init()?);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data store initialized at {}", db::db_path()?.display());
        }
        Some(("register", sub)) => commands::auth::register(&store, sub)?,
        Some(("login", sub)) => commands::auth::login(&store, sub)?,
        Some(("logout", sub)) => commands::auth::logout(&store, sub)?,
        Some(("whoami", _)) => commands::auth::whoami(&store)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("ledger", sub)) => commands::ledger::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("categories", sub)) => commands::categories::handle(sub)?,
        Some(("analyze", sub)) => commands::insight::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("config", sub)) => commands::config::handle(&store, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
