// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use kasbook::models::{Transaction, TransactionKind};
use kasbook::store::{self, SqliteStore};
use kasbook::{auth, cli, commands};

fn setup() -> SqliteStore {
    let store = SqliteStore::in_memory().unwrap();
    auth::register(&store, "ana@example.com", "Ana", "pw").unwrap();
    store
}

fn sub<'a>(m: &'a clap::ArgMatches, name: &str) -> &'a clap::ArgMatches {
    match m.subcommand() {
        Some((n, s)) if n == name => s,
        _ => panic!("no {} subcommand", name),
    }
}

fn stored_tx(id: &str, date: NaiveDate, amount: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        date,
        description: format!("tx {}", id),
        amount: Decimal::from(amount),
        kind: TransactionKind::Expense,
        category: "Inventory".to_string(),
    }
}

#[test]
fn tx_add_records_a_transaction() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from([
        "kasbook",
        "tx",
        "add",
        "--date",
        "2024-06-01",
        "--description",
        "Coffee beans",
        "--amount",
        "150000",
        "--kind",
        "expense",
        "--category",
        "Inventory",
    ]);
    commands::transactions::handle(&store, sub(&matches, "tx")).unwrap();

    let user = auth::current_user(&store).unwrap().unwrap();
    let snapshot = store::load_snapshot(&store, &user.id).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].description, "Coffee beans");
    assert_eq!(snapshot[0].amount, Decimal::from(150000));
    assert_eq!(snapshot[0].kind, TransactionKind::Expense);
    assert_eq!(
        snapshot[0].date,
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    );
}

#[test]
fn tx_add_requires_a_session() {
    let store = SqliteStore::in_memory().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "kasbook",
        "tx",
        "add",
        "--description",
        "Coffee beans",
        "--amount",
        "100",
        "--kind",
        "expense",
        "--category",
        "Inventory",
    ]);
    assert!(commands::transactions::handle(&store, sub(&matches, "tx")).is_err());
}

#[test]
fn tx_add_rejects_an_unknown_category() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from([
        "kasbook",
        "tx",
        "add",
        "--description",
        "Oops",
        "--amount",
        "100",
        "--kind",
        "income",
        "--category",
        "Rent",
    ]);
    assert!(commands::transactions::handle(&store, sub(&matches, "tx")).is_err());
}

#[test]
fn tx_edit_changes_the_named_fields() {
    let store = setup();
    let user = auth::current_user(&store).unwrap().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    store::save_snapshot(&store, &user.id, &[stored_tx("t1", date, 100)]).unwrap();

    let matches = cli::build_cli().get_matches_from([
        "kasbook", "tx", "edit", "t1", "--amount", "250", "--category", "Rent",
    ]);
    commands::transactions::handle(&store, sub(&matches, "tx")).unwrap();

    let snapshot = store::load_snapshot(&store, &user.id).unwrap();
    assert_eq!(snapshot[0].amount, Decimal::from(250));
    assert_eq!(snapshot[0].category, "Rent");
    assert_eq!(snapshot[0].description, "tx t1");
}

#[test]
fn tx_rm_deletes_with_yes() {
    let store = setup();
    let user = auth::current_user(&store).unwrap().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    store::save_snapshot(
        &store,
        &user.id,
        &[stored_tx("t1", date, 100), stored_tx("t2", date, 200)],
    )
    .unwrap();

    let matches = cli::build_cli().get_matches_from(["kasbook", "tx", "rm", "t1", "--yes"]);
    commands::transactions::handle(&store, sub(&matches, "tx")).unwrap();

    let snapshot = store::load_snapshot(&store, &user.id).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, "t2");
}

#[test]
fn export_csv_is_chronological() {
    let store = setup();
    let user = auth::current_user(&store).unwrap().unwrap();
    store::save_snapshot(
        &store,
        &user.id,
        &[
            stored_tx("t1", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 100),
            stored_tx("t2", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 50),
        ],
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.csv");
    let matches = cli::build_cli().get_matches_from([
        "kasbook",
        "export",
        "--format",
        "csv",
        "--out",
        out.to_str().unwrap(),
    ]);
    commands::exporter::handle(&store, sub(&matches, "export")).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines[0],
        "date,description,kind,category,amount,running_balance"
    );
    assert!(lines[1].starts_with("2024-01-01"));
    assert!(lines[2].starts_with("2024-01-02"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn export_json_carries_running_balances() {
    let store = setup();
    let user = auth::current_user(&store).unwrap().unwrap();
    store::save_snapshot(
        &store,
        &user.id,
        &[
            stored_tx("t1", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 100),
            stored_tx("t2", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 50),
        ],
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.json");
    let matches = cli::build_cli().get_matches_from([
        "kasbook",
        "export",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
    ]);
    commands::exporter::handle(&store, sub(&matches, "export")).unwrap();

    let items: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["date"], "2024-01-01");
    // Decimal serializes as a string.
    assert_eq!(items[0]["running_balance"], "-50");
    assert_eq!(items[1]["running_balance"], "-150");
}

#[test]
fn export_rejects_an_unknown_format() {
    let store = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.xml");
    let matches = cli::build_cli().get_matches_from([
        "kasbook",
        "export",
        "--format",
        "xml",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(commands::exporter::handle(&store, sub(&matches, "export")).is_err());
}

#[test]
fn reset_with_yes_clears_the_ledger() {
    let store = setup();
    let user = auth::current_user(&store).unwrap().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    store::save_snapshot(&store, &user.id, &[stored_tx("t1", date, 100)]).unwrap();

    let matches = cli::build_cli().get_matches_from(["kasbook", "reset", "--yes"]);
    commands::reset::handle(&store, sub(&matches, "reset")).unwrap();

    assert!(store::load_snapshot(&store, &user.id).unwrap().is_empty());
}

#[test]
fn config_set_key_is_retrievable() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from(["kasbook", "config", "set-key", "abc123"]);
    commands::config::handle(&store, sub(&matches, "config")).unwrap();
    assert_eq!(
        store::get_setting(&store, "api-key").unwrap().as_deref(),
        Some("abc123")
    );
}
