// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use kasbook::insight::{self, InsightClient, InsightError, API_KEY_SETTING};
use kasbook::models::{InsightStatus, Transaction, TransactionKind};
use kasbook::store::{self, SqliteStore};

fn sample_tx() -> Transaction {
    Transaction {
        id: "t1".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        description: "Stock refill".to_string(),
        amount: Decimal::from(150),
        kind: TransactionKind::Expense,
        category: "Inventory".to_string(),
    }
}

/// Answers exactly one request with the given JSON body, after an optional
/// delay, then closes the socket.
fn serve_once(body: &'static str, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 8192];
            let _ = stream.read(&mut buf);
            thread::sleep(delay);
            let resp = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes());
        }
    });
    format!("http://{}", addr)
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

const GOOD_BODY: &str = r#"{"candidates":[{"content":{"parts":[{"text":"{\"status\":\"good\",\"message\":\"Healthy cash flow\",\"recommendations\":[\"Keep a reserve\"]}"}]}}]}"#;

#[test]
fn empty_collection_short_circuits_without_network() {
    let client = InsightClient::new("test-key", "test-model")
        .unwrap()
        .with_base_url(&closed_port_url());
    let got = client.analyze(&[]).unwrap();
    assert_eq!(got, insight::no_data_insight());
}

#[test]
fn transport_failure_substitutes_the_fallback() {
    let client = InsightClient::new("test-key", "test-model")
        .unwrap()
        .with_base_url(&closed_port_url())
        .with_timeout(Duration::from_secs(2))
        .unwrap();
    let txs = vec![sample_tx()];
    let got = client.analyze(&txs).unwrap();
    assert_eq!(got, insight::fallback_insight());
    // The busy flag is released after a failure too.
    let again = client.analyze(&txs).unwrap();
    assert_eq!(again, insight::fallback_insight());
}

#[test]
fn parses_the_model_response() {
    let url = serve_once(GOOD_BODY, Duration::ZERO);
    let client = InsightClient::new("test-key", "test-model")
        .unwrap()
        .with_base_url(&url);
    let got = client.analyze(&[sample_tx()]).unwrap();
    assert_eq!(got.status, InsightStatus::Good);
    assert_eq!(got.message, "Healthy cash flow");
    assert_eq!(got.recommendations, vec!["Keep a reserve".to_string()]);
}

#[test]
fn unparseable_model_payload_falls_back() {
    let url = serve_once(r#"{"candidates":[]}"#, Duration::ZERO);
    let client = InsightClient::new("test-key", "test-model")
        .unwrap()
        .with_base_url(&url);
    let got = client.analyze(&[sample_tx()]).unwrap();
    assert_eq!(got, insight::fallback_insight());
}

#[test]
fn a_second_concurrent_request_is_rejected() {
    let url = serve_once(GOOD_BODY, Duration::from_millis(500));
    let client = InsightClient::new("test-key", "test-model")
        .unwrap()
        .with_base_url(&url);
    let txs = vec![sample_tx()];
    thread::scope(|s| {
        let slow = s.spawn(|| client.analyze(&txs));
        thread::sleep(Duration::from_millis(150));
        let err = client.analyze(&txs).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InsightError>(),
            Some(InsightError::Busy)
        ));
        let first = slow.join().unwrap().unwrap();
        assert_eq!(first.message, "Healthy cash flow");
    });
}

#[test]
fn client_builds_from_a_stored_key() {
    let store = SqliteStore::in_memory().unwrap();
    store::set_setting(&store, API_KEY_SETTING, "stored-key").unwrap();
    assert!(InsightClient::from_store(&store).is_ok());
}
