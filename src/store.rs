// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;

use crate::db;
use crate::models::{Transaction, User};

pub const USERS_KEY: &str = "users";
pub const SESSION_KEY: &str = "session";

pub fn data_key(user_id: &str) -> String {
    format!("data/{}", user_id)
}

pub fn setting_key(name: &str) -> String {
    format!("settings/{}", name)
}

/// One value per key, overwritten wholesale on every save. The store is
/// injected everywhere it is used; nothing reaches for it as a global.
pub trait KvStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn save(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        db::init_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> Result<T> {
    match store.load(key)? {
        None => Ok(T::default()),
        Some(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(key, %err, "discarding unparseable stored value");
                Ok(T::default())
            }
        },
    }
}

pub fn load_snapshot(store: &dyn KvStore, user_id: &str) -> Result<Vec<Transaction>> {
    decode_or_default(store, &data_key(user_id))
}

pub fn save_snapshot(
    store: &dyn KvStore,
    user_id: &str,
    transactions: &[Transaction],
) -> Result<()> {
    store.save(&data_key(user_id), &serde_json::to_vec(transactions)?)
}

pub fn load_users(store: &dyn KvStore) -> Result<Vec<User>> {
    decode_or_default(store, USERS_KEY)
}

pub fn save_users(store: &dyn KvStore, users: &[User]) -> Result<()> {
    store.save(USERS_KEY, &serde_json::to_vec(users)?)
}

/// A session record that fails to parse is dropped from the store entirely,
/// so the next load starts from a clean logged-out state.
pub fn load_session(store: &dyn KvStore) -> Result<Option<User>> {
    match store.load(SESSION_KEY)? {
        None => Ok(None),
        Some(bytes) => match serde_json::from_slice(&bytes) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                tracing::warn!(%err, "discarding unparseable session record");
                store.remove(SESSION_KEY)?;
                Ok(None)
            }
        },
    }
}

pub fn save_session(store: &dyn KvStore, user: &User) -> Result<()> {
    store.save(SESSION_KEY, &serde_json::to_vec(user)?)
}

pub fn clear_session(store: &dyn KvStore) -> Result<()> {
    store.remove(SESSION_KEY)
}

pub fn get_setting(store: &dyn KvStore, name: &str) -> Result<Option<String>> {
    match store.load(&setting_key(name))? {
        None => Ok(None),
        Some(bytes) => match String::from_utf8(bytes) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(name, %err, "discarding non-utf8 setting value");
                Ok(None)
            }
        },
    }
}

pub fn set_setting(store: &dyn KvStore, name: &str, value: &str) -> Result<()> {
    store.save(&setting_key(name), value.as_bytes())
}
