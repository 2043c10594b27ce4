// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded database backed by redb (pure Rust, ACID).
//!
//! Records are stored as JSON bytes. Users are keyed by `user_name` so the
//! credential lookup on every gated request is a single point read; the
//! `user_ids` table maps ids back to names and doubles as the id sequence.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;

use super::{StoreError, StoreResult, ThingStore, UserStore};
use crate::models::{NewReview, NewThing, NewUser, Review, Thing, User};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary user table: user_name → serialized User (JSON bytes).
const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Reverse index: user id → user_name.
const USER_IDS: TableDefinition<u64, &str> = TableDefinition::new("user_ids");

const THINGS: TableDefinition<u64, &[u8]> = TableDefinition::new("things");

const REVIEWS: TableDefinition<u64, &[u8]> = TableDefinition::new("reviews");

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StoreResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

// =============================================================================
// Database
// =============================================================================

pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = redb::Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(USERS)?;
            write_txn.open_table(USER_IDS)?;
            write_txn.open_table(THINGS)?;
            write_txn.open_table(REVIEWS)?;
        }
        write_txn.commit()?;

        tracing::info!(path = %path.display(), "opened database");
        Ok(Self { db })
    }

    fn get_record<T: DeserializeOwned>(
        &self,
        definition: TableDefinition<'static, u64, &'static [u8]>,
        id: u64,
    ) -> StoreResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition)?;
        let value = table.get(id)?;
        let record = match value {
            Some(bytes) => Some(decode(bytes.value())?),
            None => None,
        };
        Ok(record)
    }

    fn scan_records<T: DeserializeOwned>(
        &self,
        definition: TableDefinition<'static, u64, &'static [u8]>,
        mut keep: impl FnMut(&T) -> bool,
    ) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition)?;
        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let record: T = decode(value.value())?;
            if keep(&record) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Insert a record under the next free id, built by `build`.
    fn append_record<T: serde::Serialize>(
        &self,
        definition: TableDefinition<'static, u64, &'static [u8]>,
        build: impl FnOnce(u64) -> T,
    ) -> StoreResult<T> {
        let write_txn = self.db.begin_write()?;
        let record = {
            let mut table = write_txn.open_table(definition)?;
            let id = table.last()?.map_or(0, |(key, _)| key.value()) + 1;
            let record = build(id);
            let json = serde_json::to_vec(&record)?;
            table.insert(id, json.as_slice())?;
            record
        };
        write_txn.commit()?;
        Ok(record)
    }
}

#[async_trait]
impl UserStore for Database {
    async fn find_by_user_name(&self, user_name: &str) -> StoreResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        let value = table.get(user_name)?;
        let user = match value {
            Some(bytes) => Some(decode(bytes.value())?),
            None => None,
        };
        Ok(user)
    }

    async fn find_by_id(&self, id: u64) -> StoreResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let ids = read_txn.open_table(USER_IDS)?;
        let users = read_txn.open_table(USERS)?;

        let name = ids.get(id)?.map(|guard| guard.value().to_string());
        let Some(name) = name else {
            return Ok(None);
        };
        let value = users.get(name.as_str())?;
        let user = match value {
            Some(bytes) => Some(decode(bytes.value())?),
            None => None,
        };
        Ok(user)
    }

    async fn insert_user(&self, new_user: NewUser) -> StoreResult<User> {
        let write_txn = self.db.begin_write()?;
        let user = {
            let mut users = write_txn.open_table(USERS)?;
            let mut ids = write_txn.open_table(USER_IDS)?;

            if users.get(new_user.user_name.as_str())?.is_some() {
                return Err(StoreError::Conflict(format!("user {}", new_user.user_name)));
            }

            let id = ids.last()?.map_or(0, |(key, _)| key.value()) + 1;
            let user = User {
                id,
                user_name: new_user.user_name,
                full_name: new_user.full_name,
                nickname: new_user.nickname,
                password: new_user.password,
                date_created: Utc::now(),
            };
            let json = serde_json::to_vec(&user)?;
            users.insert(user.user_name.as_str(), json.as_slice())?;
            ids.insert(id, user.user_name.as_str())?;
            user
        };
        write_txn.commit()?;
        Ok(user)
    }
}

#[async_trait]
impl ThingStore for Database {
    async fn list_things(&self) -> StoreResult<Vec<Thing>> {
        self.scan_records(THINGS, |_: &Thing| true)
    }

    async fn find_thing(&self, id: u64) -> StoreResult<Option<Thing>> {
        self.get_record(THINGS, id)
    }

    async fn insert_thing(&self, thing: NewThing) -> StoreResult<Thing> {
        self.append_record(THINGS, |id| Thing {
            id,
            title: thing.title,
            image: thing.image,
            content: thing.content,
            date_created: Utc::now(),
            user_id: thing.user_id,
        })
    }

    async fn reviews_for_thing(&self, thing_id: u64) -> StoreResult<Vec<Review>> {
        self.scan_records(REVIEWS, |review: &Review| review.thing_id == thing_id)
    }

    async fn insert_review(&self, review: NewReview) -> StoreResult<Review> {
        self.append_record(REVIEWS, |id| Review {
            id,
            text: review.text,
            rating: review.rating,
            date_created: Utc::now(),
            thing_id: review.thing_id,
            user_id: review.user_id,
        })
    }
}
