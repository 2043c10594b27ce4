// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Keyed access to users, things and reviews. Handlers and the auth core
//! only see the [`UserStore`] and [`ThingStore`] traits; the backend is
//! chosen at startup.
//!
//! ## Backends
//!
//! - [`InMemoryStore`] - process-local maps, used when no database path is
//!   configured and throughout the tests
//! - [`Database`] - embedded redb file (pure Rust, ACID)
//!
//! ## Table Layout (redb)
//!
//! ```text
//! users         user_name -> User (JSON)
//! user_ids      id        -> user_name
//! things        id        -> Thing (JSON)
//! reviews       id        -> Review (JSON)
//! ```

pub mod database;
pub mod memory;

use async_trait::async_trait;

use crate::models::{NewReview, NewThing, NewUser, Review, Thing, User};

pub use database::Database;
pub use memory::InMemoryStore;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("already exists: {0}")]
    Conflict(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store consulted by the login flow and the request gate.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by login name.
    async fn find_by_user_name(&self, user_name: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: u64) -> StoreResult<Option<User>>;

    /// Insert a user, failing with [`StoreError::Conflict`] if the name is taken.
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
}

/// Things and their reviews.
#[async_trait]
pub trait ThingStore: Send + Sync {
    /// All things, ordered by id.
    async fn list_things(&self) -> StoreResult<Vec<Thing>>;

    async fn find_thing(&self, id: u64) -> StoreResult<Option<Thing>>;

    async fn insert_thing(&self, thing: NewThing) -> StoreResult<Thing>;

    /// Reviews of one thing, ordered by id.
    async fn reviews_for_thing(&self, thing_id: u64) -> StoreResult<Vec<Review>>;

    async fn insert_review(&self, review: NewReview) -> StoreResult<Review>;
}
