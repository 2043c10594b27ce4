// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store.
//!
//! Data lives for the lifetime of the process. Ids are assigned
//! sequentially per collection starting at 1.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, ThingStore, UserStore};
use crate::models::{NewReview, NewThing, NewUser, Review, Thing, User};

#[derive(Default)]
struct Collections {
    users: BTreeMap<u64, User>,
    things: BTreeMap<u64, Thing>,
    reviews: BTreeMap<u64, Review>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id<V>(map: &BTreeMap<u64, V>) -> u64 {
    map.keys().next_back().map_or(1, |last| last + 1)
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_user_name(&self, user_name: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| user.user_name == user_name)
            .cloned())
    }

    async fn find_by_id(&self, id: u64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.user_name == user.user_name) {
            return Err(StoreError::Conflict(format!("user {}", user.user_name)));
        }

        let id = next_id(&inner.users);
        let user = User {
            id,
            user_name: user.user_name,
            full_name: user.full_name,
            nickname: user.nickname,
            password: user.password,
            date_created: Utc::now(),
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ThingStore for InMemoryStore {
    async fn list_things(&self) -> StoreResult<Vec<Thing>> {
        Ok(self.inner.read().await.things.values().cloned().collect())
    }

    async fn find_thing(&self, id: u64) -> StoreResult<Option<Thing>> {
        Ok(self.inner.read().await.things.get(&id).cloned())
    }

    async fn insert_thing(&self, thing: NewThing) -> StoreResult<Thing> {
        let mut inner = self.inner.write().await;
        let id = next_id(&inner.things);
        let thing = Thing {
            id,
            title: thing.title,
            image: thing.image,
            content: thing.content,
            date_created: Utc::now(),
            user_id: thing.user_id,
        };
        inner.things.insert(id, thing.clone());
        Ok(thing)
    }

    async fn reviews_for_thing(&self, thing_id: u64) -> StoreResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .values()
            .filter(|review| review.thing_id == thing_id)
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: NewReview) -> StoreResult<Review> {
        let mut inner = self.inner.write().await;
        let id = next_id(&inner.reviews);
        let review = Review {
            id,
            text: review.text,
            rating: review.rating,
            date_created: Utc::now(),
            thing_id: review.thing_id,
            user_id: review.user_id,
        };
        inner.reviews.insert(id, review.clone());
        Ok(review)
    }
}
