// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for unit tests.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::auth::password::hash_password_with_cost;
use crate::auth::TokenService;
use crate::models::{NewReview, NewThing, NewUser, Review, Thing, User};
use crate::state::AppState;
use crate::storage::{InMemoryStore, ThingStore, UserStore};

pub const TEST_SECRET: &[u8] = b"test-secret";

/// Plaintext password of the bcrypt-hashed fixture users.
pub const TEST_PASSWORD: &str = "password";

/// Password stored verbatim for the legacy basic-auth fixture user.
pub const LEGACY_PASSWORD: &str = "legacy-pass";

pub struct Fixture {
    pub state: AppState,
    /// `test-user-1`, `test-user-2` (hashed), `legacy-user` (plaintext)
    pub users: Vec<User>,
    pub things: Vec<Thing>,
    pub reviews: Vec<Review>,
}

/// In-memory state seeded with users, things and reviews.
pub async fn seeded() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let hash = hash_password_with_cost(TEST_PASSWORD, 4).await.unwrap();

    let mut users = Vec::new();
    for (user_name, full_name, password) in [
        ("test-user-1", "Test user 1", hash.as_str()),
        ("test-user-2", "Test user 2", hash.as_str()),
        ("legacy-user", "Legacy user", LEGACY_PASSWORD),
    ] {
        let user = store
            .insert_user(NewUser {
                user_name: user_name.into(),
                full_name: full_name.into(),
                nickname: None,
                password: password.into(),
            })
            .await
            .unwrap();
        users.push(user);
    }

    let mut things = Vec::new();
    for (title, author) in [
        ("First test thing!", users[0].id),
        ("Second test thing!", users[1].id),
        ("Third test thing!", users[0].id),
    ] {
        let thing = store
            .insert_thing(NewThing {
                title: title.into(),
                image: Some("http://placehold.it/500x500".into()),
                content: "Lorem ipsum dolor sit amet.".into(),
                user_id: author,
            })
            .await
            .unwrap();
        things.push(thing);
    }

    let mut reviews = Vec::new();
    for (thing_id, user_id, rating) in [
        (things[0].id, users[1].id, 2),
        (things[0].id, users[0].id, 3),
        (things[1].id, users[0].id, 5),
    ] {
        let review = store
            .insert_review(NewReview {
                text: "This post is amazing".into(),
                rating,
                thing_id,
                user_id,
            })
            .await
            .unwrap();
        reviews.push(review);
    }

    let state = AppState::new(
        store.clone(),
        store,
        TokenService::new(TEST_SECRET, None),
    );

    Fixture {
        state,
        users,
        things,
        reviews,
    }
}

/// `Authorization` value for the legacy basic scheme.
pub fn basic_header(user_name: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user_name}:{password}")))
}

/// `Authorization` value carrying a freshly issued token for `user`.
pub fn bearer_header(state: &AppState, user: &User) -> String {
    let token = state.tokens.issue(&user.user_name, user.id).unwrap();
    format!("Bearer {token}")
}
