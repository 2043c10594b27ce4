// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Stored records and the request/response structures of the REST API.
//! Response types derive `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Users**: credential records and their public projection
//! - **Things**: user-submitted items
//! - **Reviews**: ratings left on things
//! - **Auth**: login request and token response

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// User Models
// =============================================================================

/// A stored user record.
///
/// `password` holds a bcrypt hash. This type is never serialized into an
/// HTTP response; use [`UserSummary`] for that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    /// Unique login name, also the token subject.
    pub user_name: String,
    pub full_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub password: String,
    pub date_created: DateTime<Utc>,
}

/// Fields needed to insert a user. The store assigns `id` and `date_created`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub full_name: String,
    pub nickname: Option<String>,
    pub password: String,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserSummary {
    pub id: u64,
    pub user_name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub date_created: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
            full_name: user.full_name.clone(),
            nickname: user.nickname.clone(),
            date_created: user.date_created,
        }
    }
}

// =============================================================================
// Thing Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thing {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    pub content: String,
    pub date_created: DateTime<Utc>,
    /// Author of the thing.
    pub user_id: u64,
}

#[derive(Debug, Clone)]
pub struct NewThing {
    pub title: String,
    pub image: Option<String>,
    pub content: String,
    pub user_id: u64,
}

/// A thing with its author and review statistics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ThingResponse {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub content: String,
    pub date_created: DateTime<Utc>,
    /// Author, absent if the user record no longer exists.
    pub user: Option<UserSummary>,
    pub number_of_reviews: usize,
    /// Mean rating, `0.0` when there are no reviews.
    pub average_review_rating: f64,
}

// =============================================================================
// Review Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: u64,
    pub text: String,
    /// Between 1 and 5 inclusive.
    pub rating: u8,
    pub date_created: DateTime<Utc>,
    pub thing_id: u64,
    /// Author of the review.
    pub user_id: u64,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub text: String,
    pub rating: u8,
    pub thing_id: u64,
    pub user_id: u64,
}

/// Request body for `POST /api/reviews`.
///
/// Fields are optional so that a missing field can be reported by name.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub thing_id: Option<u64>,
    pub rating: Option<u8>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ReviewResponse {
    pub id: u64,
    pub text: String,
    pub rating: u8,
    pub date_created: DateTime<Utc>,
    pub thing_id: u64,
    /// Author, absent if the user record no longer exists.
    pub user: Option<UserSummary>,
}

// =============================================================================
// Auth Models
// =============================================================================

/// Request body for `POST /api/auth/login`.
///
/// `null` and absent fields are both treated as missing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LoginResponse {
    /// Signed HS256 JWT.
    pub token: String,
}
