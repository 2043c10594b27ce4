// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential schemes accepted by the request gate.
//!
//! Both schemes implement [`Authenticator`], so a route is wired to one of
//! them without the gate knowing which.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64ct::{Base64, Base64Unpadded, Encoding};

use super::token::TokenService;
use super::AuthError;
use crate::models::User;
use crate::storage::UserStore;

const BEARER_PREFIX: &str = "bearer ";
const BASIC_PREFIX: &str = "basic ";

/// Turns the headers of a request into an authenticated user.
#[async_trait]
pub trait Authenticator: Clone + Send + Sync + 'static {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<User, AuthError>;
}

/// Return the credential after a case-insensitive `prefix` in the
/// `Authorization` header.
///
/// An absent header or a different scheme yields `missing`. A header that
/// is present but not visible ASCII is `Unauthorized`.
fn credential_after<'a>(
    headers: &'a HeaderMap,
    prefix: &str,
    missing: AuthError,
) -> Result<&'a str, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(missing);
    };
    let value = value.to_str().map_err(|_| {
        tracing::debug!("authorization header is not visible ASCII");
        AuthError::Unauthorized
    })?;

    match value.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Ok(&value[prefix.len()..]),
        _ => Err(missing),
    }
}

// =============================================================================
// Bearer Token Scheme
// =============================================================================

/// `Authorization: Bearer <jwt>`, verified against the server secret.
#[derive(Clone)]
pub struct BearerAuth {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl BearerAuth {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl Authenticator for BearerAuth {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<User, AuthError> {
        let token = credential_after(headers, BEARER_PREFIX, AuthError::MissingBearerToken)?;

        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(reason = %e, "rejected bearer token");
            AuthError::Unauthorized
        })?;

        match self.users.find_by_user_name(&claims.sub).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!(subject = %claims.sub, "token subject has no matching user");
                Err(AuthError::Unauthorized)
            }
        }
    }
}

// =============================================================================
// Basic Credential Scheme (legacy)
// =============================================================================

/// `Authorization: Basic <base64(user_name:password)>`.
///
/// The presented password is compared to the stored value as plaintext,
/// not through the bcrypt check the login flow uses. Against bcrypt-hashed
/// records this only matches if the client sends the hash itself.
#[derive(Clone)]
pub struct BasicAuth {
    users: Arc<dyn UserStore>,
}

impl BasicAuth {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

/// Decode `base64(user_name:password)`, splitting on the first `:`.
///
/// Padding is optional.
fn decode_basic(encoded: &str) -> Option<(String, String)> {
    let bytes = Base64::decode_vec(encoded)
        .or_else(|_| Base64Unpadded::decode_vec(encoded))
        .ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let (user_name, password) = decoded.split_once(':')?;
    if user_name.is_empty() || password.is_empty() {
        return None;
    }
    Some((user_name.to_string(), password.to_string()))
}

#[async_trait]
impl Authenticator for BasicAuth {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<User, AuthError> {
        let encoded = credential_after(headers, BASIC_PREFIX, AuthError::MissingBasicToken)?;
        let (user_name, password) = decode_basic(encoded).ok_or(AuthError::Unauthorized)?;

        let Some(user) = self.users.find_by_user_name(&user_name).await? else {
            tracing::debug!(%user_name, "basic credential names no user");
            return Err(AuthError::Unauthorized);
        };

        if user.password != password {
            tracing::debug!(%user_name, "basic credential password mismatch");
            return Err(AuthError::Unauthorized);
        }

        Ok(user)
    }
}
