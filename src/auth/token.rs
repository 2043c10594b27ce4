// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the server secret. Nothing is stored
//! server-side: a token is valid exactly when its signature verifies and,
//! if it carries `exp`, it has not expired.

use std::time::Duration;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, get_current_timestamp, Algorithm, DecodingKey,
    EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// The only algorithm tokens are signed or accepted with.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Payload: id of the user the token was issued to.
    pub user_id: u64,
    /// Subject: the user's `user_name`.
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: u64,
    /// Expiration (Unix seconds), only present when a lifetime is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Encode(jsonwebtoken::errors::Error),

    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token algorithm is not accepted")]
    InvalidAlgorithm,

    #[error("token is malformed: {0}")]
    Malformed(jsonwebtoken::errors::Error),
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Option<Duration>,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// - `secret`: HMAC signing secret
    /// - `expiry`: token lifetime; `None` issues tokens without `exp`
    pub fn new(secret: &[u8], expiry: Option<Duration>) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        if expiry.is_some() {
            validation.set_required_spec_claims(&["sub", "exp"]);
        } else {
            validation.set_required_spec_claims(&["sub"]);
        }
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            expiry,
        }
    }

    /// Issue a token binding `subject` to `user_id`.
    pub fn issue(&self, subject: &str, user_id: u64) -> Result<String, TokenError> {
        let iat = get_current_timestamp();
        let claims = Claims {
            user_id,
            sub: subject.to_string(),
            iat,
            exp: self.expiry.map(|ttl| iat + ttl.as_secs()),
        };
        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)
    }

    /// Verify signature, algorithm and expiry, and recover the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let mapped = match e.kind() {
                    ErrorKind::ExpiredSignature => Some(TokenError::Expired),
                    ErrorKind::InvalidSignature => Some(TokenError::InvalidSignature),
                    ErrorKind::InvalidAlgorithm => Some(TokenError::InvalidAlgorithm),
                    _ => None,
                };
                mapped.unwrap_or_else(|| TokenError::Malformed(e))
            })
    }
}
