// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification (bcrypt).
//!
//! bcrypt is deliberately slow, so both operations run on the blocking
//! thread pool instead of the async executor.

use tokio::task;

/// Error type for password operations.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("password task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// Hash a plaintext password with the default bcrypt cost.
pub async fn hash_password(password: impl Into<String>) -> Result<String, PasswordError> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST).await
}

/// Hash a plaintext password with an explicit cost factor.
pub async fn hash_password_with_cost(
    password: impl Into<String>,
    cost: u32,
) -> Result<String, PasswordError> {
    let password = password.into();
    let hash = task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Compare a candidate password against a stored bcrypt hash.
///
/// A stored value that is not a parseable bcrypt hash never matches.
pub async fn verify_password(
    candidate: impl Into<String>,
    stored_hash: impl Into<String>,
) -> Result<bool, PasswordError> {
    let candidate = candidate.into();
    let stored_hash = stored_hash.into();
    let outcome = task::spawn_blocking(move || bcrypt::verify(candidate, &stored_hash)).await?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash could not be parsed");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lowest cost bcrypt accepts; keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password_with_cost("password", TEST_COST).await.unwrap();
        assert_ne!(hash, "password");
        assert!(verify_password("password", hash.clone()).await.unwrap());
        assert!(!verify_password("wrong", hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let a = hash_password_with_cost("password", TEST_COST).await.unwrap();
        let b = hash_password_with_cost("password", TEST_COST).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn plaintext_stored_value_never_matches() {
        assert!(!verify_password("password", "password").await.unwrap());
    }
}
