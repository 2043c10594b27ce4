// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::storage::StoreError;

/// Rejection produced by the request gate.
///
/// Every credential failure after the header check collapses into
/// [`AuthError::Unauthorized`], so a client cannot tell a bad signature
/// from an unknown user or a wrong password.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization: Bearer ...` header
    #[error("Missing bearer token")]
    MissingBearerToken,

    /// No `Authorization: Basic ...` header
    #[error("Missing Basic token")]
    MissingBasicToken,

    /// Credential present but not acceptable
    #[error("Unauthorized request")]
    Unauthorized,

    /// Credential store failed while checking the credential
    #[error("credential store unavailable: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingBearerToken
            | AuthError::MissingBasicToken
            | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(cause) => ApiError::internal(cause),
            other => ApiError::new(other.status_code(), other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AuthError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_tokens_name_their_scheme() {
        let (status, body) = body_of(AuthError::MissingBearerToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Missing bearer token");

        let (status, body) = body_of(AuthError::MissingBasicToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Missing Basic token");
    }

    #[tokio::test]
    async fn unauthorized_returns_401() {
        let (status, body) = body_of(AuthError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Unauthorized request");
    }

    #[tokio::test]
    async fn store_failure_returns_500_without_detail() {
        let cause = StoreError::Conflict("user x".into());
        let (status, body) = body_of(AuthError::Store(cause)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], crate::error::INTERNAL_ERROR_MESSAGE);
    }
}
