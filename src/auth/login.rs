// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Username/password login.
//!
//! Converts a `{user_name, password}` pair into a session token. An unknown
//! user and a wrong password produce the same error, so the response never
//! reveals whether a user name exists.

use std::sync::Arc;

use super::password::{verify_password, PasswordError};
use super::token::{TokenError, TokenService};
use crate::error::ApiError;
use crate::models::LoginRequest;
use crate::storage::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Missing {0} in request body")]
    MissingField(&'static str),

    #[error("Incorrect username or password")]
    IncorrectCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::MissingField(_) | LoginError::IncorrectCredentials => {
                ApiError::bad_request(err.to_string())
            }
            other => ApiError::internal(other),
        }
    }
}

#[derive(Clone)]
pub struct LoginFlow {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl LoginFlow {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Verify the credentials and issue a token for the user.
    ///
    /// Fields are checked in the order `user_name`, `password`; the first
    /// missing one is reported and the store is not consulted.
    pub async fn login(&self, request: LoginRequest) -> Result<String, LoginError> {
        let LoginRequest { user_name, password } = request;
        let user_name = user_name.ok_or(LoginError::MissingField("user_name"))?;
        let password = password.ok_or(LoginError::MissingField("password"))?;

        let Some(user) = self.users.find_by_user_name(&user_name).await? else {
            tracing::debug!(%user_name, "login for unknown user");
            return Err(LoginError::IncorrectCredentials);
        };

        if !verify_password(password, user.password.clone()).await? {
            tracing::debug!(%user_name, "login with wrong password");
            return Err(LoginError::IncorrectCredentials);
        }

        let token = self.tokens.issue(&user.user_name, user.id)?;
        tracing::info!(user_id = user.id, "user logged in");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, Fixture, TEST_PASSWORD};

    fn request(user_name: Option<&str>, password: Option<&str>) -> LoginRequest {
        LoginRequest {
            user_name: user_name.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn missing_fields_are_reported_in_order() {
        let Fixture { state, .. } = test_support::seeded().await;

        let err = state.login.login(request(None, None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing user_name in request body");

        let err = state
            .login
            .login(request(Some("test-user-1"), None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing password in request body");

        let err = state
            .login
            .login(request(None, Some(TEST_PASSWORD)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing user_name in request body");
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_look_the_same() {
        let Fixture { state, .. } = test_support::seeded().await;

        let unknown = state
            .login
            .login(request(Some("bad username"), Some("bad password")))
            .await
            .unwrap_err();
        let wrong = state
            .login
            .login(request(Some("test-user-1"), Some("wrong")))
            .await
            .unwrap_err();

        assert!(matches!(unknown, LoginError::IncorrectCredentials));
        assert!(matches!(wrong, LoginError::IncorrectCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.to_string(), "Incorrect username or password");
    }

    #[tokio::test]
    async fn valid_credentials_issue_verifiable_token() {
        let Fixture { state, users, .. } = test_support::seeded().await;

        let token = state
            .login
            .login(request(Some("test-user-1"), Some(TEST_PASSWORD)))
            .await
            .unwrap();

        let claims = state.tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, users[0].user_name);
        assert_eq!(claims.user_id, users[0].id);
    }

    #[test]
    fn client_errors_map_to_400_and_others_to_500() {
        use axum::http::StatusCode;

        let err: ApiError = LoginError::MissingField("password").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Missing password in request body");

        let err: ApiError = LoginError::IncorrectCredentials.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: ApiError = LoginError::Store(StoreError::Conflict("x".into())).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
