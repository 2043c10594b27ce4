// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint.

use axum::{extract::State, Json};

use super::extract::JsonBody;
use crate::{
    error::ApiError,
    models::{LoginRequest, LoginResponse},
    state::AppState,
};

/// Exchange a user name and password for a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Signed session token", body = LoginResponse),
        (status = 400, description = "Missing field, or incorrect user name or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.login.login(request).await?;
    Ok(Json(LoginResponse { token }))
}
