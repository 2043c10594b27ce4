// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};

use super::extract::JsonBody;
use super::things::{require_thing, review_response};
use crate::{
    auth::CurrentUser,
    error::ApiError,
    models::{CreateReviewRequest, NewReview, ReviewResponse},
    state::AppState,
};

fn missing(field: &str) -> ApiError {
    ApiError::bad_request(format!("Missing '{field}' in request body"))
}

/// Post a review as the authenticated user.
///
/// The review is always owned by the caller; any `user_id` in the body is
/// ignored.
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    tag = "Reviews",
    security(("bearer" = [])),
    responses(
        (status = 201, body = ReviewResponse),
        (status = 400, description = "Missing field or rating out of range"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Thing doesn't exist"),
    )
)]
pub async fn create_review(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let thing_id = request.thing_id.ok_or_else(|| missing("thing_id"))?;
    let rating = request.rating.ok_or_else(|| missing("rating"))?;
    let text = request.text.ok_or_else(|| missing("text"))?;

    if !(1..=5).contains(&rating) {
        return Err(ApiError::bad_request("rating must be between 1 and 5"));
    }

    let thing = require_thing(&state, thing_id).await?;
    let review = state
        .things
        .insert_review(NewReview {
            text,
            rating,
            thing_id: thing.id,
            user_id: user.id,
        })
        .await?;
    tracing::info!(review_id = review.id, thing_id, user_id = user.id, "review created");

    Ok((StatusCode::CREATED, Json(review_response(&state, review).await?)))
}
