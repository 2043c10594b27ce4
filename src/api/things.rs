// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::ApiError,
    models::{Review, ReviewResponse, Thing, ThingResponse, UserSummary},
    state::AppState,
};

pub const THING_NOT_FOUND: &str = "Thing doesn't exist";

/// Load a thing or fail with 404.
pub(crate) async fn require_thing(state: &AppState, thing_id: u64) -> Result<Thing, ApiError> {
    state
        .things
        .find_thing(thing_id)
        .await?
        .ok_or_else(|| ApiError::not_found(THING_NOT_FOUND))
}

async fn author_of(state: &AppState, user_id: u64) -> Result<Option<UserSummary>, ApiError> {
    let user = state.users.find_by_id(user_id).await?;
    Ok(user.as_ref().map(UserSummary::from))
}

async fn thing_response(state: &AppState, thing: Thing) -> Result<ThingResponse, ApiError> {
    let user = author_of(state, thing.user_id).await?;
    let reviews = state.things.reviews_for_thing(thing.id).await?;
    let number_of_reviews = reviews.len();
    let average_review_rating = if reviews.is_empty() {
        0.0
    } else {
        let total: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
        f64::from(total) / number_of_reviews as f64
    };

    Ok(ThingResponse {
        id: thing.id,
        title: thing.title,
        image: thing.image,
        content: thing.content,
        date_created: thing.date_created,
        user,
        number_of_reviews,
        average_review_rating,
    })
}

pub(crate) async fn review_response(
    state: &AppState,
    review: Review,
) -> Result<ReviewResponse, ApiError> {
    let user = author_of(state, review.user_id).await?;
    Ok(ReviewResponse {
        id: review.id,
        text: review.text,
        rating: review.rating,
        date_created: review.date_created,
        thing_id: review.thing_id,
        user,
    })
}

#[utoipa::path(
    get,
    path = "/api/things",
    tag = "Things",
    responses((status = 200, body = [ThingResponse]))
)]
pub async fn list_things(
    State(state): State<AppState>,
) -> Result<Json<Vec<ThingResponse>>, ApiError> {
    let things = state.things.list_things().await?;
    let mut responses = Vec::with_capacity(things.len());
    for thing in things {
        responses.push(thing_response(&state, thing).await?);
    }
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/things/{thing_id}",
    params(
        ("thing_id" = u64, Path, description = "Identifier of the thing")
    ),
    tag = "Things",
    security(("bearer" = [])),
    responses(
        (status = 200, body = ThingResponse),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Thing doesn't exist"),
    )
)]
pub async fn get_thing(
    Path(thing_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<ThingResponse>, ApiError> {
    let thing = require_thing(&state, thing_id).await?;
    Ok(Json(thing_response(&state, thing).await?))
}

#[utoipa::path(
    get,
    path = "/api/things/{thing_id}/reviews",
    params(
        ("thing_id" = u64, Path, description = "Identifier of the thing")
    ),
    tag = "Things",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [ReviewResponse]),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Thing doesn't exist"),
    )
)]
pub async fn list_thing_reviews(
    Path(thing_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let thing = require_thing(&state, thing_id).await?;
    let reviews = state.things.reviews_for_thing(thing.id).await?;
    let mut responses = Vec::with_capacity(reviews.len());
    for review in reviews {
        responses.push(review_response(&state, review).await?);
    }
    Ok(Json(responses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, Fixture};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn list_things_includes_author_and_review_stats() {
        let Fixture { state, users, things, .. } = test_support::seeded().await;

        let Json(listed) = list_things(State(state)).await.expect("listing succeeds");
        assert_eq!(listed.len(), things.len());

        let first = &listed[0];
        assert_eq!(first.id, things[0].id);
        assert_eq!(first.user.as_ref().map(|u| u.id), Some(users[0].id));
        assert_eq!(first.number_of_reviews, 2);
        assert!((first.average_review_rating - 2.5).abs() < f64::EPSILON);

        let third = &listed[2];
        assert_eq!(third.number_of_reviews, 0);
        assert_eq!(third.average_review_rating, 0.0);
    }

    #[tokio::test]
    async fn get_thing_returns_404_for_unknown_id() {
        let Fixture { state, .. } = test_support::seeded().await;

        let err = get_thing(Path(123456), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, THING_NOT_FOUND);
    }

    #[tokio::test]
    async fn list_thing_reviews_returns_only_that_thing() {
        let Fixture { state, things, reviews, .. } = test_support::seeded().await;

        let Json(listed) = list_thing_reviews(Path(things[0].id), State(state))
            .await
            .expect("listing succeeds");
        let ids: Vec<u64> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![reviews[0].id, reviews[1].id]);
        assert!(listed.iter().all(|r| r.user.is_some()));
    }
}
