// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request gate middleware for Axum.
//!
//! Wraps a router subtree so that every request must pass the configured
//! [`Authenticator`] before reaching a handler:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/things/{thing_id}", get(get_thing))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.bearer_auth(),
//!         require_auth::<BearerAuth>,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::Authenticator;

/// Authenticate the request, attach the user to its extensions and run
/// the inner service. Rejections are answered here; the handler never runs.
pub async fn require_auth<A: Authenticator>(
    State(authenticator): State<A>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticator.authenticate(request.headers()).await {
        Ok(user) => {
            tracing::debug!(user_id = user.id, path = %request.uri().path(), "request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{BasicAuth, BearerAuth, CurrentUser};
    use crate::test_support::{self, basic_header, Fixture, LEGACY_PASSWORD};
    use axum::{body::Body, body::to_bytes, http::StatusCode, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn gated_router<A: Authenticator>(gate: A, hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(move |CurrentUser(user): CurrentUser| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        user.user_name
                    }
                }),
            )
            .route_layer(axum::middleware::from_fn_with_state(gate, require_auth::<A>))
    }

    async fn call(router: Router, authorization: Option<String>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        let response = router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn missing_header_never_reaches_handler() {
        let Fixture { state, .. } = test_support::seeded().await;
        let hits = Arc::new(AtomicUsize::new(0));

        let (status, body) = call(gated_router::<BearerAuth>(state.bearer_auth(), hits.clone()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":{"message":"Missing bearer token"}}"#);

        let (status, body) = call(gated_router::<BasicAuth>(state.basic_auth(), hits.clone()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":{"message":"Missing Basic token"}}"#);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authenticated_user_is_visible_to_handler() {
        let Fixture { state, users, .. } = test_support::seeded().await;
        let hits = Arc::new(AtomicUsize::new(0));
        let token = state.tokens.issue(&users[1].user_name, users[1].id).unwrap();

        let (status, body) = call(
            gated_router(state.bearer_auth(), hits.clone()),
            Some(format!("Bearer {token}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, users[1].user_name);

        let (status, body) = call(
            gated_router(state.basic_auth(), hits.clone()),
            Some(basic_header(&users[2].user_name, LEGACY_PASSWORD)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, users[2].user_name);

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn bad_credential_is_rejected_generically() {
        let Fixture { state, .. } = test_support::seeded().await;
        let hits = Arc::new(AtomicUsize::new(0));

        let (status, body) = call(
            gated_router(state.bearer_auth(), hits.clone()),
            Some("Bearer not.a.token".to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":{"message":"Unauthorized request"}}"#);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
