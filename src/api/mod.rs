// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_auth, BasicAuth, BearerAuth},
    config::AuthScheme,
    models::{
        CreateReviewRequest, LoginRequest, LoginResponse, ReviewResponse, ThingResponse,
        UserSummary,
    },
    state::AppState,
};

pub mod auth;
pub mod extract;
pub mod health;
pub mod reviews;
pub mod things;

/// Build the application router.
///
/// `scheme` selects the credential scheme guarding the protected routes.
pub fn router(state: AppState, scheme: AuthScheme) -> Router {
    let protected = Router::new()
        .route("/things/{thing_id}", get(things::get_thing))
        .route("/things/{thing_id}/reviews", get(things::list_thing_reviews))
        .route("/reviews", post(reviews::create_review));

    let protected = match scheme {
        AuthScheme::Bearer => protected.route_layer(from_fn_with_state(
            state.bearer_auth(),
            require_auth::<BearerAuth>,
        )),
        AuthScheme::Basic => protected.route_layer(from_fn_with_state(
            state.basic_auth(),
            require_auth::<BasicAuth>,
        )),
    };

    let api_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/things", get(things::list_things))
        .merge(protected)
        .with_state(state);

    Router::new()
        .route("/health", get(health::liveness))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        auth::login,
        things::list_things,
        things::get_thing,
        things::list_thing_reviews,
        reviews::create_review
    ),
    components(
        schemas(
            health::HealthResponse,
            LoginRequest,
            LoginResponse,
            ThingResponse,
            ReviewResponse,
            UserSummary,
            CreateReviewRequest
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Auth", description = "Login and session tokens"),
        (name = "Things", description = "User-submitted things"),
        (name = "Reviews", description = "Reviews of things")
    )
)]
struct ApiDoc;
