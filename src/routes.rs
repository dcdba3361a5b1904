// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{answer, authentication, cache, challenge, course_group, user},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Mounts every resource under `/api`.
/// * Protects the current-user and cache routes with the JWT middleware.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:4200"),
            HeaderValue::from_static("http://127.0.0.1:4200"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let answer_routes = Router::new()
        .route("/", post(answer::save))
        .route("/{id}", get(answer::get));

    let user_routes = Router::new()
        .route("/", post(user::save))
        // Protected user routes
        .merge(
            Router::new()
                .route("/me", get(user::me))
                .route_layer(auth.clone()),
        );

    let challenge_routes = Router::new()
        .route("/", get(challenge::list))
        .route("/{id}", get(challenge::get));

    let cache_routes = Router::new()
        .route("/", delete(cache::flush))
        .route("/{key}", delete(cache::remove))
        .route_layer(auth);

    Router::new()
        .nest("/api/answers", answer_routes)
        .route("/api/authentications", post(authentication::save))
        .nest("/api/users", user_routes)
        .route("/api/course-groups", get(course_group::list))
        .nest("/api/challenges", challenge_routes)
        .nest("/api/cache", cache_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
