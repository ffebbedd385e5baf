//! HTTP routes for the Chirpy service

pub mod admin;
pub mod chirps;
pub mod polka;
pub mod users;

use std::path::Path;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    AppState,
    middleware::{auth_middleware, metrics_inc},
};

/// Create the router for the Chirpy service
pub fn create_router(state: AppState, fileserver_root: &Path) -> Router {
    let protected_routes = Router::new()
        .route("/api/users", put(users::update_user))
        .route("/api/chirps", post(chirps::create_chirp))
        .route(
            "/api/chirps/:chirp_id",
            delete(chirps::delete_chirp),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let static_files = Router::new()
        .nest_service("/app", ServeDir::new(fileserver_root))
        .layer(middleware::from_fn_with_state(state.clone(), metrics_inc));

    Router::new()
        .route("/api/healthz", get(admin::healthz))
        .route("/api/users", post(users::create_user))
        .route("/api/login", post(users::login))
        .route("/api/refresh", post(users::refresh_token))
        .route("/api/revoke", post(users::revoke_token))
        .route("/api/chirps", get(chirps::get_chirps))
        .route("/api/chirps/:chirp_id", get(chirps::get_chirp))
        .route("/api/polka/webhooks", post(polka::polka_webhook))
        .route("/admin/metrics", get(admin::metrics))
        .route("/admin/reset", post(admin::reset))
        .merge(protected_routes)
        .merge(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
