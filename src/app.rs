use axum::Router;
use tower_http::cors::CorsLayer;
use tower_sessions::service::SignedCookie;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::routes::{auth, dashboard, health, landing, stocks, users};
use crate::state::AppState;

pub fn create_app(
    state: AppState,
    sessions: SessionManagerLayer<MemoryStore, SignedCookie>,
) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/auth", auth::router())
        .nest("/stocks", stocks::router())
        .nest("/dashboard", dashboard::router())
        .nest("/users", users::router())
        .merge(landing::router())
        .layer(sessions)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
