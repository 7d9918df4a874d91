use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Json, Router};
use tower_sessions::Session;
use tracing::info;

use crate::errors::AppError;
use crate::session;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(profile))
}

async fn profile(session: Session) -> Result<Response, AppError> {
    info!("GET /users/profile - Fetching session user");
    let Some(user) = session::current_user(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    Ok(Json(user).into_response())
}
