use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_sessions::Session;
use tracing::info;

use crate::errors::AppError;
use crate::models::HoldingRow;
use crate::services::holdings_service;
use crate::session::{self, SessionUser};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

#[derive(Serialize)]
struct DashboardView {
    user: SessionUser,
    flash: Option<String>,
    holdings: Vec<HoldingRow>,
}

async fn dashboard(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    info!("GET /dashboard - Rendering dashboard");
    let Some(user) = session::current_user(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let holdings =
        holdings_service::build_holdings(&state.db, state.quotes.as_ref(), &user.email).await?;
    let flash = session::take_flash(&session).await?;

    Ok(Json(DashboardView {
        user,
        flash,
        holdings,
    })
    .into_response())
}
