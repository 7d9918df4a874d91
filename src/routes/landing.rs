use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_sessions::Session;
use tracing::info;

use crate::errors::AppError;
use crate::session::{self, SessionUser};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(landing))
}

#[derive(Serialize)]
struct LandingView {
    message: &'static str,
    flash: Option<String>,
    user: Option<SessionUser>,
}

// Safe target for every auth failure redirect; shows the pending notice once.
async fn landing(session: Session) -> Result<Json<LandingView>, AppError> {
    info!("GET / - Landing page");
    let flash = session::take_flash(&session).await?;
    let user = session::current_user(&session).await?;

    Ok(Json(LandingView {
        message: "Stockfolio is running",
        flash,
        user,
    }))
}
