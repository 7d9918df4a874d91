use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Serialize;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{AddStockForm, PositionView};
use crate::services::position_service;
use crate::session::{self, SessionUser};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/first", get(first_stock_page).post(add_first_stock))
        .route("/add", get(add_stock_page).post(add_stock))
}

// Form context for the page a brand-new user lands on, with whatever they
// have added so far.
#[derive(Serialize)]
struct FirstStockView {
    user: SessionUser,
    new_user: bool,
    flash: Option<String>,
    positions: Vec<PositionView>,
}

async fn first_stock_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    info!("GET /stocks/first - First stock page");
    let Some(user) = session::current_user(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let positions = position_service::list(&state.db, &user.email).await?;
    let flash = session::take_flash(&session).await?;
    let new_user = session::is_new_user(&session).await?;

    Ok(Json(FirstStockView {
        user,
        new_user,
        flash,
        positions: positions.iter().map(PositionView::from).collect(),
    })
    .into_response())
}

async fn add_first_stock(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddStockForm>,
) -> Result<Response, AppError> {
    info!("POST /stocks/first - Adding first stock");
    add_and_redirect(state, session, form, "/stocks/first", "/stocks/first").await
}

#[derive(Serialize)]
struct AddStockView {
    user: SessionUser,
    flash: Option<String>,
}

async fn add_stock_page(session: Session) -> Result<Response, AppError> {
    info!("GET /stocks/add - Add stock page");
    let Some(user) = session::current_user(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let flash = session::take_flash(&session).await?;
    Ok(Json(AddStockView { user, flash }).into_response())
}

async fn add_stock(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddStockForm>,
) -> Result<Response, AppError> {
    info!("POST /stocks/add - Adding stock");
    add_and_redirect(state, session, form, "/stocks/add", "/dashboard").await
}

// Validation failures flash one generic notice and return the user to the
// posting form; nothing is persisted.
async fn add_and_redirect(
    state: AppState,
    session: Session,
    form: AddStockForm,
    form_page: &str,
    success_page: &str,
) -> Result<Response, AppError> {
    let Some(user) = session::current_user(&session).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    match position_service::add(&state.db, &user.email, form).await {
        Ok(position) => {
            session::set_flash(&session, &format!("Added {}", position.symbol)).await?;
            Ok(Redirect::to(success_page).into_response())
        }
        Err(AppError::Validation(e)) => {
            warn!("Rejected stock form for {}: {}", user.email, e);
            session::set_flash(&session, "Please enter a valid symbol, price and quantity")
                .await?;
            Ok(Redirect::to(form_page).into_response())
        }
        Err(e) => Err(e),
    }
}
