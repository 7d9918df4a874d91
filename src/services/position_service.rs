use mongodb::Database;
use tracing::info;

use crate::db;
use crate::errors::{AppError, ValidationError};
use crate::models::{AddStockForm, NewPosition, Position};

pub fn validate_new_position(
    symbol: &str,
    buy_price: &str,
    quantity: &str,
) -> Result<NewPosition, ValidationError> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }

    let buy_price: f64 = buy_price
        .trim()
        .parse()
        .map_err(|_| ValidationError::Malformed { field: "buy price" })?;
    if !buy_price.is_finite() {
        return Err(ValidationError::Malformed { field: "buy price" });
    }
    if buy_price <= 0.0 {
        return Err(ValidationError::OutOfRange { field: "buy price" });
    }

    // Whole shares only; "2.5" is malformed, not out of range.
    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| ValidationError::Malformed { field: "quantity" })?;
    if quantity <= 0 {
        return Err(ValidationError::OutOfRange { field: "quantity" });
    }

    Ok(NewPosition {
        symbol,
        buy_price,
        quantity,
    })
}

// Appends one purchase lot. Validation runs before anything touches the
// store, so a rejected form persists nothing.
pub async fn add(
    db: &Database,
    owner_email: &str,
    form: AddStockForm,
) -> Result<Position, AppError> {
    let lot = validate_new_position(&form.symbol, &form.buy_price, &form.quantity)?;
    let position = Position::new(owner_email.to_string(), lot);
    db::position_queries::insert(db, &position).await?;
    info!(
        "Added {} x{} @ {} for {}",
        position.symbol, position.quantity, position.buy_price, owner_email
    );
    Ok(position)
}

pub async fn list(db: &Database, owner_email: &str) -> Result<Vec<Position>, AppError> {
    Ok(db::position_queries::fetch_for_owner(db, owner_email).await?)
}
