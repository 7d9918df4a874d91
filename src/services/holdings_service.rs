use mongodb::Database;

use crate::errors::AppError;
use crate::external::quote_provider::QuoteProvider;
use crate::models::{HoldingRow, Position};
use crate::services::{position_service, quote_service};

// Joins the owner's positions with live quotes, one blocking call per
// position. An owner without any account record simply yields no rows.
pub async fn build_holdings(
    db: &Database,
    quotes: &dyn QuoteProvider,
    owner_email: &str,
) -> Result<Vec<HoldingRow>, AppError> {
    let positions = position_service::list(db, owner_email).await?;

    let mut rows = Vec::with_capacity(positions.len());
    for position in positions {
        let current_price = quote_service::last_price(quotes, &position.symbol).await;
        rows.push(holding_row(&position, current_price));
    }

    Ok(rows)
}

// Monetary figures are rounded to 2 decimal places for display only; the
// stored position keeps the submitted precision.
fn holding_row(position: &Position, current_price: Option<f64>) -> HoldingRow {
    let profit_loss = current_price
        .map(|price| round2((price - position.buy_price) * position.quantity as f64));

    let profit_loss_pct = match current_price {
        // Guards the divide by zero a dangling record could carry.
        Some(price) if position.buy_price != 0.0 => {
            Some(round2((price - position.buy_price) / position.buy_price * 100.0))
        }
        _ => None,
    };

    HoldingRow {
        symbol: position.symbol.clone(),
        buy_price: position.buy_price,
        quantity: position.quantity,
        purchase_date: position.purchase_date.to_chrono(),
        current_price: current_price.map(round2),
        profit_loss,
        profit_loss_pct,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPosition;

    fn position(buy_price: f64, quantity: i64) -> Position {
        Position::new(
            "ada@example.com".to_string(),
            NewPosition {
                symbol: "AAPL".to_string(),
                buy_price,
                quantity,
            },
        )
    }

    #[test]
    fn computes_profit_and_loss() {
        let row = holding_row(&position(100.0, 10), Some(120.0));

        assert_eq!(row.current_price, Some(120.0));
        assert_eq!(row.profit_loss, Some(200.0));
        assert_eq!(row.profit_loss_pct, Some(20.0));
    }

    #[test]
    fn computes_a_loss() {
        let row = holding_row(&position(50.0, 4), Some(42.5));

        assert_eq!(row.profit_loss, Some(-30.0));
        assert_eq!(row.profit_loss_pct, Some(-15.0));
    }

    #[test]
    fn rounds_to_two_decimal_places() {
        let row = holding_row(&position(3.0, 3), Some(3.3333));

        assert_eq!(row.current_price, Some(3.33));
        assert_eq!(row.profit_loss, Some(1.0));
        assert_eq!(row.profit_loss_pct, Some(11.11));
    }

    #[test]
    fn missing_quote_leaves_every_derived_field_absent() {
        let row = holding_row(&position(100.0, 10), None);

        assert_eq!(row.current_price, None);
        assert_eq!(row.profit_loss, None);
        assert_eq!(row.profit_loss_pct, None);
    }

    #[test]
    fn zero_buy_price_never_divides() {
        let row = holding_row(&position(0.0, 10), Some(120.0));

        // The absolute figure is still defined; the percentage is not.
        assert_eq!(row.profit_loss, Some(1200.0));
        assert_eq!(row.profit_loss_pct, None);
    }
}
