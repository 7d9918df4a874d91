use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

// One recorded purchase lot. Repeated buys of the same symbol are separate
// documents; lots are never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_email: String,
    pub symbol: String,
    pub buy_price: f64,
    pub quantity: i64,
    pub purchase_date: DateTime,
}

impl Position {
    pub fn new(user_email: String, lot: NewPosition) -> Self {
        Self {
            id: None,
            user_email,
            symbol: lot.symbol,
            buy_price: lot.buy_price,
            quantity: lot.quantity,
            purchase_date: DateTime::now(),
        }
    }
}

// Validated output of the stock-add form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPosition {
    pub symbol: String,
    pub buy_price: f64,
    pub quantity: i64,
}

// Raw stock-add form. Numeric fields stay strings so malformed input reaches
// validation instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct AddStockForm {
    pub symbol: String,
    pub buy_price: String,
    pub quantity: String,
}

#[derive(Debug, Serialize)]
pub struct PositionView {
    pub symbol: String,
    pub buy_price: f64,
    pub quantity: i64,
    pub purchase_date: chrono::DateTime<chrono::Utc>,
}

impl From<&Position> for PositionView {
    fn from(position: &Position) -> Self {
        Self {
            symbol: position.symbol.clone(),
            buy_price: position.buy_price,
            quantity: position.quantity,
            purchase_date: position.purchase_date.to_chrono(),
        }
    }
}
