use serde::Serialize;

// One dashboard row: a position joined with its live quote. Absent pricing
// serializes as null and must never block the rest of the page.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingRow {
    pub symbol: String,
    pub buy_price: f64,
    pub quantity: i64,
    pub purchase_date: chrono::DateTime<chrono::Utc>,
    pub current_price: Option<f64>,
    pub profit_loss: Option<f64>,
    pub profit_loss_pct: Option<f64>,
}
