use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    #[error("quote api key is not configured")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no price data in response")]
    NoData,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_last_price(&self, symbol: &str) -> Result<f64, QuoteError>;
}
