use tracing::warn;

use crate::external::quote_provider::QuoteProvider;

// The only place quote failures are observed. Every error becomes "no
// pricing data" for the caller; display paths tolerate None everywhere.
pub async fn last_price(provider: &dyn QuoteProvider, symbol: &str) -> Option<f64> {
    match provider.fetch_last_price(symbol).await {
        Ok(price) => Some(price),
        Err(e) => {
            warn!("No quote for {}: {}", symbol, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::quote_provider::QuoteError;
    use async_trait::async_trait;

    struct StubQuotes(Result<f64, QuoteError>);

    #[async_trait]
    impl QuoteProvider for StubQuotes {
        async fn fetch_last_price(&self, _symbol: &str) -> Result<f64, QuoteError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn passes_prices_through() {
        let provider = StubQuotes(Ok(120.0));
        assert_eq!(last_price(&provider, "AAPL").await, Some(120.0));
    }

    #[tokio::test]
    async fn every_error_kind_degrades_to_none() {
        for err in [
            QuoteError::MissingApiKey,
            QuoteError::Network("connection refused".to_string()),
            QuoteError::Parse("not json".to_string()),
            QuoteError::NoData,
        ] {
            let provider = StubQuotes(Err(err));
            assert_eq!(last_price(&provider, "AAPL").await, None);
        }
    }
}
