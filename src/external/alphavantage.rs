use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::AppConfig;
use crate::external::quote_provider::{QuoteError, QuoteProvider};

const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

pub struct AlphaVantageQuotes {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl AlphaVantageQuotes {
    pub fn from_config(config: &AppConfig) -> Result<Self, QuoteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.quote_timeout_secs))
            .build()
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.alphavantage_api_key.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(api_key: Option<String>, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AvQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<AvGlobalQuote>,

    // When rate-limited Alpha Vantage returns:
    // { "Note": "Thank you for using Alpha Vantage! ... 5 calls per minute ..." }
    #[serde(rename = "Note")]
    note: Option<String>,

    // When invalid:
    // { "Error Message": "Invalid API call. ..." }
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AvGlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
}

// GLOBAL_QUOTE quotes an empty object for unknown symbols; that is a valid
// no-data response, not a protocol error.
fn parse_global_quote(body: &str) -> Result<f64, QuoteError> {
    let parsed: AvQuoteResponse =
        serde_json::from_str(body).map_err(|e| QuoteError::Parse(e.to_string()))?;

    if let Some(note) = parsed.note {
        warn!("Alpha Vantage throttled the request: {}", note);
        return Err(QuoteError::NoData);
    }
    if let Some(msg) = parsed.error_message {
        warn!("Alpha Vantage rejected the request: {}", msg);
        return Err(QuoteError::NoData);
    }

    let price = parsed
        .global_quote
        .and_then(|quote| quote.price)
        .ok_or(QuoteError::NoData)?;

    price
        .trim()
        .parse::<f64>()
        .map_err(|e| QuoteError::Parse(e.to_string()))
}

#[async_trait]
impl QuoteProvider for AlphaVantageQuotes {
    async fn fetch_last_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        let api_key = self.api_key.as_deref().ok_or(QuoteError::MissingApiKey)?;

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        let body = resp
            .text()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        parse_global_quote(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_quote() {
        let body = r#"{"Global Quote": {"01. symbol": "IBM", "05. price": "123.4500"}}"#;
        assert_eq!(parse_global_quote(body).unwrap(), 123.45);
    }

    #[test]
    fn missing_quote_object_is_no_data() {
        assert!(matches!(parse_global_quote("{}"), Err(QuoteError::NoData)));
    }

    #[test]
    fn empty_quote_object_is_no_data() {
        let body = r#"{"Global Quote": {}}"#;
        assert!(matches!(parse_global_quote(body), Err(QuoteError::NoData)));
    }

    #[test]
    fn throttle_note_is_no_data() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage!"}"#;
        assert!(matches!(parse_global_quote(body), Err(QuoteError::NoData)));
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        assert!(matches!(
            parse_global_quote("<html>down for maintenance</html>"),
            Err(QuoteError::Parse(_))
        ));
    }

    #[test]
    fn non_numeric_price_is_a_parse_error() {
        let body = r#"{"Global Quote": {"05. price": "n/a"}}"#;
        assert!(matches!(parse_global_quote(body), Err(QuoteError::Parse(_))));
    }

    #[tokio::test]
    async fn missing_api_key_short_circuits() {
        let provider = AlphaVantageQuotes::with_base_url(None, "http://127.0.0.1:9/query");
        assert!(matches!(
            provider.fetch_last_price("IBM").await,
            Err(QuoteError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        let provider =
            AlphaVantageQuotes::with_base_url(Some("demo".to_string()), "http://127.0.0.1:9/query");
        assert!(matches!(
            provider.fetch_last_price("IBM").await,
            Err(QuoteError::Network(_))
        ));
    }
}
