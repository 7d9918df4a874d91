use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MONGO_URI must be set")]
    MissingMongoUri,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_uri: String,
    pub mongo_db: String,
    pub session_secret: Option<String>,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub oauth_redirect_url: String,
    pub alphavantage_api_key: Option<String>,
    pub quote_timeout_secs: u64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongo_uri = std::env::var("MONGO_URI").map_err(|_| ConfigError::MissingMongoUri)?;

        Ok(Self {
            mongo_uri,
            mongo_db: std::env::var("MONGO_DB").unwrap_or_else(|_| "stockfolio".to_string()),
            session_secret: std::env::var("SESSION_SECRET").ok(),
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            google_client_secret: std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            oauth_redirect_url: std::env::var("OAUTH_REDIRECT_URL")
                .unwrap_or_else(|_| "http://localhost:3000/auth/callback".to_string()),
            alphavantage_api_key: std::env::var("ALPHAVANTAGE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            quote_timeout_secs: std::env::var("QUOTE_TIMEOUT_SECS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(10),
            port: std::env::var("PORT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(3000),
        })
    }
}
