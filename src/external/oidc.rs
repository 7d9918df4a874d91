use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::AppConfig;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

const SCOPES: &str = "openid email profile";

#[derive(Debug, Error)]
pub enum OidcError {
    #[error("oauth client is not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider rejected the request: {0}")]
    ProviderRejected(String),

    #[error("malformed identity claims: {0}")]
    MalformedClaims(String),
}

// Identity fields consumed from the provider's userinfo endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityClaims {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

// Authorization-code flow against Google's OIDC endpoints. One instance is
// built at startup and shared by every request.
pub struct OidcClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    auth_url: String,
    token_url: String,
    userinfo_url: String,
    redirect_url: String,
}

impl OidcClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, OidcError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| OidcError::Network(e.to_string()))?;

        Ok(Self {
            http,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
            redirect_url: config.oauth_redirect_url.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    // Where to send the user's browser to start the flow.
    pub fn authorize_url(&self, state: &str) -> Result<String, OidcError> {
        if !self.is_configured() {
            return Err(OidcError::NotConfigured);
        }

        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
            ],
        )
        .map_err(|_| OidcError::NotConfigured)?;

        Ok(url.into())
    }

    // Exchanges the authorization code for a token, then fetches userinfo.
    pub async fn exchange_code(&self, code: &str) -> Result<IdentityClaims, OidcError> {
        let token_resp = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| OidcError::Network(e.to_string()))?;

        if !token_resp.status().is_success() {
            let status = token_resp.status();
            let body = token_resp.text().await.unwrap_or_default();
            return Err(OidcError::ProviderRejected(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token_json: Value = token_resp
            .json()
            .await
            .map_err(|e| OidcError::MalformedClaims(format!("token response: {}", e)))?;

        let access_token = token_json["access_token"]
            .as_str()
            .ok_or_else(|| OidcError::MalformedClaims("missing access_token".to_string()))?;

        let userinfo_resp = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OidcError::Network(e.to_string()))?;

        if !userinfo_resp.status().is_success() {
            let status = userinfo_resp.status();
            let body = userinfo_resp.text().await.unwrap_or_default();
            return Err(OidcError::ProviderRejected(format!(
                "userinfo endpoint returned {}: {}",
                status, body
            )));
        }

        let userinfo: Value = userinfo_resp
            .json()
            .await
            .map_err(|e| OidcError::MalformedClaims(format!("userinfo response: {}", e)))?;

        claims_from_userinfo(&userinfo)
    }
}

fn claims_from_userinfo(userinfo: &Value) -> Result<IdentityClaims, OidcError> {
    let email = userinfo["email"]
        .as_str()
        .filter(|email| !email.is_empty())
        .ok_or_else(|| OidcError::MalformedClaims("userinfo has no email".to_string()))?;

    // Some providers omit the display name; the address is a usable fallback.
    let name = userinfo["name"].as_str().unwrap_or(email).to_string();
    let picture = userinfo["picture"].as_str().map(|s| s.to_string());

    Ok(IdentityClaims {
        email: email.to_string(),
        name,
        picture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_full_claims() {
        let userinfo = json!({
            "email": "ada@example.com",
            "name": "Ada Lovelace",
            "picture": "https://example.com/ada.png"
        });

        let claims = claims_from_userinfo(&userinfo).unwrap();
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.picture.as_deref(), Some("https://example.com/ada.png"));
    }

    #[test]
    fn name_falls_back_to_email() {
        let userinfo = json!({ "email": "ada@example.com" });

        let claims = claims_from_userinfo(&userinfo).unwrap();
        assert_eq!(claims.name, "ada@example.com");
        assert!(claims.picture.is_none());
    }

    #[test]
    fn missing_email_is_malformed() {
        let userinfo = json!({ "name": "No Email" });

        assert!(matches!(
            claims_from_userinfo(&userinfo),
            Err(OidcError::MalformedClaims(_))
        ));
    }

    #[test]
    fn empty_email_is_malformed() {
        let userinfo = json!({ "email": "" });

        assert!(matches!(
            claims_from_userinfo(&userinfo),
            Err(OidcError::MalformedClaims(_))
        ));
    }

    #[test]
    fn authorize_url_carries_scope_and_state() {
        let config = test_config();
        let client = OidcClient::from_config(&config).unwrap();

        let url = client.authorize_url("state-abc").unwrap();
        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("scope=openid+email+profile"));
        assert!(url.contains("state=state-abc"));
        assert!(url.contains("response_type=code"));
    }

    #[test]
    fn unconfigured_client_cannot_build_an_authorize_url() {
        let mut config = test_config();
        config.google_client_id = String::new();
        let client = OidcClient::from_config(&config).unwrap();

        assert!(!client.is_configured());
        assert!(matches!(
            client.authorize_url("s"),
            Err(OidcError::NotConfigured)
        ));
    }

    fn test_config() -> AppConfig {
        AppConfig {
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_db: "stockfolio-test".to_string(),
            session_secret: None,
            google_client_id: "test-client".to_string(),
            google_client_secret: "test-secret".to_string(),
            oauth_redirect_url: "http://localhost:3000/auth/callback".to_string(),
            alphavantage_api_key: None,
            quote_timeout_secs: 10,
            port: 3000,
        }
    }
}
