use std::sync::Arc;

use mongodb::Database;

use crate::external::oidc::OidcClient;
use crate::external::quote_provider::QuoteProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub quotes: Arc<dyn QuoteProvider>,
    pub oidc: Arc<OidcClient>,
}
