pub(crate) mod alphavantage;
pub(crate) mod oidc;
pub(crate) mod quote_provider;
