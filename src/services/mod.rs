pub(crate) mod auth_service;
pub(crate) mod holdings_service;
pub(crate) mod position_service;
pub(crate) mod quote_service;
