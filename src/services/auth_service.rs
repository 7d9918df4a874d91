use mongodb::Database;
use tracing::info;

use crate::db;
use crate::errors::AppError;
use crate::external::oidc::IdentityClaims;
use crate::models::User;
use crate::session::AuthMode;

// Where the callback sends the browser next, given the recorded mode and
// whether the claimed email already has an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    // Signup with a fresh email: account created, first-stock page next.
    NewUserCreated,
    // Signup with a known email: treated as success, dashboard with a notice.
    AlreadyRegistered,
    // Login with a known email.
    LoggedIn,
    // Login with an unknown email: no session, back to landing.
    NotRegistered,
}

pub fn resolve_callback(mode: AuthMode, already_registered: bool) -> CallbackOutcome {
    match (mode, already_registered) {
        (AuthMode::Signup, false) => CallbackOutcome::NewUserCreated,
        (AuthMode::Signup, true) => CallbackOutcome::AlreadyRegistered,
        (AuthMode::Login, true) => CallbackOutcome::LoggedIn,
        (AuthMode::Login, false) => CallbackOutcome::NotRegistered,
    }
}

// Looks up the claimed email and creates the account when the flow calls for
// it. Signup for an existing email creates nothing.
pub async fn complete_callback(
    db: &Database,
    mode: AuthMode,
    claims: &IdentityClaims,
) -> Result<CallbackOutcome, AppError> {
    let existing = db::user_queries::find_by_email(db, &claims.email).await?;
    let outcome = resolve_callback(mode, existing.is_some());

    if outcome == CallbackOutcome::NewUserCreated {
        let user = User::new(
            claims.email.clone(),
            claims.name.clone(),
            claims.picture.clone(),
        );
        db::user_queries::insert(db, &user).await?;
        info!("Created user {}", user.email);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_with_fresh_email_creates_a_user() {
        assert_eq!(
            resolve_callback(AuthMode::Signup, false),
            CallbackOutcome::NewUserCreated
        );
    }

    #[test]
    fn signup_with_known_email_is_still_a_success() {
        assert_eq!(
            resolve_callback(AuthMode::Signup, true),
            CallbackOutcome::AlreadyRegistered
        );
    }

    #[test]
    fn login_with_known_email_signs_in() {
        assert_eq!(
            resolve_callback(AuthMode::Login, true),
            CallbackOutcome::LoggedIn
        );
    }

    #[test]
    fn login_with_unknown_email_is_rejected() {
        assert_eq!(
            resolve_callback(AuthMode::Login, false),
            CallbackOutcome::NotRegistered
        );
    }
}
