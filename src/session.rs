use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::errors::AppError;

const USER_KEY: &str = "user";
const AUTH_MODE_KEY: &str = "auth_mode";
const OAUTH_STATE_KEY: &str = "oauth_state";
const NEW_USER_KEY: &str = "new_user";
const FLASH_KEY: &str = "flash";

// Snapshot of the authenticated user carried by the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

// Whether an in-flight OAuth flow was started from the signup or the login
// button. Decides the callback branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Signup,
    Login,
}

pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, AppError> {
    Ok(session.get::<SessionUser>(USER_KEY).await?)
}

pub async fn establish(
    session: &Session,
    user: SessionUser,
    new_user: bool,
) -> Result<(), AppError> {
    session.insert(USER_KEY, user).await?;
    session.insert(NEW_USER_KEY, new_user).await?;
    Ok(())
}

pub async fn is_new_user(session: &Session) -> Result<bool, AppError> {
    Ok(session.get::<bool>(NEW_USER_KEY).await?.unwrap_or(false))
}

// Records the mode and CSRF state for a freshly started OAuth flow.
pub async fn begin_auth(session: &Session, mode: AuthMode, state: &str) -> Result<(), AppError> {
    session.insert(AUTH_MODE_KEY, mode).await?;
    session.insert(OAUTH_STATE_KEY, state).await?;
    Ok(())
}

pub async fn take_auth_mode(session: &Session) -> Result<Option<AuthMode>, AppError> {
    Ok(session.remove::<AuthMode>(AUTH_MODE_KEY).await?)
}

pub async fn take_oauth_state(session: &Session) -> Result<Option<String>, AppError> {
    Ok(session.remove::<String>(OAUTH_STATE_KEY).await?)
}

pub async fn set_flash(session: &Session, message: &str) -> Result<(), AppError> {
    session.insert(FLASH_KEY, message).await?;
    Ok(())
}

// Flash messages are read-once.
pub async fn take_flash(session: &Session) -> Result<Option<String>, AppError> {
    Ok(session.remove::<String>(FLASH_KEY).await?)
}

// Drops every session key, authenticated or not.
pub async fn clear(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn fresh_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn test_user() -> SessionUser {
        SessionUser {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            picture: None,
        }
    }

    #[tokio::test]
    async fn establish_then_read_back() {
        let session = fresh_session();

        establish(&session, test_user(), true).await.unwrap();

        let user = current_user(&session).await.unwrap().unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert!(is_new_user(&session).await.unwrap());
    }

    #[tokio::test]
    async fn clear_drops_every_key() {
        let session = fresh_session();

        establish(&session, test_user(), true).await.unwrap();
        begin_auth(&session, AuthMode::Login, "state-123").await.unwrap();
        set_flash(&session, "hello").await.unwrap();

        clear(&session).await.unwrap();

        assert!(current_user(&session).await.unwrap().is_none());
        assert!(take_auth_mode(&session).await.unwrap().is_none());
        assert!(take_oauth_state(&session).await.unwrap().is_none());
        assert!(!is_new_user(&session).await.unwrap());
        assert!(take_flash(&session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn flash_is_read_once() {
        let session = fresh_session();

        set_flash(&session, "added AAPL").await.unwrap();

        assert_eq!(take_flash(&session).await.unwrap().as_deref(), Some("added AAPL"));
        assert!(take_flash(&session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn auth_mode_is_consumed_by_take() {
        let session = fresh_session();

        begin_auth(&session, AuthMode::Signup, "s").await.unwrap();

        assert_eq!(take_auth_mode(&session).await.unwrap(), Some(AuthMode::Signup));
        assert!(take_auth_mode(&session).await.unwrap().is_none());
    }
}
