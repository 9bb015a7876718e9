//! Session-cookie helpers. The `Session` is passed in explicitly by each
//! request handler; nothing here holds global state.

use crate::domain::SessionUser;
use humor_errors::AppError;
use oauth2::{CsrfToken, PkceCodeVerifier};
use tower_sessions::Session;

const USER_KEY: &str = "user";
const CSRF_KEY: &str = "oauth_csrf";
const PKCE_KEY: &str = "oauth_pkce";

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session store: {}", e))
}

pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, AppError> {
    session.get::<SessionUser>(USER_KEY).await.map_err(session_error)
}

/// Rotates the session id before storing the identity to avoid fixation.
pub async fn sign_in(session: &Session, user: &SessionUser) -> Result<(), AppError> {
    session.cycle_id().await.map_err(session_error)?;
    session.insert(USER_KEY, user).await.map_err(session_error)
}

pub async fn sign_out(session: &Session) -> Result<(), AppError> {
    session.flush().await.map_err(session_error)
}

pub async fn store_login_challenge(
    session: &Session,
    csrf: &CsrfToken,
    verifier: &PkceCodeVerifier,
) -> Result<(), AppError> {
    session
        .insert(CSRF_KEY, csrf.secret())
        .await
        .map_err(session_error)?;
    session
        .insert(PKCE_KEY, verifier.secret())
        .await
        .map_err(session_error)
}

/// Removes and returns the pending login challenge if `state` matches it.
pub async fn take_login_challenge(
    session: &Session,
    state: &str,
) -> Result<PkceCodeVerifier, AppError> {
    let csrf: Option<String> = session.remove(CSRF_KEY).await.map_err(session_error)?;
    let verifier: Option<String> = session.remove(PKCE_KEY).await.map_err(session_error)?;

    match (csrf, verifier) {
        (Some(expected), Some(verifier)) if expected == state => {
            Ok(PkceCodeVerifier::new(verifier))
        }
        (Some(_), Some(_)) => Err(AppError::Auth("state mismatch".to_string())),
        _ => Err(AppError::Auth("no login in progress".to_string())),
    }
}
