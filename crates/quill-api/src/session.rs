//! Cookie-based session state.
//!
//! The session is a single `user_id` cookie whose value is the user's id
//! signed by [`quill_crypto::Signer`]. A request is Authenticated when the
//! cookie verifies and the id still resolves to a user; every other case
//! (missing cookie, forged signature, unparseable id, deleted user) is
//! Anonymous. Verification failure is never surfaced as an error.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::error;

use quill_db::models::UserRow;

use crate::auth::AppState;

pub const SESSION_COOKIE: &str = "user_id";

/// Resolve the request's session cookie to a user, or None for anonymous.
pub async fn current_user(state: &AppState, jar: &CookieJar) -> Option<UserRow> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let uid: i64 = state.signer.verify(cookie.value())?.parse().ok()?;

    let db = state.clone();
    match tokio::task::spawn_blocking(move || db.db.get_user_by_id(uid)).await {
        Ok(Ok(user)) => user,
        Ok(Err(e)) => {
            error!("session user lookup failed: {}", e);
            None
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            None
        }
    }
}

/// Set the signed session cookie for `user_id`, path `/`, session-scoped.
pub fn establish(state: &AppState, jar: CookieJar, user_id: i64) -> CookieJar {
    let signed = state.signer.sign(&user_id.to_string());
    jar.add(Cookie::build((SESSION_COOKIE, signed)).path("/").build())
}

/// Clear the session cookie by overwriting it with an empty value.
pub fn clear(jar: CookieJar) -> CookieJar {
    jar.add(Cookie::build((SESSION_COOKIE, "")).path("/").build())
}
