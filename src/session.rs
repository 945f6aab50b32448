//! Client-side session storage and the authenticated-user extractor.
//!
//! The session is a signed `session` cookie holding the percent-encoded
//! username. Nothing is kept server side apart from the username to id cache.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use service::{AuthService, CredentialStore, SessionState, UserId};
use tracing::{debug, trace};

use crate::error::AppError;
use crate::schemas::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Read the session slot. Missing, tampered or undecodable cookies are anonymous.
pub fn load(jar: &SignedCookieJar) -> SessionState {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return SessionState::Anonymous;
    };

    match urlencoding::decode(cookie.value()) {
        Ok(username) if !username.is_empty() => SessionState::Authenticated {
            username: username.into_owned(),
        },
        _ => {
            debug!("Discarding unreadable session cookie");
            SessionState::Anonymous
        }
    }
}

/// Write the session slot back into the jar.
pub fn store(jar: SignedCookieJar, session: &SessionState) -> SignedCookieJar {
    match session.username() {
        Some(username) => jar.add(
            Cookie::build((SESSION_COOKIE, urlencoding::encode(username).into_owned()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        None => jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
    }
}

/// Resolve the session to a user id, consulting the cache first.
pub async fn resolve(state: &AppState, session: &SessionState) -> Result<Option<UserId>, AppError> {
    let Some(username) = session.username() else {
        return Ok(None);
    };

    if let Some(user_id) = state.user_ids.get(username).await {
        trace!("User id for '{}' served from cache", username);
        return Ok(Some(user_id));
    }

    let auth = AuthService::new(CredentialStore::new(&state.db));
    let user_id = auth.resolve(session).await?;
    if let Some(user_id) = user_id {
        state.user_ids.insert(username.to_string(), user_id).await;
    }
    Ok(user_id)
}

/// The logged-in user behind the current request.
///
/// Extraction redirects to `/login` when the session is anonymous or bound to
/// a username that no longer exists.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.key.clone());
        let session = load(&jar);

        let Some(username) = session.username().map(str::to_string) else {
            debug!("Anonymous request to {}, redirecting to login", parts.uri.path());
            return Err(Redirect::to("/login").into_response());
        };

        match resolve(state, &session).await {
            Ok(Some(id)) => Ok(CurrentUser { id, username }),
            Ok(None) => {
                debug!("Session user '{}' no longer exists, redirecting to login", username);
                Err(Redirect::to("/login").into_response())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}
