use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{debug, instrument};

use crate::flash;
use crate::session;
use crate::views;

/// Landing page. Logged-in sessions go straight to their notes.
#[instrument(skip_all)]
pub async fn home(jar: SignedCookieJar) -> Response {
    if session::load(&jar).is_authenticated() {
        debug!("Authenticated session on landing page, redirecting to dashboard");
        return Redirect::to("/dashboard").into_response();
    }

    let (jar, flash) = flash::take(jar);
    (jar, Html(views::home(flash))).into_response()
}

/// Fallback for unknown paths
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(views::error_page(StatusCode::NOT_FOUND)))
}
