use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};
use service::{AuthService, CredentialStore, ServiceError};
use tracing::{debug, info, instrument, trace, warn};
use validator::Validate;

use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::schemas::AppState;
use crate::session;
use crate::views;

/// Registration form fields
#[derive(Deserialize, Serialize, Validate)]
pub struct RegisterForm {
    /// Username (must be unique, at most 100 characters)
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login form fields
#[derive(Deserialize, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn register_page(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, flash) = flash::take(jar);
    (jar, Html(views::register(flash)))
}

/// Create an account, then send the user to the login page.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    trace!("Entering register function");

    if let Err(errors) = form.validate() {
        debug!("Registration form rejected: {}", errors);
        return Ok((flash::set(jar, Flash::InvalidRegistration), Redirect::to("/register")));
    }

    let auth = AuthService::new(CredentialStore::new(&state.db));
    match auth.register(&form.username, &form.password).await {
        Ok(user_id) => {
            info!("Account created with ID: {}", user_id);
            Ok((flash::set(jar, Flash::AccountCreated), Redirect::to("/login")))
        }
        Err(ServiceError::AlreadyExists(_)) => {
            Ok((flash::set(jar, Flash::UserExists), Redirect::to("/register")))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_page(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, flash) = flash::take(jar);
    (jar, Html(views::login(flash)))
}

/// Verify credentials and bind the session cookie to the username.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    trace!("Entering login function");

    let mut session = session::load(&jar);
    let auth = AuthService::new(CredentialStore::new(&state.db));

    match auth.login(&mut session, &form.username, &form.password).await {
        Ok(user_id) => {
            state.user_ids.insert(form.username.clone(), user_id).await;
            let jar = session::store(jar, &session);
            Ok((flash::set(jar, Flash::LoginSuccessful), Redirect::to("/dashboard")))
        }
        Err(ServiceError::InvalidCredentials) => {
            warn!("Login rejected");
            Ok((flash::set(jar, Flash::InvalidCredentials), Redirect::to("/login")))
        }
        Err(e) => Err(e.into()),
    }
}

/// Drop the session unconditionally.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let mut session = session::load(&jar);
    AuthService::new(CredentialStore::new(&state.db)).logout(&mut session);

    let jar = session::store(jar, &session);
    (flash::set(jar, Flash::LoggedOut), Redirect::to("/"))
}
