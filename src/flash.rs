//! One-shot status messages carried across a redirect.
//!
//! The message travels as a short code in a signed `flash` cookie and is
//! removed by the first page that renders it.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    AccountCreated,
    UserExists,
    InvalidRegistration,
    LoginSuccessful,
    InvalidCredentials,
    NoteAdded,
    NoteUpdated,
    NoteDeleted,
    LoggedOut,
}

impl Flash {
    const ALL: [Flash; 9] = [
        Flash::AccountCreated,
        Flash::UserExists,
        Flash::InvalidRegistration,
        Flash::LoginSuccessful,
        Flash::InvalidCredentials,
        Flash::NoteAdded,
        Flash::NoteUpdated,
        Flash::NoteDeleted,
        Flash::LoggedOut,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Flash::AccountCreated => "account_created",
            Flash::UserExists => "user_exists",
            Flash::InvalidRegistration => "invalid_registration",
            Flash::LoginSuccessful => "login_successful",
            Flash::InvalidCredentials => "invalid_credentials",
            Flash::NoteAdded => "note_added",
            Flash::NoteUpdated => "note_updated",
            Flash::NoteDeleted => "note_deleted",
            Flash::LoggedOut => "logged_out",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::AccountCreated => "Account created successfully!",
            Flash::UserExists => "User already exists!",
            Flash::InvalidRegistration => {
                "Username must be 1-100 characters and password must not be empty."
            }
            Flash::LoginSuccessful => "Login successful!",
            Flash::InvalidCredentials => "Invalid credentials!",
            Flash::NoteAdded => "Note added!",
            Flash::NoteUpdated => "Note updated!",
            Flash::NoteDeleted => "Note deleted!",
            Flash::LoggedOut => "Logged out successfully!",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            Flash::UserExists | Flash::InvalidRegistration | Flash::InvalidCredentials
        )
    }
}

/// Queue `flash` for the next rendered page.
pub fn set(jar: SignedCookieJar, flash: Flash) -> SignedCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Pop the pending flash, if any.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let flash = Flash::from_code(cookie.value());
            (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
        }
        None => (jar, None),
    }
}
