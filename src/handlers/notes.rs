use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};
use service::{NoteStore, ServiceError};
use tracing::{debug, info, instrument};

use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::schemas::AppState;
use crate::session::CurrentUser;
use crate::views;

/// Note body submitted from the dashboard or the edit page
#[derive(Debug, Deserialize, Serialize)]
pub struct NoteForm {
    pub note: String,
}

/// List the current user's notes
#[instrument(skip(state, jar))]
pub async fn dashboard(
    user: CurrentUser,
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let notes = NoteStore::new(&state.db).list_by_owner(user.id).await?;
    debug!("Rendering {} notes for {}", notes.len(), user.username);

    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(views::dashboard(&user.username, &notes, flash))))
}

/// Create a note for the current user. Blank submissions are dropped silently.
#[instrument(skip(state, jar, form))]
pub async fn add_note(
    user: CurrentUser,
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<NoteForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let jar = match NoteStore::new(&state.db).create(user.id, &form.note).await {
        Ok(note_id) => {
            info!("User {} added note {}", user.id, note_id);
            flash::set(jar, Flash::NoteAdded)
        }
        Err(ServiceError::EmptyContent) => jar,
        Err(e) => return Err(e.into()),
    };
    Ok((jar, Redirect::to("/dashboard")))
}

/// Show the edit form for a note
#[instrument(skip(state))]
pub async fn edit_page(
    user: CurrentUser,
    Path(note_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let note = NoteStore::new(&state.db)
        .get_authorized(note_id, user.id, state.ownership)
        .await?;
    Ok(Html(views::edit_note(&user.username, &note)))
}

/// Replace a note's content
#[instrument(skip(state, jar, form))]
pub async fn edit_note(
    user: CurrentUser,
    Path(note_id): Path<i32>,
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<NoteForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let store = NoteStore::new(&state.db);
    store.get_authorized(note_id, user.id, state.ownership).await?;
    store.update(note_id, &form.note).await?;

    Ok((flash::set(jar, Flash::NoteUpdated), Redirect::to("/dashboard")))
}

/// Delete a note
#[instrument(skip(state, jar))]
pub async fn delete_note(
    user: CurrentUser,
    Path(note_id): Path<i32>,
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let store = NoteStore::new(&state.db);
    store.get_authorized(note_id, user.id, state.ownership).await?;
    store.delete(note_id).await?;

    Ok((flash::set(jar, Flash::NoteDeleted), Redirect::to("/dashboard")))
}
