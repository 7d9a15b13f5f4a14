pub mod flash;

use axum::{
    Form, Router,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_macros::debug_handler;
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{
    dto::NoteForm,
    service::{NoteError, NoteService},
    views,
};

use flash::Flash;

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(list_notes))
        .route("/add", post(add_note))
        .route("/delete/{id}", post(delete_note))
        .route("/edit/{id}", post(edit_note))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

/// `302 Found` back to the list page, carrying the outcome in the flash cookie.
fn redirect_home(flash: Flash) -> Response {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, flash.set_cookie()),
        ],
    )
        .into_response()
}

/// Submitted content, `None` when the field is missing or empty.
fn submitted_content(form: Result<Form<NoteForm>, FormRejection>) -> Option<String> {
    match form {
        Ok(Form(form)) => form.content.filter(|content| !content.is_empty()),
        Err(e) => {
            tracing::warn!("failed to read note form: {}", e);
            None
        }
    }
}

#[debug_handler]
pub async fn list_notes(State(service): State<Arc<NoteService>>, headers: HeaderMap) -> Response {
    let pending = flash::cookie_value(&headers);

    let (notes, count, flash) = match service.get_notes().await {
        Ok(notes) => (
            notes,
            service.get_notes_count().await,
            pending.and_then(Flash::from_code),
        ),
        Err(e) => {
            tracing::error!("failed to load notes for the list page: {}", e);
            (Vec::new(), 0, Some(Flash::LoadFailed))
        }
    };

    let page = Html(views::render_index(&notes, count, flash));

    if pending.is_some() {
        ([(header::SET_COOKIE, Flash::CLEAR_COOKIE)], page).into_response()
    } else {
        page.into_response()
    }
}

#[debug_handler]
pub async fn add_note(
    State(service): State<Arc<NoteService>>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Response {
    let Some(content) = submitted_content(form) else {
        tracing::warn!("add rejected: empty content");
        return redirect_home(Flash::EmptyContent);
    };

    let flash = match service.add_note(&content).await {
        Ok(note) => {
            tracing::info!("note {} added", note.id);
            Flash::NoteAdded
        }
        Err(NoteError::EmptyContent) => Flash::EmptyContent,
        Err(e) => {
            tracing::error!("failed to add note: {}", e);
            Flash::AddFailed
        }
    };

    redirect_home(flash)
}

#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(id)) = id else {
        tracing::warn!("delete rejected: malformed note id");
        return redirect_home(Flash::InvalidId);
    };

    let flash = match service.delete_note(id).await {
        Ok(()) => {
            tracing::info!("note {} deleted", id);
            Flash::NoteDeleted
        }
        Err(NoteError::InvalidId(_)) => Flash::InvalidId,
        Err(NoteError::NotFound(_)) => Flash::NoteNotFound,
        Err(e) => {
            tracing::error!("failed to delete note {}: {}", id, e);
            Flash::DeleteFailed
        }
    };

    redirect_home(flash)
}

#[debug_handler]
pub async fn edit_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Response {
    let Ok(Path(id)) = id else {
        tracing::warn!("edit rejected: malformed note id");
        return redirect_home(Flash::InvalidId);
    };
    let Some(content) = submitted_content(form) else {
        tracing::warn!("edit of note {} rejected: empty content", id);
        return redirect_home(Flash::EmptyContent);
    };

    let flash = match service.update_note(id, &content).await {
        Ok(note) => {
            tracing::info!("note {} updated", note.id);
            Flash::NoteUpdated
        }
        Err(NoteError::EmptyContent) => Flash::EmptyContent,
        Err(NoteError::InvalidId(_)) => Flash::InvalidId,
        Err(NoteError::NotFound(_)) => Flash::NoteNotFound,
        Err(e) => {
            tracing::error!("failed to update note {}: {}", id, e);
            Flash::UpdateFailed
        }
    };

    redirect_home(flash)
}
