use crate::{
    dto::NoteListing,
    models::Note,
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note content cannot be empty")]
    EmptyContent,

    #[error("invalid note id: {0}")]
    InvalidId(i64),

    #[error("note with id {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

fn checked_id(id: i64) -> Result<i64, NoteError> {
    if id <= 0 {
        tracing::warn!("Invalid note ID: {}", id);
        return Err(NoteError::InvalidId(id));
    }
    Ok(id)
}

fn trimmed_content(content: &str) -> Result<&str, NoteError> {
    let content = content.trim();
    if content.is_empty() {
        tracing::warn!("Rejected empty note content");
        return Err(NoteError::EmptyContent);
    }
    Ok(content)
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn bootstrap(&self) -> Result<(), NoteError> {
        self.store.bootstrap().await.map_err(|e| {
            tracing::error!("Error initializing database: {}", e);
            e.into()
        })
    }

    /// Notes newest first, ready for display.
    pub async fn get_notes(&self) -> Result<Vec<NoteListing>, NoteError> {
        match self.store.list_notes().await {
            Ok(notes) => Ok(notes.into_iter().map(NoteListing::from).collect()),
            Err(e) => {
                tracing::error!("Error retrieving notes: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn add_note(&self, content: &str) -> Result<Note, NoteError> {
        let content = trimmed_content(content)?;

        self.store.insert_note(content).await.map_err(|e| {
            tracing::error!("Error adding note: {}", e);
            e.into()
        })
    }

    pub async fn update_note(&self, id: i64, content: &str) -> Result<Note, NoteError> {
        let id = checked_id(id)?;
        let content = trimmed_content(content)?;

        match self.store.update_note(id, content).await {
            Ok(Some(note)) => Ok(note),
            Ok(None) => Err(NoteError::NotFound(id)),
            Err(e) => {
                tracing::error!("Error updating note {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), NoteError> {
        let id = checked_id(id)?;

        match self.store.delete_note(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NoteError::NotFound(id)),
            Err(e) => {
                tracing::error!("Error deleting note {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    #[allow(dead_code)]
    pub async fn get_note_by_id(&self, id: i64) -> Result<Note, NoteError> {
        let id = checked_id(id)?;

        match self.store.get_note(id).await {
            Ok(Some(note)) => Ok(note),
            Ok(None) => Err(NoteError::NotFound(id)),
            Err(e) => {
                tracing::error!("Error retrieving note {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    /// Total number of notes, `0` when the store cannot be read.
    pub async fn get_notes_count(&self) -> i64 {
        self.store.count_notes().await.unwrap_or_else(|e| {
            tracing::error!("Error getting notes count: {}", e);
            0
        })
    }
}
