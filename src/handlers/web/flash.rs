use axum::http::{HeaderMap, header};

const COOKIE_NAME: &str = "flash";

/// One-shot status shown on the list page after a redirect.
///
/// Carried in a `flash` cookie holding [`Flash::code`]; the list page clears
/// the cookie once it has shown the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    NoteAdded,
    NoteUpdated,
    NoteDeleted,
    EmptyContent,
    InvalidId,
    NoteNotFound,
    AddFailed,
    UpdateFailed,
    DeleteFailed,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Error,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl Flash {
    const ALL: [Self; 10] = [
        Self::NoteAdded,
        Self::NoteUpdated,
        Self::NoteDeleted,
        Self::EmptyContent,
        Self::InvalidId,
        Self::NoteNotFound,
        Self::AddFailed,
        Self::UpdateFailed,
        Self::DeleteFailed,
        Self::LoadFailed,
    ];

    pub const CLEAR_COOKIE: &'static str = "flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

    pub const fn code(self) -> &'static str {
        match self {
            Self::NoteAdded => "note-added",
            Self::NoteUpdated => "note-updated",
            Self::NoteDeleted => "note-deleted",
            Self::EmptyContent => "empty-content",
            Self::InvalidId => "invalid-id",
            Self::NoteNotFound => "note-not-found",
            Self::AddFailed => "add-failed",
            Self::UpdateFailed => "update-failed",
            Self::DeleteFailed => "delete-failed",
            Self::LoadFailed => "load-failed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    pub const fn category(self) -> Category {
        match self {
            Self::NoteAdded | Self::NoteUpdated | Self::NoteDeleted => Category::Success,
            _ => Category::Error,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::NoteAdded => "Note added successfully!",
            Self::NoteUpdated => "Note updated successfully!",
            Self::NoteDeleted => "Note deleted successfully!",
            Self::EmptyContent => "Note content cannot be empty",
            Self::InvalidId => "Invalid note ID",
            Self::NoteNotFound => "Note not found",
            Self::AddFailed => "Error adding note",
            Self::UpdateFailed => "Error updating note",
            Self::DeleteFailed => "Error deleting note",
            Self::LoadFailed => "Error loading notes",
        }
    }

    pub fn set_cookie(self) -> String {
        format!("{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax", self.code())
    }
}

/// Raw value of the `flash` cookie, if the request carries one.
pub fn cookie_value(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value)
}
