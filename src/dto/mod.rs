use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::Note;

const LISTING_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Form body of `POST /add` and `POST /edit/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    /// Note content, absent when the field was not submitted
    pub content: Option<String>,
}

/// A row of the list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListing {
    pub id: i64,
    pub content: String,
    pub formatted_date: String,
}

impl NoteListing {
    pub fn format_date(date: &DateTime<Utc>) -> String {
        date.format(LISTING_DATE_FORMAT).to_string()
    }
}

impl From<Note> for NoteListing {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            formatted_date: Self::format_date(&note.created_at),
            content: note.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn listing_formats_creation_minute() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        let note = Note {
            id: 3,
            content: "groceries".to_string(),
            created_at,
            updated_at: created_at,
        };

        let listing = NoteListing::from(note);

        assert_eq!(listing.id, 3);
        assert_eq!(listing.content, "groceries");
        assert_eq!(listing.formatted_date, "2024-03-09 07:05");
    }
}
