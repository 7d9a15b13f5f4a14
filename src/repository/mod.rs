#[cfg(test)]
pub mod memory;
mod schema;

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use crate::{config::DatabaseConfig, models::Note};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] tokio_postgres::Error),

    #[error("database statement failed: {0}")]
    Statement(#[from] tokio_postgres::Error),

    #[cfg(test)]
    #[error("database is offline")]
    Offline,
}

/// Persistence contract for notes.
///
/// `update_note` and `delete_note` report an absent row as `Ok(None)` and
/// `Ok(false)` respectively; `Err` is reserved for connection and statement
/// failures.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn bootstrap(&self) -> Result<(), StoreError>;

    /// All notes, newest first.
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError>;

    async fn insert_note(&self, content: &str) -> Result<Note, StoreError>;

    async fn update_note(&self, id: i64, content: &str) -> Result<Option<Note>, StoreError>;

    async fn delete_note(&self, id: i64) -> Result<bool, StoreError>;

    async fn get_note(&self, id: i64) -> Result<Option<Note>, StoreError>;

    async fn count_notes(&self) -> Result<i64, StoreError>;
}

/// PostgreSQL-backed store. Every operation opens its own connection, which
/// is closed when the `Client` is dropped.
pub struct Repository {
    config: tokio_postgres::Config,
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Repository {
    pub fn new(database: &DatabaseConfig) -> Self {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&database.host)
            .port(database.port)
            .user(&database.user)
            .password(&database.password)
            .dbname(&database.dbname)
            .connect_timeout(database.connect_timeout);

        Self::with_pg_config(config)
    }

    pub const fn with_pg_config(config: tokio_postgres::Config) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<Client, StoreError> {
        let (client, con) = self
            .config
            .connect(NoTls)
            .await
            .map_err(StoreError::Connect)?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(client)
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn bootstrap(&self) -> Result<(), StoreError> {
        let client = self.connect().await?;
        client.batch_execute(schema::BOOTSTRAP).await?;

        tracing::info!("Database schema initialized");

        Ok(())
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        let client = self.connect().await?;
        let rows = client
            .query(
                &format!(
                    "SELECT {} FROM notes ORDER BY created_at DESC, id DESC",
                    schema::NOTE_COLUMNS
                ),
                &[],
            )
            .await?;

        tracing::info!("Retrieved {} notes", rows.len());

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn insert_note(&self, content: &str) -> Result<Note, StoreError> {
        let mut client = self.connect().await?;
        let tx = client.transaction().await?;

        let row = tx
            .query_one(
                &format!(
                    "INSERT INTO notes (content) VALUES ($1) RETURNING {}",
                    schema::NOTE_COLUMNS
                ),
                &[&content],
            )
            .await?;
        tx.commit().await?;

        let note = note_from_row(&row);
        tracing::info!("Added new note with ID: {}", note.id);

        Ok(note)
    }

    async fn update_note(&self, id: i64, content: &str) -> Result<Option<Note>, StoreError> {
        let mut client = self.connect().await?;
        let tx = client.transaction().await?;

        // Row lock holds until commit, so the row cannot vanish between
        // the check and the update.
        let existing = tx
            .query_opt("SELECT id FROM notes WHERE id = $1 FOR UPDATE", &[&id])
            .await?;
        if existing.is_none() {
            tracing::warn!("Note with ID {} not found", id);
            return Ok(None);
        }

        let row = tx
            .query_opt(
                &format!(
                    "UPDATE notes SET content = $1, updated_at = GREATEST(now(), created_at) \
                     WHERE id = $2 RETURNING {}",
                    schema::NOTE_COLUMNS
                ),
                &[&content, &id],
            )
            .await?;
        let Some(row) = row else {
            tracing::warn!("No note updated with ID: {}", id);
            return Ok(None);
        };
        tx.commit().await?;

        tracing::info!("Updated note with ID: {}", id);

        Ok(Some(note_from_row(&row)))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        let mut client = self.connect().await?;
        let tx = client.transaction().await?;

        let existing = tx
            .query_opt("SELECT id FROM notes WHERE id = $1 FOR UPDATE", &[&id])
            .await?;
        if existing.is_none() {
            tracing::warn!("Note with ID {} not found", id);
            return Ok(false);
        }

        let rows = tx
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;
        if rows == 0 {
            tracing::warn!("No note deleted with ID: {}", id);
            return Ok(false);
        }
        tx.commit().await?;

        tracing::info!("Deleted note with ID: {}", id);

        Ok(true)
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let client = self.connect().await?;
        let row = client
            .query_opt(
                &format!("SELECT {} FROM notes WHERE id = $1", schema::NOTE_COLUMNS),
                &[&id],
            )
            .await?;

        match &row {
            Some(_) => tracing::info!("Retrieved note with ID: {}", id),
            None => tracing::warn!("Note with ID {} not found", id),
        }

        Ok(row.as_ref().map(note_from_row))
    }

    async fn count_notes(&self) -> Result<i64, StoreError> {
        let client = self.connect().await?;
        let row = client.query_one("SELECT COUNT(*) FROM notes", &[]).await?;
        let count: i64 = row.get(0);

        tracing::info!("Total notes count: {}", count);

        Ok(count)
    }
}
