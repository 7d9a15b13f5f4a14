use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    models::Note,
    repository::{NoteStore, StoreError},
};

/// In-process stand-in for `Repository`. Ids come from a counter that never
/// goes backwards, mirroring the table's sequence.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

#[derive(Default)]
struct State {
    notes: Vec<Note>,
    last_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every following call fails as if the server were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of store operations attempted so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Offline);
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut state))
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn bootstrap(&self) -> Result<(), StoreError> {
        self.with_state(|_| ())
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        self.with_state(|state| {
            let mut notes = state.notes.clone();
            notes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
            notes
        })
    }

    async fn insert_note(&self, content: &str) -> Result<Note, StoreError> {
        self.with_state(|state| {
            state.last_id += 1;
            let now = Utc::now();
            let note = Note {
                id: state.last_id,
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            };
            state.notes.push(note.clone());
            note
        })
    }

    async fn update_note(&self, id: i64, content: &str) -> Result<Option<Note>, StoreError> {
        self.with_state(|state| {
            let note = state.notes.iter_mut().find(|note| note.id == id)?;
            note.content = content.to_string();
            note.updated_at = Utc::now().max(note.created_at);
            Some(note.clone())
        })
    }

    async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        self.with_state(|state| {
            let before = state.notes.len();
            state.notes.retain(|note| note.id != id);
            state.notes.len() < before
        })
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        self.with_state(|state| state.notes.iter().find(|note| note.id == id).cloned())
    }

    async fn count_notes(&self) -> Result<i64, StoreError> {
        self.with_state(|state| i64::try_from(state.notes.len()).unwrap_or(i64::MAX))
    }
}
