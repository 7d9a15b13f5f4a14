/// Idempotent schema bootstrap, run once at startup.
pub const BOOTSTRAP: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id BIGSERIAL PRIMARY KEY,
    content TEXT NOT NULL CHECK (btrim(content) <> ''),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (updated_at >= created_at)
);

CREATE INDEX IF NOT EXISTS idx_notes_created_at ON notes (created_at);
";

pub const NOTE_COLUMNS: &str = "id, content, created_at, updated_at";
