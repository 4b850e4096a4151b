//! Line store database schema.

/// SQL to create the lyrics table.
pub const CREATE_LYRICS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS lyrics (
    id          UUID PRIMARY KEY,
    lyric       TEXT NOT NULL,
    stanza      INTEGER NOT NULL,
    role        VARCHAR(16) NOT NULL,
    is_question BOOLEAN NOT NULL,
    is_refrain  BOOLEAN NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_lyrics_stanza
    ON lyrics (stanza, created_at);
";

/// SQL to insert one line.
pub const INSERT_LYRIC: &str = r"
INSERT INTO lyrics (id, lyric, stanza, role, is_question, is_refrain, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7)
";
