//! `PostgreSQL` implementation of the `LineSink` trait.

use async_trait::async_trait;
use hardrain_core::error::PersistError;
use hardrain_core::line::{Line, Role};
use hardrain_core::sink::LineSink;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::schema::INSERT_LYRIC;

/// PostgreSQL-backed line sink writing to the `lyrics` table.
#[derive(Debug, Clone)]
pub struct PgLineSink {
    pool: PgPool,
}

impl PgLineSink {
    /// Creates a new `PgLineSink`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LineSink for PgLineSink {
    #[instrument(skip(self, line), fields(line_id = %line.id, stanza = line.stanza_index))]
    async fn persist(&self, line: &Line) -> Result<(), PersistError> {
        let stanza = i32::try_from(line.stanza_index)
            .map_err(|e| PersistError::Storage(format!("stanza index out of range: {e}")))?;

        sqlx::query(INSERT_LYRIC)
            .bind(line.id)
            .bind(&line.text)
            .bind(stanza)
            .bind(line.role.as_str())
            .bind(line.role == Role::Question)
            .bind(line.role.is_refrain())
            .bind(line.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| PersistError::Storage(e.to_string()))?;

        debug!("persisted line");
        Ok(())
    }
}
