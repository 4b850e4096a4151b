//! Sink used when no database is configured.

use async_trait::async_trait;
use hardrain_core::error::PersistError;
use hardrain_core::line::Line;
use hardrain_core::sink::LineSink;
use tracing::info;

/// Logs each line and always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLineSink;

#[async_trait]
impl LineSink for TracingLineSink {
    async fn persist(&self, line: &Line) -> Result<(), PersistError> {
        info!(
            line_id = %line.id,
            stanza = line.stanza_index,
            role = line.role.as_str(),
            text = %line.text,
            "line persisted to log only"
        );
        Ok(())
    }
}
