//! Persistence sink abstraction.

use async_trait::async_trait;

use crate::error::PersistError;
use crate::line::Line;

/// Fire-and-forget destination for freshly appended lines.
///
/// Failures are reported to the caller for logging only; the engine never
/// rolls back a line because its persistence failed.
#[async_trait]
pub trait LineSink: Send + Sync {
    /// Persists a single line.
    ///
    /// # Errors
    ///
    /// Returns `PersistError::Storage` if the write fails.
    async fn persist(&self, line: &Line) -> Result<(), PersistError>;
}
