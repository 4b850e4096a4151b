//! Test sinks — mock `LineSink` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use hardrain_core::error::PersistError;
use hardrain_core::line::Line;
use hardrain_core::sink::LineSink;

/// A sink that records every persisted line and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingLineSink {
    persisted: Mutex<Vec<Line>>,
}

impl RecordingLineSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all lines that were persisted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn persisted(&self) -> Vec<Line> {
        self.persisted.lock().unwrap().clone()
    }
}

#[async_trait]
impl LineSink for RecordingLineSink {
    async fn persist(&self, line: &Line) -> Result<(), PersistError> {
        self.persisted.lock().unwrap().push(line.clone());
        Ok(())
    }
}

/// A sink that always fails. Useful for checking that persistence failures
/// stay isolated from sequencing.
#[derive(Debug, Default)]
pub struct FailingLineSink;

#[async_trait]
impl LineSink for FailingLineSink {
    async fn persist(&self, _line: &Line) -> Result<(), PersistError> {
        Err(PersistError::Storage("connection refused".into()))
    }
}
