//! Error taxonomy for the sequencing engine and its collaborators.

use thiserror::Error;

/// Failure reported by a line generator.
///
/// Every variant aborts the current generation cycle without touching the
/// transcript.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The generator could not be reached, or the call was abandoned.
    #[error("generator transport failure: {0}")]
    Transport(String),

    /// The generator answered with a non-success status.
    #[error("generator returned status {status}: {message}")]
    Status {
        /// HTTP-style status code.
        status: u16,
        /// Body or reason returned alongside the status.
        message: String,
    },

    /// The response did not carry the expected text field.
    #[error("malformed generator response: {0}")]
    MalformedResponse(String),
}

/// Failure reported by a persistence sink. Never affects sequencing.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The storage write failed.
    #[error("storage write failed: {0}")]
    Storage(String),
}

/// Error returned when a generation cycle does not produce a line.
#[derive(Debug, Error)]
pub enum SequenceError {
    /// Another cycle is already in flight.
    #[error("a generation cycle is already in flight")]
    Busy,

    /// The external generator failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The transcript and stanza plans disagree.
    #[error("sequencing invariant violated: {0}")]
    Invariant(String),
}
