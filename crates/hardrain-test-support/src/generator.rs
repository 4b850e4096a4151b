//! Test generators — mock `LineGenerator` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hardrain_core::error::GenerationError;
use hardrain_core::generator::{LineGenerator, LineRequest};

/// A generator that replays a fixed script of responses in order and records
/// every request it receives. Once the script runs out, every call fails with
/// `GenerationError::Transport`.
#[derive(Debug)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<LineRequest>>,
}

impl ScriptedGenerator {
    /// Create a generator that returns `responses` in order.
    #[must_use]
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a generator that succeeds with each of `texts` in order.
    #[must_use]
    pub fn from_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok((*t).to_owned())).collect())
    }

    /// Returns a snapshot of all requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<LineRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LineGenerator for ScriptedGenerator {
    async fn generate(&self, request: &LineRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Transport("script exhausted".into())))
    }
}

/// A generator that always fails with a transport error. Useful for testing
/// the failed-cycle path.
#[derive(Debug, Default)]
pub struct FailingGenerator;

#[async_trait]
impl LineGenerator for FailingGenerator {
    async fn generate(&self, _request: &LineRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Transport("connection refused".into()))
    }
}
