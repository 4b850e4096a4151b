//! Shared test mocks and utilities for the Hard Rain engine.

mod clock;
mod generator;
mod rng;
mod sink;

pub use clock::{FixedClock, fixed_now};
pub use generator::{FailingGenerator, ScriptedGenerator};
pub use rng::{MockRng, SequenceRng};
pub use sink::{FailingLineSink, RecordingLineSink};
