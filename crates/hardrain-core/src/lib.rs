//! Hard Rain Core — shared abstractions.
//!
//! This crate defines the line record, the collaborator traits the
//! sequencing engine talks to, and the error taxonomy. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod generator;
pub mod line;
pub mod rng;
pub mod sink;
