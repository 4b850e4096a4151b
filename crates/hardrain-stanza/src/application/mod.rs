//! Generation cycle orchestration and read-side views.

pub mod query_handlers;
pub mod sequencer;
