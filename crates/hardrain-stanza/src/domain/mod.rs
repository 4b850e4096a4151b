//! Pure stanza logic: planning, request building, and the transcript log.

pub mod plan;
pub mod request;
pub mod seed;
pub mod transcript;
