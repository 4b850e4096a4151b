//! Hard Rain — stanza sequencing engine.
//!
//! Decides what kind of line comes next (question, body, or refrain), how
//! long each stanza runs, what context the external generator receives, and
//! when the poem rolls over into a new stanza.

pub mod application;
pub mod domain;
