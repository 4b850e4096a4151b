//! Query handlers for the transcript.
//!
//! Read-only views built from a sequencer snapshot.

use chrono::{DateTime, Utc};
use hardrain_core::line::{Line, Role};
use serde::Serialize;
use uuid::Uuid;

use crate::application::sequencer::{Sequencer, SequencerPhase};
use crate::domain::plan::StanzaPlan;

/// Read-only view of a single line.
#[derive(Debug, Serialize)]
pub struct LineView {
    /// One-based position in the whole poem.
    pub line_number: usize,
    /// The line identifier.
    pub id: Uuid,
    /// The line's text.
    pub text: String,
    /// Stanza the line belongs to.
    pub stanza: u32,
    /// The line's role.
    pub role: Role,
    /// When the line was created.
    pub created_at: DateTime<Utc>,
}

/// Read-only view of the whole transcript.
#[derive(Debug, Serialize)]
pub struct TranscriptView {
    /// All lines, oldest first.
    pub lines: Vec<LineView>,
    /// All recorded stanza plans.
    pub stanza_plans: Vec<StanzaPlan>,
    /// Stanza that will receive the next line.
    pub current_stanza: u32,
    /// Offset of the next line within that stanza.
    pub position_in_stanza: usize,
    /// Current orchestrator phase.
    pub phase: SequencerPhase,
}

/// Returns the transcript view for `sequencer`.
#[must_use]
pub fn get_transcript(sequencer: &Sequencer) -> TranscriptView {
    let snapshot = sequencer.snapshot();
    TranscriptView {
        lines: snapshot
            .lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| LineView {
                line_number: index + 1,
                id: line.id,
                text: line.text,
                stanza: line.stanza_index,
                role: line.role,
                created_at: line.created_at,
            })
            .collect(),
        stanza_plans: snapshot.plans,
        current_stanza: snapshot.position.stanza_index,
        position_in_stanza: snapshot.position.position_in_stanza,
        phase: snapshot.phase,
    }
}

/// Renders lines as plain text, one per row, with a blank row after each
/// closing refrain.
#[must_use]
pub fn render_text(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.text);
        out.push('\n');
        if line.role == Role::RefrainB {
            out.push('\n');
        }
    }
    out
}
