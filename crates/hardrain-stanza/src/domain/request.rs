//! Line request building.

use hardrain_core::error::SequenceError;
use hardrain_core::generator::{LineRequest, Perspective};
use hardrain_core::line::{Line, Role};

/// Penultimate line of every stanza.
pub const REFRAIN_PENULTIMATE: &str = "And it's a hard, and it's a hard, it's a hard, it's a hard";

/// Final line of every stanza.
pub const REFRAIN_FINAL: &str = "And it's a hard rain's a-gonna fall";

/// How the next line's text will be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLine {
    /// Ask the external generator.
    Generate(LineRequest),
    /// Use fixed text; no external call.
    Literal(&'static str),
}

/// Builds the request for a line of `role`, given the lines already written
/// in the current stanza.
///
/// Question perspective follows the position: the stanza's first question is
/// addressed to the blue-eyed son, the second to the darling young one.
/// Answer requests carry the stanza's opening line and the body lines of
/// this stanza only.
///
/// # Errors
///
/// Returns `SequenceError::Invariant` if `stanza_lines` cannot hold a line
/// of `role` (a third question, or a body line before the opening question).
pub fn build_request(role: Role, stanza_lines: &[Line]) -> Result<NextLine, SequenceError> {
    match role {
        Role::Question => {
            let perspective = match stanza_lines.len() {
                0 => Perspective::BlueEyedSon,
                1 => Perspective::DarlingYoungOne,
                n => {
                    return Err(SequenceError::Invariant(format!(
                        "question requested at stanza position {n}"
                    )));
                }
            };
            Ok(NextLine::Generate(LineRequest::Question { perspective }))
        }
        Role::Body => {
            let opening = stanza_lines
                .first()
                .filter(|line| line.role == Role::Question)
                .ok_or_else(|| {
                    SequenceError::Invariant(
                        "body line requested before the stanza's opening question".to_owned(),
                    )
                })?;
            let existing_lines = stanza_lines
                .iter()
                .filter(|line| line.role == Role::Body && line.stanza_index == opening.stanza_index)
                .map(|line| line.text.clone())
                .collect();
            Ok(NextLine::Generate(LineRequest::Answer {
                question: opening.text.clone(),
                existing_lines,
            }))
        }
        Role::RefrainA => Ok(NextLine::Literal(REFRAIN_PENULTIMATE)),
        Role::RefrainB => Ok(NextLine::Literal(REFRAIN_FINAL)),
    }
}
