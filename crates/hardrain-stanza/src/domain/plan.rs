//! Stanza planning: length sampling, role bands, and derived position.

use hardrain_core::line::Role;
use hardrain_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};

/// Shortest stanza the planner will produce.
pub const MIN_STANZA_LENGTH: usize = 9;

/// Longest stanza the planner will produce.
pub const MAX_STANZA_LENGTH: usize = 14;

/// Relative weights for lengths `9..=14`. Never increasing, so shorter
/// stanzas are at least as likely as longer ones.
pub const STANZA_LENGTH_WEIGHTS: [u32; 6] = [3, 3, 3, 2, 2, 1];

/// The planned length of one stanza. Recorded once, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanzaPlan {
    /// One-based stanza index.
    pub stanza_index: u32,
    /// Total number of lines in the stanza.
    pub length: usize,
}

impl StanzaPlan {
    /// Classifies a position within this stanza. See [`classify`].
    #[must_use]
    pub fn classify(&self, position_in_stanza: usize) -> Option<Role> {
        classify(position_in_stanza, self.length)
    }
}

/// Where the next line will land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// Stanza that will receive the next line.
    pub stanza_index: u32,
    /// Zero-based offset of the next line within that stanza.
    pub position_in_stanza: usize,
    /// Transcript index of the stanza's first line.
    pub stanza_start: usize,
}

/// Draws a stanza length from the weighted distribution.
///
/// Uses a single uniform draw in `[0, total_weight)` and inverts the
/// cumulative weights.
pub fn sample_stanza_length(rng: &mut dyn DeterministicRng) -> usize {
    let total: u32 = STANZA_LENGTH_WEIGHTS.iter().sum();
    length_for_draw(rng.next_u32_range(0, total - 1))
}

fn length_for_draw(draw: u32) -> usize {
    let mut cumulative = 0;
    for (length, weight) in (MIN_STANZA_LENGTH..=MAX_STANZA_LENGTH).zip(STANZA_LENGTH_WEIGHTS) {
        cumulative += weight;
        if draw < cumulative {
            return length;
        }
    }
    MAX_STANZA_LENGTH
}

/// Returns the role of the line at `position_in_stanza` in a stanza of
/// `stanza_length` lines.
///
/// Positions 0 and 1 are questions, the last two are the refrain pair, and
/// everything between is body. `None` means the stanza is complete and the
/// caller must advance to the next one.
#[must_use]
pub fn classify(position_in_stanza: usize, stanza_length: usize) -> Option<Role> {
    if position_in_stanza >= stanza_length {
        return None;
    }
    let role = match position_in_stanza {
        0 | 1 => Role::Question,
        p if p + 2 == stanza_length => Role::RefrainA,
        p if p + 1 == stanza_length => Role::RefrainB,
        _ => Role::Body,
    };
    Some(role)
}

/// Derives the position of the next line from the transcript length and the
/// plans recorded so far.
///
/// Plans are walked in order; the first one not yet filled owns the next
/// line. When every plan is full, the next line opens stanza
/// `last_index + 1`, for which the caller must sample a plan first. Never
/// samples on its own.
#[must_use]
pub fn current_position(line_count: usize, plans: &[StanzaPlan]) -> Position {
    let mut stanza_start = 0;
    for plan in plans {
        if line_count < stanza_start + plan.length {
            return Position {
                stanza_index: plan.stanza_index,
                position_in_stanza: line_count - stanza_start,
                stanza_start,
            };
        }
        stanza_start += plan.length;
    }
    Position {
        stanza_index: plans.last().map_or(1, |p| p.stanza_index + 1),
        position_in_stanza: line_count.saturating_sub(stanza_start),
        stanza_start,
    }
}
