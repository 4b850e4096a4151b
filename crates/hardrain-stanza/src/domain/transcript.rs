//! The append-only transcript and stanza plan log.

use hardrain_core::error::SequenceError;
use hardrain_core::line::Line;

use super::plan::{MAX_STANZA_LENGTH, MIN_STANZA_LENGTH, Position, StanzaPlan, current_position};
use super::seed::{SEED_PLAN, seed_stanza};

/// Every line written so far, plus one plan per stanza entered.
///
/// Both lists only grow. The current stanza and offset are always derived
/// from them, so there is no counter that can drift out of sync.
#[derive(Debug, Clone)]
pub struct Transcript {
    lines: Vec<Line>,
    plans: Vec<StanzaPlan>,
}

impl Transcript {
    /// A transcript holding only the seed stanza.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            lines: seed_stanza(),
            plans: vec![SEED_PLAN],
        }
    }

    /// All lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All recorded stanza plans, in stanza order.
    #[must_use]
    pub fn plans(&self) -> &[StanzaPlan] {
        &self.plans
    }

    /// Number of lines written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no lines have been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Where the next line will land.
    #[must_use]
    pub fn position(&self) -> Position {
        current_position(self.lines.len(), &self.plans)
    }

    /// The plan recorded for `stanza_index`, if any.
    #[must_use]
    pub fn plan_for(&self, stanza_index: u32) -> Option<&StanzaPlan> {
        self.plans.iter().find(|p| p.stanza_index == stanza_index)
    }

    /// Lines already written in the stanza that will receive the next line.
    #[must_use]
    pub fn current_stanza_lines(&self) -> &[Line] {
        &self.lines[self.position().stanza_start..]
    }

    /// Records the plan for the stanza about to be entered.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::Invariant` if the plan is not for the stanza
    /// whose first line comes next, if that stanza already has a plan, or if
    /// the length is outside the plannable range.
    pub fn record_plan(&mut self, plan: StanzaPlan) -> Result<(), SequenceError> {
        let position = self.position();
        if plan.stanza_index != position.stanza_index || position.position_in_stanza != 0 {
            return Err(SequenceError::Invariant(format!(
                "plan for stanza {} recorded while the next line opens stanza {} at position {}",
                plan.stanza_index, position.stanza_index, position.position_in_stanza
            )));
        }
        if self.plan_for(plan.stanza_index).is_some() {
            return Err(SequenceError::Invariant(format!(
                "stanza {} already has a plan",
                plan.stanza_index
            )));
        }
        if !(MIN_STANZA_LENGTH..=MAX_STANZA_LENGTH).contains(&plan.length) {
            return Err(SequenceError::Invariant(format!(
                "stanza length {} outside {MIN_STANZA_LENGTH}..={MAX_STANZA_LENGTH}",
                plan.length
            )));
        }
        self.plans.push(plan);
        Ok(())
    }

    /// Appends a line at the current position.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::Invariant` if the current stanza has no plan,
    /// or if the line's stanza or role does not match the derived position.
    pub fn append(&mut self, line: Line) -> Result<(), SequenceError> {
        let position = self.position();
        let plan = self.plan_for(position.stanza_index).ok_or_else(|| {
            SequenceError::Invariant(format!(
                "stanza {} has no plan",
                position.stanza_index
            ))
        })?;
        let expected = plan.classify(position.position_in_stanza);
        if line.stanza_index != position.stanza_index || expected != Some(line.role) {
            return Err(SequenceError::Invariant(format!(
                "line for stanza {} as {:?} does not fit stanza {} position {} ({expected:?})",
                line.stanza_index, line.role, position.stanza_index, position.position_in_stanza
            )));
        }
        self.lines.push(line);
        Ok(())
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::seeded()
    }
}
