//! The sequencing orchestrator.
//!
//! Drives one generation cycle end to end: derive the next position, sample
//! a stanza plan when a new stanza opens, build the request, call the
//! generator, append the line, and hand it to the persistence sink.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hardrain_core::clock::Clock;
use hardrain_core::error::{GenerationError, SequenceError};
use hardrain_core::generator::{LineGenerator, LineRequest};
use hardrain_core::line::{Line, Role};
use hardrain_core::rng::DeterministicRng;
use hardrain_core::sink::LineSink;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::plan::{Position, StanzaPlan, sample_stanza_length};
use crate::domain::request::{NextLine, build_request};
use crate::domain::transcript::Transcript;

/// Orchestrator phase. Anything other than `Idle` rejects new triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencerPhase {
    /// Ready for a trigger.
    Idle,
    /// Waiting on the external generator.
    Requesting,
    /// Appending the produced line.
    Appending,
    /// The cycle failed; about to return to `Idle`.
    Failed,
}

/// Result of a successful cycle.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLine {
    /// The appended line.
    pub line: Line,
    /// Set when the persistence sink rejected the line. Non-fatal.
    pub persist_warning: Option<String>,
}

/// Point-in-time copy of the engine's state.
#[derive(Debug, Clone)]
pub struct SequencerSnapshot {
    /// All lines, oldest first.
    pub lines: Vec<Line>,
    /// All recorded stanza plans.
    pub plans: Vec<StanzaPlan>,
    /// Where the next line will land.
    pub position: Position,
    /// Current orchestrator phase.
    pub phase: SequencerPhase,
}

/// Everything decided before the external call.
#[derive(Debug)]
struct PreparedCycle {
    position: Position,
    plan: StanzaPlan,
    role: Role,
    next: NextLine,
}

struct SequencerState {
    phase: SequencerPhase,
    transcript: Transcript,
    rng: Box<dyn DeterministicRng>,
}

impl SequencerState {
    fn transition(&mut self, to: SequencerPhase) {
        debug!(from = ?self.phase, to = ?to, "sequencer phase transition");
        self.phase = to;
    }
}

/// Returns the engine to `Idle` if a cycle is dropped mid-request, e.g. by a
/// caller-side timeout or a disconnected client.
struct CycleGuard<'a> {
    sequencer: &'a Sequencer,
    armed: bool,
}

impl<'a> CycleGuard<'a> {
    fn new(sequencer: &'a Sequencer) -> Self {
        Self {
            sequencer,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("generation cycle abandoned before the generator answered");
        let mut state = self.sequencer.lock_state();
        state.transition(SequencerPhase::Failed);
        state.transition(SequencerPhase::Idle);
    }
}

/// Single-flight orchestrator over an append-only transcript.
pub struct Sequencer {
    generator: Arc<dyn LineGenerator>,
    sink: Arc<dyn LineSink>,
    clock: Arc<dyn Clock>,
    state: Mutex<SequencerState>,
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("Sequencer")
            .field("phase", &state.phase)
            .field("lines", &state.transcript.len())
            .finish_non_exhaustive()
    }
}

impl Sequencer {
    /// Creates an orchestrator over `transcript`.
    #[must_use]
    pub fn new(
        transcript: Transcript,
        generator: Arc<dyn LineGenerator>,
        sink: Arc<dyn LineSink>,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            generator,
            sink,
            clock,
            state: Mutex::new(SequencerState {
                phase: SequencerPhase::Idle,
                transcript,
                rng,
            }),
        }
    }

    /// Creates an orchestrator starting from the seed stanza.
    #[must_use]
    pub fn seeded(
        generator: Arc<dyn LineGenerator>,
        sink: Arc<dyn LineSink>,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self::new(Transcript::seeded(), generator, sink, clock, rng)
    }

    // State is only mutated inside short synchronous sections that leave it
    // consistent, so a poisoned lock still guards valid data.
    fn lock_state(&self) -> MutexGuard<'_, SequencerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current orchestrator phase.
    #[must_use]
    pub fn phase(&self) -> SequencerPhase {
        self.lock_state().phase
    }

    /// Copies the current transcript, plans, position, and phase.
    #[must_use]
    pub fn snapshot(&self) -> SequencerSnapshot {
        let state = self.lock_state();
        SequencerSnapshot {
            lines: state.transcript.lines().to_vec(),
            plans: state.transcript.plans().to_vec(),
            position: state.transcript.position(),
            phase: state.phase,
        }
    }

    /// Runs one generation cycle and returns the appended line.
    ///
    /// # Errors
    ///
    /// - `SequenceError::Busy` if another cycle is in flight.
    /// - `SequenceError::Generation` if the generator failed; the transcript
    ///   is unchanged, though a plan sampled for a new stanza is kept.
    /// - `SequenceError::Invariant` if the transcript and plans disagree.
    #[instrument(skip(self))]
    pub async fn generate_next(&self) -> Result<GeneratedLine, SequenceError> {
        let prepared = self.begin_cycle()?;
        let cycle = CycleGuard::new(self);

        let text = match &prepared.next {
            NextLine::Literal(text) => (*text).to_owned(),
            NextLine::Generate(request) => match self.request_text(request).await {
                Ok(text) => text,
                Err(err) => {
                    cycle.disarm();
                    self.fail_cycle(&err);
                    return Err(err.into());
                }
            },
        };

        cycle.disarm();
        let line = self.finish_cycle(&prepared, text)?;
        let persist_warning = self.dispatch(&line).await;

        Ok(GeneratedLine {
            line,
            persist_warning,
        })
    }

    /// `Idle → Requesting`, then steps 1 and 2 of the cycle.
    fn begin_cycle(&self) -> Result<PreparedCycle, SequenceError> {
        let mut state = self.lock_state();
        if state.phase != SequencerPhase::Idle {
            warn!(phase = ?state.phase, "rejecting trigger while a cycle is in flight");
            return Err(SequenceError::Busy);
        }
        state.transition(SequencerPhase::Requesting);

        let prepared = Self::prepare(&mut state);
        if prepared.is_err() {
            state.transition(SequencerPhase::Idle);
        }
        prepared
    }

    fn prepare(state: &mut SequencerState) -> Result<PreparedCycle, SequenceError> {
        let position = state.transcript.position();
        let plan = if let Some(plan) = state.transcript.plan_for(position.stanza_index) {
            *plan
        } else {
            let plan = StanzaPlan {
                stanza_index: position.stanza_index,
                length: sample_stanza_length(state.rng.as_mut()),
            };
            state.transcript.record_plan(plan)?;
            info!(
                stanza = plan.stanza_index,
                length = plan.length,
                "planned new stanza"
            );
            plan
        };

        let role = plan.classify(position.position_in_stanza).ok_or_else(|| {
            SequenceError::Invariant(format!(
                "position {} is past the end of stanza {}",
                position.position_in_stanza, plan.stanza_index
            ))
        })?;
        let next = build_request(role, state.transcript.current_stanza_lines())?;

        Ok(PreparedCycle {
            position,
            plan,
            role,
            next,
        })
    }

    async fn request_text(&self, request: &LineRequest) -> Result<String, GenerationError> {
        let text = self.generator.generate(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::MalformedResponse(
                "generator returned blank text".to_owned(),
            ));
        }
        Ok(match request {
            LineRequest::Question { perspective } => perspective.complete(text),
            LineRequest::Answer { .. } => text.to_owned(),
        })
    }

    /// `Requesting → Failed → Idle`; nothing is appended.
    fn fail_cycle(&self, err: &GenerationError) {
        error!(error = %err, "line generation failed");
        let mut state = self.lock_state();
        state.transition(SequencerPhase::Failed);
        state.transition(SequencerPhase::Idle);
    }

    /// `Requesting → Appending → Idle`, steps 4 and 5 of the cycle.
    fn finish_cycle(&self, prepared: &PreparedCycle, text: String) -> Result<Line, SequenceError> {
        let mut state = self.lock_state();
        state.transition(SequencerPhase::Appending);

        let line = Line::new(
            text,
            prepared.position.stanza_index,
            prepared.role,
            self.clock.now(),
        );
        let appended = state.transcript.append(line.clone());
        state.transition(SequencerPhase::Idle);
        appended?;

        info!(
            line_id = %line.id,
            stanza = line.stanza_index,
            role = line.role.as_str(),
            line_number = state.transcript.len(),
            "appended line"
        );
        if prepared.position.position_in_stanza + 1 == prepared.plan.length {
            info!(stanza = prepared.plan.stanza_index, "stanza closed");
        }
        Ok(line)
    }

    /// Hands the line to the sink. Runs after the engine is back to `Idle`,
    /// so a slow or failing sink never holds up the next cycle.
    async fn dispatch(&self, line: &Line) -> Option<String> {
        match self.sink.persist(line).await {
            Ok(()) => None,
            Err(err) => {
                warn!(line_id = %line.id, error = %err, "failed to persist line");
                Some(err.to_string())
            }
        }
    }
}
