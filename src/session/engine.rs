//! The session state machine.
//!
//! ```text
//! start ─┬─> Stepping ──advance──> Stepping ... ─┬─> Finished
//!        │                                       ├─> AwaitingInput ──submit_input──> Finished
//!        │                                       └─> AwaitingSymbolAck ──acknowledge_symbol──> Finished
//!        └─> BinaryIntro ──advance──> AwaitingAnswer ──answer_binary──> ... ──> Finished
//! ```
//!
//! Every transition is synchronous. A rejected transition returns an error
//! and leaves the session untouched.

use thiserror::Error;

use super::state::{Outcome, Phase, Scratch, SessionState};
use super::view::SessionView;
use crate::core::{EngineConfig, PuzzleRng, RandomSource};
use crate::generator::LevelGenerator;
use crate::puzzles::{KindTag, PuzzleDefinition, PuzzleKind, SolveError, Solver};
use crate::score::{MemoryScoreStore, ScoreStore};
use crate::search::{BinarySearchController, Query};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The submitted text is not a finite number. Resubmit.
    #[error("enter a number (got {0:?})")]
    InvalidInput(String),
    #[error("{operation} is not valid in phase {phase:?}")]
    WrongPhase { operation: &'static str, phase: Phase },
}

/// Drives puzzle sessions and awards XP.
///
/// ## Example
///
/// ```
/// use mind_logic::core::EngineConfig;
/// use mind_logic::puzzles::{PuzzleCatalog, PuzzleId};
/// use mind_logic::session::{Outcome, SessionEngine};
///
/// let catalog = PuzzleCatalog::builtin();
/// let mut engine = SessionEngine::new(EngineConfig::default());
///
/// let mut session = engine.start(catalog.get(PuzzleId::new(1)).unwrap());
/// while !session.is_finished() {
///     engine.advance(&mut session).unwrap();
/// }
/// assert_eq!(session.outcome(), Some(&Outcome::Number(5.0)));
/// assert_eq!(engine.score(), 50);
/// ```
#[derive(Debug)]
pub struct SessionEngine<R = PuzzleRng, S = MemoryScoreStore> {
    config: EngineConfig,
    generator: LevelGenerator,
    rng: R,
    store: S,
    score: u64,
}

impl SessionEngine {
    /// Engine with a seeded ChaCha source and an in-memory score.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = PuzzleRng::new(config.seed);
        Self::with_parts(config, rng, MemoryScoreStore::default())
    }
}

impl<R: RandomSource, S: ScoreStore> SessionEngine<R, S> {
    /// Engine with an injected random source and score store.
    ///
    /// The stored score is loaded here and never again.
    pub fn with_parts(config: EngineConfig, rng: R, store: S) -> Self {
        let score = store.load();
        let generator = LevelGenerator::new(config.generator.clone());
        Self {
            config,
            generator,
            rng,
            store,
            score,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Accumulated XP.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Begin a fresh attempt at `definition`.
    ///
    /// Dynamic and symbol puzzles are generated here, so each attempt differs.
    pub fn start(&mut self, definition: &PuzzleDefinition) -> SessionState {
        let template = definition.clone();
        let mut definition = definition.clone();
        let mut scratch = Scratch::Empty;
        let mut cursor = 0;
        let mut phase = Phase::Stepping;

        match &mut definition.kind {
            PuzzleKind::Guided { .. } | PuzzleKind::InputSolve { .. } => {}
            PuzzleKind::Dynamic { steps } => {
                let level = self.generator.generate_dynamic(&mut self.rng);
                *steps = level.steps;
                definition.proof = level.proof;
                scratch = Scratch::Dynamic { a: level.a, b: level.b };
            }
            PuzzleKind::SymbolGrid { alphabet, .. } => {
                match self.generator.generate_symbol_grid(alphabet.as_slice(), &mut self.rng) {
                    Some(grid) => scratch = Scratch::SymbolGrid(grid),
                    None => tracing::warn!(puzzle = %definition.id, "symbol grid could not be generated"),
                }
            }
            PuzzleKind::BinarySearch { bounds, .. } => {
                scratch = Scratch::BinarySearch(BinarySearchController::new(*bounds));
                cursor = -1;
                phase = Phase::BinaryIntro;
            }
        }

        let total_steps = match definition.steps() {
            Some(steps) => steps.len() as u32,
            None => self.config.binary_nominal_steps,
        };

        tracing::info!(puzzle = %definition.id, kind = %definition.tag(), "session started");

        let mut session = SessionState {
            template,
            definition,
            cursor,
            total_steps,
            phase,
            scratch,
            input: None,
            outcome: None,
        };
        if phase == Phase::Stepping {
            session.phase = self.settle(&mut session);
        }
        session
    }

    /// Fresh attempt at the same puzzle, regenerating any random content.
    pub fn restart(&mut self, session: &SessionState) -> SessionState {
        self.start(&session.template)
    }

    /// Show the next step, or begin a binary search after its intro.
    pub fn advance(&mut self, session: &mut SessionState) -> Result<Phase, SessionError> {
        match session.phase {
            Phase::Stepping => {
                session.cursor += 1;
                session.phase = self.settle(session);
            }
            Phase::BinaryIntro => {
                session.cursor = 0;
                session.phase = self.ask(session);
            }
            phase => {
                return Err(SessionError::WrongPhase {
                    operation: "advance",
                    phase,
                })
            }
        }
        tracing::debug!(cursor = session.cursor, phase = ?session.phase, "advanced");
        Ok(session.phase)
    }

    /// Submit the player's current total for an input puzzle.
    pub fn submit_input(&mut self, session: &mut SessionState, raw: &str) -> Result<Phase, SessionError> {
        if session.phase != Phase::AwaitingInput {
            return Err(SessionError::WrongPhase {
                operation: "submit_input",
                phase: session.phase,
            });
        }

        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SessionError::InvalidInput(raw.to_string()))?;

        session.input = Some(value);
        session.cursor += 1;
        session.phase = self.finish(session);
        Ok(session.phase)
    }

    /// Answer "is your number greater than mid?".
    pub fn answer_binary(&mut self, session: &mut SessionState, is_greater: bool) -> Result<Phase, SessionError> {
        match (session.phase, &mut session.scratch) {
            (Phase::AwaitingAnswer { mid }, Scratch::BinarySearch(search)) => {
                tracing::debug!(mid, is_greater, "binary answer");
                search.answer(is_greater);
            }
            (phase, _) => {
                return Err(SessionError::WrongPhase {
                    operation: "answer_binary",
                    phase,
                })
            }
        }
        session.cursor += 1;
        session.phase = self.ask(session);
        Ok(session.phase)
    }

    /// Confirm the player has read their symbol.
    pub fn acknowledge_symbol(&mut self, session: &mut SessionState) -> Result<Phase, SessionError> {
        if session.phase != Phase::AwaitingSymbolAck {
            return Err(SessionError::WrongPhase {
                operation: "acknowledge_symbol",
                phase: session.phase,
            });
        }
        session.cursor += 1;
        session.phase = self.finish(session);
        Ok(session.phase)
    }

    /// Presentation payload for the session as it stands.
    #[must_use]
    pub fn view(&self, session: &SessionState) -> SessionView {
        SessionView::of(session)
    }

    /// Phase for the scripted step under the cursor, finishing past the end.
    fn settle(&mut self, session: &mut SessionState) -> Phase {
        let len = session.definition.steps().map_or(0, <[String]>::len) as i64;

        if session.cursor >= len {
            return self.finish(session);
        }
        if session.cursor < len - 1 {
            return Phase::Stepping;
        }
        match session.definition.tag() {
            KindTag::InputSolve => Phase::AwaitingInput,
            KindTag::SymbolGrid => Phase::AwaitingSymbolAck,
            _ => Phase::Stepping,
        }
    }

    /// Next binary question, finishing once the range has collapsed.
    fn ask(&mut self, session: &mut SessionState) -> Phase {
        let query = match &mut session.scratch {
            Scratch::BinarySearch(search) => Some(search.query()),
            _ => None,
        };
        match query {
            Some(Query::Ask { mid }) => Phase::AwaitingAnswer { mid },
            Some(Query::Resolved(_)) | None => self.finish(session),
        }
    }

    /// Compute the outcome and award XP. Called once per session.
    fn finish(&mut self, session: &mut SessionState) -> Phase {
        let outcome = Self::reveal(session).unwrap_or_else(|err| {
            tracing::warn!(puzzle = %session.definition.id, %err, "solve failed");
            Outcome::Error(err)
        });

        let reward = self.config.reward.for_kind(session.definition.tag());
        self.score += reward;
        self.store.save(self.score);

        tracing::info!(
            puzzle = %session.definition.id,
            %outcome,
            reward,
            score = self.score,
            "session finished"
        );

        session.outcome = Some(outcome);
        Phase::Finished
    }

    fn reveal(session: &SessionState) -> Result<Outcome, SolveError> {
        match (&session.definition.kind, &session.scratch) {
            (PuzzleKind::Guided { solver, .. }, _) => solver.solve(None).map(Outcome::Number),
            (PuzzleKind::InputSolve { solver, .. }, _) => solver.solve(session.input).map(Outcome::Number),
            (PuzzleKind::Dynamic { .. }, Scratch::Dynamic { a, b }) => {
                Solver::Constant((a * b) as f64).solve(None).map(Outcome::Number)
            }
            (PuzzleKind::SymbolGrid { .. }, Scratch::SymbolGrid(grid)) => Ok(Outcome::Symbol(grid.target())),
            (PuzzleKind::BinarySearch { .. }, Scratch::BinarySearch(search)) if search.is_resolved() => {
                Ok(Outcome::Number(search.min() as f64))
            }
            (PuzzleKind::Dynamic { .. } | PuzzleKind::SymbolGrid { .. } | PuzzleKind::BinarySearch { .. }, _) => {
                Err(SolveError::MissingScratch)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles::{Bounds, PuzzleId};

    fn engine() -> SessionEngine {
        SessionEngine::new(EngineConfig::default())
    }

    #[test]
    fn test_guided_steps_through() {
        let mut engine = engine();
        let def = PuzzleDefinition::guided(PuzzleId::new(1), "G", ["a", "b", "c"], Solver::Constant(5.0));
        let mut session = engine.start(&def);

        assert_eq!(session.cursor(), 0);
        assert_eq!(session.phase(), Phase::Stepping);
        assert_eq!(engine.advance(&mut session), Ok(Phase::Stepping));
        assert_eq!(engine.advance(&mut session), Ok(Phase::Stepping));
        assert_eq!(session.current_step(), Some("c"));
        assert_eq!(engine.advance(&mut session), Ok(Phase::Finished));
        assert_eq!(session.outcome(), Some(&Outcome::Number(5.0)));
    }

    #[test]
    fn test_advance_after_finish_rejected() {
        let mut engine = engine();
        let def = PuzzleDefinition::guided(PuzzleId::new(1), "G", ["only"], Solver::Constant(1.0));
        let mut session = engine.start(&def);
        engine.advance(&mut session).unwrap();

        assert_eq!(
            engine.advance(&mut session),
            Err(SessionError::WrongPhase { operation: "advance", phase: Phase::Finished })
        );
        assert_eq!(engine.score(), 50);
    }

    #[test]
    fn test_empty_script_finishes_on_start() {
        let mut engine = engine();
        let def = PuzzleDefinition::guided(PuzzleId::new(1), "Empty", Vec::<String>::new(), Solver::Constant(3.0));
        let session = engine.start(&def);

        assert!(session.is_finished());
        assert_eq!(session.outcome(), Some(&Outcome::Number(3.0)));
    }

    #[test]
    fn test_single_step_input_puzzle_awaits_input_immediately() {
        let mut engine = engine();
        let def = PuzzleDefinition::input_solve(
            PuzzleId::new(2),
            "I",
            ["Input your number:"],
            Solver::InvertAffine { slope: 1.0, intercept: 0.0 },
        );
        let session = engine.start(&def);
        assert_eq!(session.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn test_wrong_phase_leaves_state_unchanged() {
        let mut engine = engine();
        let def = PuzzleDefinition::guided(PuzzleId::new(1), "G", ["a", "b"], Solver::Constant(1.0));
        let mut session = engine.start(&def);

        assert!(matches!(
            engine.submit_input(&mut session, "3"),
            Err(SessionError::WrongPhase { .. })
        ));
        assert!(engine.answer_binary(&mut session, true).is_err());
        assert!(engine.acknowledge_symbol(&mut session).is_err());
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.phase(), Phase::Stepping);
    }

    #[test]
    fn test_solve_failure_becomes_error_outcome() {
        let mut engine = engine();
        let def = PuzzleDefinition::input_solve(
            PuzzleId::new(2),
            "Broken",
            ["Input:"],
            Solver::InvertAffine { slope: 0.0, intercept: 1.0 },
        );
        let mut session = engine.start(&def);

        assert_eq!(engine.submit_input(&mut session, "4"), Ok(Phase::Finished));
        assert_eq!(session.outcome(), Some(&Outcome::Error(SolveError::NonInvertible)));
        assert_eq!(engine.store().saves(), 1);
    }

    #[test]
    fn test_binary_intro_progress() {
        let mut engine = engine();
        let def = PuzzleDefinition::binary_search(PuzzleId::new(4), "B", "Think.", Bounds::new(1, 100));
        let mut session = engine.start(&def);

        assert_eq!(session.phase(), Phase::BinaryIntro);
        assert_eq!(session.cursor(), -1);
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.instruction(), "Think.");

        assert_eq!(engine.advance(&mut session), Ok(Phase::AwaitingAnswer { mid: 50 }));
        assert!((session.progress() - 1.0 / 7.0).abs() < 1e-9);
        assert_eq!(session.instruction(), "Is your number greater than 50?");
    }

    #[test]
    fn test_singleton_binary_finishes_after_intro() {
        let mut engine = engine();
        let def = PuzzleDefinition::binary_search(PuzzleId::new(4), "B", "Think.", Bounds::new(8, 8));
        let mut session = engine.start(&def);

        assert_eq!(engine.advance(&mut session), Ok(Phase::Finished));
        assert_eq!(session.outcome(), Some(&Outcome::Number(8.0)));
    }

    #[test]
    fn test_binary_over_full_i64_range() {
        let mut engine = engine();
        let def = PuzzleDefinition::binary_search(PuzzleId::new(4), "B", "Think.", Bounds::new(i64::MIN, i64::MAX));
        let mut session = engine.start(&def);

        let secret = 0;
        let mut phase = engine.advance(&mut session).unwrap();
        while let Phase::AwaitingAnswer { mid } = phase {
            phase = engine.answer_binary(&mut session, secret > mid).unwrap();
        }
        assert_eq!(phase, Phase::Finished);
        assert_eq!(session.outcome(), Some(&Outcome::Number(0.0)));
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn test_empty_alphabet_reports_error_outcome() {
        let mut engine = engine();
        let kind = PuzzleKind::SymbolGrid {
            steps: vec!["Look up your number.".to_string()],
            alphabet: Vec::new(),
        };
        let def = PuzzleDefinition::new(PuzzleId::new(3), "S", kind);
        let mut session = engine.start(&def);

        assert_eq!(session.phase(), Phase::AwaitingSymbolAck);
        assert!(session.symbol_grid().is_none());
        assert_eq!(engine.acknowledge_symbol(&mut session), Ok(Phase::Finished));
        assert_eq!(session.outcome(), Some(&Outcome::Error(SolveError::MissingScratch)));
    }
}
