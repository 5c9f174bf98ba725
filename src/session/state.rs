//! Per-attempt session state.
//!
//! A `SessionState` is created by `SessionEngine::start`, mutated only by the
//! engine's transitions, and dropped when the player leaves or restarts.

use serde::{Deserialize, Serialize};

use crate::generator::SymbolGrid;
use crate::puzzles::{PuzzleDefinition, PuzzleKind, SolveError};
use crate::search::BinarySearchController;

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Showing a scripted step; `advance` moves on.
    Stepping,
    /// Last step of an input puzzle; waiting for the player's total.
    AwaitingInput,
    /// Last step of a symbol puzzle; the grid is shown.
    AwaitingSymbolAck,
    /// Binary search intro; `advance` asks the first question.
    BinaryIntro,
    /// Waiting for a yes/no answer about `mid`.
    AwaitingAnswer { mid: i64 },
    /// Terminal; the outcome is set.
    Finished,
}

/// Kind-specific working data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Scratch {
    /// Guided and input puzzles need none.
    Empty,
    /// Generated cancellation coefficients.
    Dynamic { a: i64, b: i64 },
    /// Generated target symbol and grid.
    SymbolGrid(SymbolGrid),
    /// Search bounds and outstanding midpoint.
    BinarySearch(BinarySearchController),
}

/// Revealed result of a finished session.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Number(f64),
    Symbol(char),
    /// The solver failed; the attempt can be restarted.
    Error(SolveError),
}

impl Outcome {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Outcome::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Number(n) => write!(f, "{n}"),
            Outcome::Symbol(s) => write!(f, "{s}"),
            Outcome::Error(_) => f.write_str("Error"),
        }
    }
}

/// State of one puzzle attempt.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Definition as selected, before generation. Used for restarts.
    pub(crate) template: PuzzleDefinition,
    /// Definition with generated steps and proof filled in.
    pub(crate) definition: PuzzleDefinition,
    /// Index into the script; -1 before a binary search begins.
    pub(crate) cursor: i64,
    pub(crate) total_steps: u32,
    pub(crate) phase: Phase,
    pub(crate) scratch: Scratch,
    pub(crate) input: Option<f64>,
    pub(crate) outcome: Option<Outcome>,
}

impl SessionState {
    /// The active definition.
    #[must_use]
    pub fn definition(&self) -> &PuzzleDefinition {
        &self.definition
    }

    #[must_use]
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn scratch(&self) -> &Scratch {
        &self.scratch
    }

    /// Total the player submitted, for input puzzles.
    #[must_use]
    pub fn input(&self) -> Option<f64> {
        self.input
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Generated symbol grid, if this is a symbol puzzle.
    #[must_use]
    pub fn symbol_grid(&self) -> Option<&SymbolGrid> {
        match &self.scratch {
            Scratch::SymbolGrid(grid) => Some(grid),
            _ => None,
        }
    }

    /// `(cursor + 1) / total_steps`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_steps == 0 {
            return 1.0;
        }
        ((self.cursor + 1) as f64 / f64::from(self.total_steps)).clamp(0.0, 1.0)
    }

    /// Scripted step under the cursor.
    #[must_use]
    pub fn current_step(&self) -> Option<&str> {
        let steps = self.definition.steps()?;
        let idx = usize::try_from(self.cursor).ok()?;
        steps.get(idx).map(String::as_str)
    }

    /// Text the player should be reading now.
    #[must_use]
    pub fn instruction(&self) -> String {
        match (self.phase, &self.definition.kind) {
            (Phase::BinaryIntro, PuzzleKind::BinarySearch { intro, .. }) => intro.clone(),
            (Phase::AwaitingAnswer { mid }, _) => format!("Is your number greater than {mid}?"),
            (Phase::Finished, _) => self.definition.proof.clone(),
            _ => self.current_step().unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Number(5.0).to_string(), "5");
        assert_eq!(Outcome::Number(2.5).to_string(), "2.5");
        assert_eq!(Outcome::Symbol('⚓').to_string(), "⚓");
        assert_eq!(Outcome::Error(SolveError::NonFinite).to_string(), "Error");
    }

    #[test]
    fn test_outcome_accessors() {
        assert_eq!(Outcome::Number(10.0).as_number(), Some(10.0));
        assert_eq!(Outcome::Symbol('☮').as_number(), None);
        assert!(Outcome::Error(SolveError::MissingInput).is_error());
    }
}
