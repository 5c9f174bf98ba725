//! Presentation payload.
//!
//! Renderers receive a `SessionView` after every transition. The engine
//! never renders anything itself.

use super::state::{Outcome, Phase, SessionState};

/// Which player controls are live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    /// `SessionEngine::advance` is accepted.
    pub next: bool,
    /// `SessionEngine::submit_input` is accepted.
    pub input: bool,
    /// `SessionEngine::answer_binary` is accepted.
    pub binary_yes_no: bool,
    /// The grid is shown and `SessionEngine::acknowledge_symbol` is accepted.
    pub symbol_grid: bool,
}

/// Snapshot of a session for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub title: String,
    pub instruction: String,
    pub progress: f64,
    pub controls: Controls,
    /// Caption for the primary button, when it is shown. The button drives
    /// whichever of `next`, `input` or `symbol_grid` is live.
    pub action_label: Option<&'static str>,
    /// Grid cells, only while the grid is visible.
    pub symbol_grid: Option<Vec<char>>,
    pub outcome: Option<Outcome>,
}

impl SessionView {
    /// Build the view for the session's current phase.
    #[must_use]
    pub fn of(session: &SessionState) -> Self {
        let phase = session.phase();
        let is_last = session
            .definition()
            .steps()
            .is_some_and(|steps| session.cursor() + 1 == steps.len() as i64);

        let controls = Controls {
            next: matches!(phase, Phase::Stepping | Phase::BinaryIntro),
            input: phase == Phase::AwaitingInput,
            binary_yes_no: matches!(phase, Phase::AwaitingAnswer { .. }),
            symbol_grid: phase == Phase::AwaitingSymbolAck,
        };

        let action_label = match phase {
            Phase::BinaryIntro => Some("START"),
            Phase::AwaitingInput => Some("CALCULATE"),
            Phase::AwaitingSymbolAck => Some("REVEAL"),
            Phase::Stepping if is_last => Some("REVEAL"),
            Phase::Stepping => Some("NEXT STEP"),
            _ => None,
        };

        let symbol_grid = controls
            .symbol_grid
            .then(|| session.symbol_grid().map(|grid| grid.cells().to_vec()))
            .flatten();

        Self {
            title: session.definition().title.clone(),
            instruction: session.instruction(),
            progress: session.progress(),
            controls,
            action_label,
            symbol_grid,
            outcome: session.outcome().cloned(),
        }
    }
}
