//! Puzzle sessions.
//!
//! ## Key Types
//!
//! - `SessionEngine`: Owns randomness and score, runs transitions
//! - `SessionState`: One attempt at one puzzle
//! - `Phase`: Where an attempt is in its lifecycle
//! - `SessionView`: What a renderer needs after each transition
//!
//! The engine never holds a session itself. Callers keep the `SessionState`
//! and pass it to each transition; starting a new attempt simply replaces it.

mod engine;
mod state;
mod view;

pub use engine::{SessionEngine, SessionError};
pub use state::{Outcome, Phase, Scratch, SessionState};
pub use view::{Controls, SessionView};
