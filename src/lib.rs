//! # mind-logic
//!
//! A session engine for "mind-reading" arithmetic puzzles: the player follows
//! a procedure and the engine reveals a value the player never disclosed.
//!
//! ## Design Principles
//!
//! 1. **Tagged Kinds**: Every puzzle is one `PuzzleKind` variant, matched
//!    exhaustively by the engine. There is no string dispatch.
//!
//! 2. **Explicit Sessions**: Each attempt is a `SessionState` owned by the
//!    caller and passed to engine transitions. No ambient state.
//!
//! 3. **Injectable Randomness**: Generated levels draw from a `RandomSource`,
//!    so a fixed seed gives fixed coefficients and symbols.
//!
//! ## Modules
//!
//! - `core`: RNG and configuration
//! - `affine`: Operation chains and the two-point invariance probe
//! - `puzzles`: Definitions, solvers, and the built-in catalog
//! - `generator`: Per-attempt dynamic and symbol-grid levels
//! - `search`: Yes/no binary search controller
//! - `builder`: Player-authored chains and promotion to puzzles
//! - `session`: The state machine and its presentation payload
//! - `score`: XP persistence boundary

pub mod core;
pub mod affine;
pub mod puzzles;
pub mod generator;
pub mod search;
pub mod builder;
pub mod session;
pub mod score;

// Re-export commonly used types
pub use crate::core::{EngineConfig, GeneratorConfig, PuzzleRng, RandomSource, RewardConfig};

pub use crate::affine::{probe, Chain, Classification, Operation, Operator, ProbeError};

pub use crate::puzzles::{
    Bounds, Difficulty, KindTag, PuzzleCatalog, PuzzleDefinition, PuzzleId, PuzzleKind, SolveError, Solver,
};

pub use crate::generator::{DynamicLevel, LevelGenerator, SymbolGrid};

pub use crate::search::{BinarySearchController, Query};

pub use crate::builder::{BuilderError, BuilderValidator, ChainStatus};

pub use crate::session::{Controls, Outcome, Phase, SessionEngine, SessionError, SessionState, SessionView};

pub use crate::score::{MemoryScoreStore, ScoreStore};
