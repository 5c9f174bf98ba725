//! Puzzle system: definitions, solvers, and the catalog.
//!
//! ## Key Types
//!
//! - `PuzzleId`: Identifier for puzzle definitions
//! - `PuzzleKind`: Tagged solving strategy with its data
//! - `PuzzleDefinition`: Static puzzle data
//! - `PuzzleCatalog`: Definition lookup and menu listing

pub mod catalog;
pub mod definition;

pub use catalog::{PuzzleCatalog, DEFAULT_SYMBOLS};
pub use definition::{
    Bounds, Difficulty, KindTag, PuzzleDefinition, PuzzleId, PuzzleKind, SolveError, Solver,
};
