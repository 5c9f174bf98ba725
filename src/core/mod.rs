//! Core engine types: randomness and configuration.
//!
//! These are shared by the generator and the session engine and carry no
//! puzzle-specific logic.

pub mod config;
pub mod rng;

pub use config::{EngineConfig, GeneratorConfig, IntRange, RewardConfig};
pub use rng::{PuzzleRng, RandomSource};
