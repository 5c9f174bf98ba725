//! Engine configuration.
//!
//! - `GeneratorConfig`: Coefficient ranges and grid size for generated levels
//! - `RewardConfig`: XP awarded per puzzle kind
//! - `EngineConfig`: Combines all configuration
//!
//! Ranges are inclusive on both ends.

use serde::{Deserialize, Serialize};

use crate::puzzles::KindTag;

/// Inclusive integer range used for coefficient draws. Always `lo <= hi`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIntRange")]
pub struct IntRange {
    pub lo: i64,
    pub hi: i64,
}

#[derive(Deserialize)]
struct RawIntRange {
    lo: i64,
    hi: i64,
}

impl TryFrom<RawIntRange> for IntRange {
    type Error = String;

    fn try_from(raw: RawIntRange) -> Result<Self, Self::Error> {
        if raw.lo <= raw.hi {
            Ok(IntRange { lo: raw.lo, hi: raw.hi })
        } else {
            Err(format!("range lower bound {} exceeds upper bound {}", raw.lo, raw.hi))
        }
    }
}

impl IntRange {
    /// Create a new inclusive range.
    #[must_use]
    pub const fn new(lo: i64, hi: i64) -> Self {
        assert!(lo <= hi, "Range lower bound exceeds upper bound");
        Self { lo, hi }
    }

    /// Check if a value lies inside the range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (self.lo..=self.hi).contains(&value)
    }
}

/// Configuration for the level generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Range of the additive coefficient A in the dynamic puzzle.
    pub a_range: IntRange,

    /// Range of the multiplier B in the dynamic puzzle.
    pub b_range: IntRange,

    /// Number of cells in the symbol grid (cells are numbered from 0).
    pub grid_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            a_range: IntRange::new(2, 11),
            b_range: IntRange::new(2, 6),
            grid_size: 100,
        }
    }
}

impl GeneratorConfig {
    /// Set the range for coefficient A.
    #[must_use]
    pub fn with_a_range(mut self, lo: i64, hi: i64) -> Self {
        self.a_range = IntRange::new(lo, hi);
        self
    }

    /// Set the range for coefficient B.
    #[must_use]
    pub fn with_b_range(mut self, lo: i64, hi: i64) -> Self {
        self.b_range = IntRange::new(lo, hi);
        self
    }

    /// Set the number of symbol grid cells.
    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }
}

/// XP awarded when a puzzle of each kind finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    pub guided: u64,
    pub input_solve: u64,
    pub symbol_grid: u64,
    pub binary_search: u64,
    pub dynamic: u64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self::flat(50)
    }
}

impl RewardConfig {
    /// Same reward for every kind.
    #[must_use]
    pub const fn flat(amount: u64) -> Self {
        Self {
            guided: amount,
            input_solve: amount,
            symbol_grid: amount,
            binary_search: amount,
            dynamic: amount,
        }
    }

    /// Reward for a finished puzzle of the given kind.
    #[must_use]
    pub fn for_kind(&self, kind: KindTag) -> u64 {
        match kind {
            KindTag::Guided => self.guided,
            KindTag::InputSolve => self.input_solve,
            KindTag::SymbolGrid => self.symbol_grid,
            KindTag::BinarySearch => self.binary_search,
            KindTag::Dynamic => self.dynamic,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Level generator settings.
    pub generator: GeneratorConfig,

    /// XP rewards.
    pub reward: RewardConfig,

    /// Nominal step count used for binary search progress.
    /// Its true length is unknown until the search converges.
    pub binary_nominal_steps: u32,

    /// Seed for the default random source.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            reward: RewardConfig::default(),
            binary_nominal_steps: 7,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Set the generator configuration.
    #[must_use]
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Set the reward table.
    #[must_use]
    pub fn with_reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }

    /// Set the nominal binary search length.
    #[must_use]
    pub fn with_binary_nominal_steps(mut self, steps: u32) -> Self {
        assert!(steps > 0, "Nominal step count must be positive");
        self.binary_nominal_steps = steps;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
