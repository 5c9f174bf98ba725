//! Per-attempt level generation.
//!
//! Dynamic and symbol-grid puzzles are instantiated when play starts, not
//! when the catalog loads, so every playthrough differs.
//!
//! - **Dynamic**: `(x + A)·B − B·x = A·B`. The identity holds by
//!   construction, so nothing is sampled or probed.
//! - **Symbol grid**: `(10a + b) − (a + b) = 9a`, always a multiple of 9 in
//!   `[0, 81]`. Every multiple of 9 shows the target symbol.

use serde::{Deserialize, Serialize};

use crate::affine::{Chain, Operation};
use crate::core::{GeneratorConfig, RandomSource};

/// Coefficients and script of a generated cancellation puzzle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DynamicLevel {
    /// Added to the secret number.
    pub a: i64,
    /// Multiplier; also the count of originals subtracted.
    pub b: i64,
    pub steps: Vec<String>,
    pub proof: String,
}

impl DynamicLevel {
    /// Build the script for coefficients `a` and `b`.
    #[must_use]
    pub fn new(a: i64, b: i64) -> Self {
        let ab = a * b;
        let steps = vec![
            "Think of a number.".to_string(),
            format!("Add {a} to it."),
            format!("Multiply the result by {b}."),
            format!("Subtract {b} times your ORIGINAL number."),
        ];
        let proof = format!(
            "Generated at Runtime:\n(x + {a}) * {b} - {b}x\n= {b}x + {ab} - {b}x\n= {ab}"
        );
        Self { a, b, steps, proof }
    }

    /// The value every player ends on.
    #[must_use]
    pub fn answer(&self) -> f64 {
        (self.a * self.b) as f64
    }

    /// The scripted procedure as an operation chain.
    #[must_use]
    pub fn chain(&self) -> Chain {
        Chain::new()
            .then(Operation::add(self.a as f64))
            .then(Operation::mul(self.b as f64))
            .then(Operation::subtract_original(self.b as f64))
    }
}

/// Number-to-symbol table for the symbol oracle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolGrid {
    target: char,
    cells: Vec<char>,
}

impl SymbolGrid {
    /// The symbol on every multiple of 9.
    #[must_use]
    pub fn target(&self) -> char {
        self.target
    }

    /// Symbol shown next to `n`, `None` past the end of the grid.
    #[must_use]
    pub fn symbol_at(&self, n: usize) -> Option<char> {
        self.cells.get(n).copied()
    }

    /// All cells, indexed by number.
    #[must_use]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Instantiates randomized levels.
#[derive(Clone, Debug, Default)]
pub struct LevelGenerator {
    config: GeneratorConfig,
}

impl LevelGenerator {
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draw A and B uniformly from their configured ranges.
    pub fn generate_dynamic<R: RandomSource>(&self, rng: &mut R) -> DynamicLevel {
        let a = rng.uniform_int(self.config.a_range.lo, self.config.a_range.hi);
        let b = rng.uniform_int(self.config.b_range.lo, self.config.b_range.hi);
        tracing::debug!(a, b, "generated dynamic level");
        DynamicLevel::new(a, b)
    }

    /// Pick a target and fill the grid, `None` for an empty alphabet.
    ///
    /// Non-multiples of 9 draw any symbol, the target included. The player
    /// only ever reads a multiple of 9, so such collisions are harmless.
    pub fn generate_symbol_grid<R: RandomSource>(&self, alphabet: &[char], rng: &mut R) -> Option<SymbolGrid> {
        let target = *rng.choose(alphabet)?;
        let cells = (0..self.config.grid_size)
            .map(|i| if i % 9 == 0 { Some(target) } else { rng.choose(alphabet).copied() })
            .collect::<Option<Vec<_>>>()?;

        tracing::debug!(%target, size = self.config.grid_size, "generated symbol grid");
        Some(SymbolGrid { target, cells })
    }
}
