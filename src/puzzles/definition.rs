//! Puzzle definitions - static puzzle data.
//!
//! `PuzzleDefinition` holds everything that is fixed before play: title,
//! proof, and a [`PuzzleKind`] carrying the data its solving strategy needs.
//! Per-attempt data (cursor, generated coefficients, grid) lives in the
//! session, not here.

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Unique identifier for a puzzle definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PuzzleId(pub u32);

impl PuzzleId {
    /// Identifier given to puzzles promoted from the builder.
    pub const CUSTOM: PuzzleId = PuzzleId(u32::MAX);

    /// Create a new puzzle ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Puzzle({})", self.0)
    }
}

/// Difficulty tier shown in the puzzle list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    Apprentice,
    Adept,
    Master,
    GrandMaster,
    /// Assembled by the player in the builder.
    Builder,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Novice => "Novice",
            Difficulty::Apprentice => "Apprentice",
            Difficulty::Adept => "Adept",
            Difficulty::Master => "Master",
            Difficulty::GrandMaster => "Grand Master",
            Difficulty::Builder => "Builder",
        };
        f.write_str(name)
    }
}

/// Inclusive integer range for a binary search puzzle. Always `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct RawBounds {
    min: i64,
    max: i64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = String;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        if raw.min <= raw.max {
            Ok(Bounds { min: raw.min, max: raw.max })
        } else {
            Err(format!("bounds min {} exceeds max {}", raw.min, raw.max))
        }
    }
}

impl Bounds {
    /// Create new bounds. Panics if `min > max`.
    #[must_use]
    pub fn new(min: i64, max: i64) -> Self {
        assert!(min <= max, "Bounds min {min} exceeds max {max}");
        Self { min, max }
    }

    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Number of candidate values.
    #[must_use]
    pub const fn span(&self) -> u128 {
        self.max.abs_diff(self.min) as u128 + 1
    }

    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Failure inside a solver. Reported as the session's error outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("solver needs the player's input")]
    MissingInput,
    #[error("affine map with zero slope cannot be inverted")]
    NonInvertible,
    #[error("solver produced a non-finite value")]
    NonFinite,
    #[error("session scratch data was never generated")]
    MissingScratch,
}

/// Numeric solving strategy for scripted puzzles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Solver {
    /// Ignores input; the trick always lands on this value.
    Constant(f64),
    /// The player reports `y = slope·x + intercept`; recover `x`.
    InvertAffine { slope: f64, intercept: f64 },
}

impl Solver {
    /// Compute the revealed value.
    pub fn solve(&self, input: Option<f64>) -> Result<f64, SolveError> {
        let value = match *self {
            Solver::Constant(value) => value,
            Solver::InvertAffine { slope, intercept } => {
                let y = input.ok_or(SolveError::MissingInput)?;
                if slope == 0.0 {
                    return Err(SolveError::NonInvertible);
                }
                (y - intercept) / slope
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(SolveError::NonFinite)
        }
    }

    /// Whether the solver reads the player's input.
    #[must_use]
    pub fn needs_input(&self) -> bool {
        matches!(self, Solver::InvertAffine { .. })
    }
}

/// Kind tag, without the kind's data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindTag {
    Guided,
    InputSolve,
    SymbolGrid,
    BinarySearch,
    Dynamic,
}

impl std::fmt::Display for KindTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KindTag::Guided => "LINEAR",
            KindTag::InputSolve => "INPUT",
            KindTag::SymbolGrid => "SYMBOL",
            KindTag::BinarySearch => "BINARY",
            KindTag::Dynamic => "DYNAMIC",
        };
        f.write_str(name)
    }
}

/// Solving strategy together with the data it needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PuzzleKind {
    /// Fixed script; the result is a closed-form constant.
    Guided { steps: Vec<String>, solver: Solver },

    /// Fixed script ending in an input prompt; the solver inverts the
    /// player's reported total.
    InputSolve { steps: Vec<String>, solver: Solver },

    /// Digit-sum procedure; the answer is the target symbol generated at start.
    SymbolGrid {
        steps: Vec<String>,
        #[serde(deserialize_with = "non_empty_alphabet")]
        alphabet: Vec<char>,
    },

    /// Yes/no elimination over `bounds`. `intro` is shown before the first question.
    BinarySearch { intro: String, bounds: Bounds },

    /// Script and answer are generated when play starts. `steps` is empty
    /// until then.
    Dynamic { steps: Vec<String> },
}

fn non_empty_alphabet<'de, D>(deserializer: D) -> Result<Vec<char>, D::Error>
where
    D: Deserializer<'de>,
{
    let alphabet = Vec::<char>::deserialize(deserializer)?;
    if alphabet.is_empty() {
        return Err(de::Error::custom("symbol alphabet must not be empty"));
    }
    Ok(alphabet)
}

impl PuzzleKind {
    #[must_use]
    pub fn tag(&self) -> KindTag {
        match self {
            PuzzleKind::Guided { .. } => KindTag::Guided,
            PuzzleKind::InputSolve { .. } => KindTag::InputSolve,
            PuzzleKind::SymbolGrid { .. } => KindTag::SymbolGrid,
            PuzzleKind::BinarySearch { .. } => KindTag::BinarySearch,
            PuzzleKind::Dynamic { .. } => KindTag::Dynamic,
        }
    }

    /// Scripted instructions, `None` for binary search.
    #[must_use]
    pub fn steps(&self) -> Option<&[String]> {
        match self {
            PuzzleKind::Guided { steps, .. }
            | PuzzleKind::InputSolve { steps, .. }
            | PuzzleKind::SymbolGrid { steps, .. }
            | PuzzleKind::Dynamic { steps } => Some(steps.as_slice()),
            PuzzleKind::BinarySearch { .. } => None,
        }
    }
}

/// Static puzzle definition.
///
/// ## Example
///
/// ```
/// use mind_logic::puzzles::{Difficulty, PuzzleDefinition, PuzzleId, Solver};
///
/// let trick = PuzzleDefinition::guided(
///     PuzzleId::new(1),
///     "Plus Five",
///     ["Think of a number.", "Add 5.", "Subtract your ORIGINAL number."],
///     Solver::Constant(5.0),
/// )
/// .with_difficulty(Difficulty::Novice)
/// .with_proof("x + 5 - x = 5");
///
/// assert_eq!(trick.steps().map(<[String]>::len), Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    /// Unique identifier.
    pub id: PuzzleId,

    /// Display title.
    pub title: String,

    /// Difficulty tier.
    pub difficulty: Difficulty,

    /// Human-readable derivation shown after the reveal.
    pub proof: String,

    /// Solving strategy and its data.
    pub kind: PuzzleKind,
}

fn owned_steps<I, S>(steps: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    steps.into_iter().map(Into::into).collect()
}

impl PuzzleDefinition {
    /// Create a definition of any kind.
    #[must_use]
    pub fn new(id: PuzzleId, title: impl Into<String>, kind: PuzzleKind) -> Self {
        Self {
            id,
            title: title.into(),
            difficulty: Difficulty::Novice,
            proof: String::new(),
            kind,
        }
    }

    #[must_use]
    pub fn guided<I, S>(id: PuzzleId, title: impl Into<String>, steps: I, solver: Solver) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let steps = owned_steps(steps);
        Self::new(id, title, PuzzleKind::Guided { steps, solver })
    }

    #[must_use]
    pub fn input_solve<I, S>(id: PuzzleId, title: impl Into<String>, steps: I, solver: Solver) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let steps = owned_steps(steps);
        Self::new(id, title, PuzzleKind::InputSolve { steps, solver })
    }

    #[must_use]
    pub fn symbol_grid<I, S>(id: PuzzleId, title: impl Into<String>, steps: I, alphabet: Vec<char>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        assert!(!alphabet.is_empty(), "Symbol alphabet must not be empty");
        let steps = owned_steps(steps);
        Self::new(id, title, PuzzleKind::SymbolGrid { steps, alphabet })
    }

    #[must_use]
    pub fn binary_search(id: PuzzleId, title: impl Into<String>, intro: impl Into<String>, bounds: Bounds) -> Self {
        let intro = intro.into();
        Self::new(id, title, PuzzleKind::BinarySearch { intro, bounds })
    }

    #[must_use]
    pub fn dynamic(id: PuzzleId, title: impl Into<String>) -> Self {
        Self::new(id, title, PuzzleKind::Dynamic { steps: Vec::new() })
    }

    /// Set the difficulty (builder pattern).
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the proof text (builder pattern).
    #[must_use]
    pub fn with_proof(mut self, proof: impl Into<String>) -> Self {
        self.proof = proof.into();
        self
    }

    #[must_use]
    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    #[must_use]
    pub fn steps(&self) -> Option<&[String]> {
        self.kind.steps()
    }
}
