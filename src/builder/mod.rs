//! Player-authored puzzles.
//!
//! `BuilderValidator` owns a chain while the player edits it and re-probes
//! after every edit. Only a chain that provably ignores the secret number can
//! be promoted into a playable guided puzzle.

use thiserror::Error;

use crate::affine::{probe, Chain, Classification, Operation, Operator, ProbeError};
use crate::puzzles::{Difficulty, PuzzleDefinition, PuzzleId, Solver};

/// Opening instruction of every promoted puzzle.
pub const OPENING_STEP: &str = "Think of a number.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("operand {0} is not a finite number")]
    NonFiniteOperand(f64),
    #[error("no operation at position {index} (chain has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("trick must result in a constant number")]
    NotInvariant,
    #[error("chain cannot be evaluated: {0}")]
    InvalidChain(#[from] ProbeError),
}

/// Result of probing the current chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChainStatus {
    /// Always yields `constant`, whatever the secret.
    Invariant { constant: f64 },
    /// The secret still affects the result.
    Variant,
    /// The chain failed to evaluate at a sample point.
    Invalid(ProbeError),
}

impl ChainStatus {
    #[must_use]
    pub fn is_invariant(&self) -> bool {
        matches!(self, ChainStatus::Invariant { .. })
    }

    #[must_use]
    pub fn constant(&self) -> Option<f64> {
        match self {
            ChainStatus::Invariant { constant } => Some(*constant),
            _ => None,
        }
    }
}

fn status_of(chain: &Chain) -> ChainStatus {
    match probe(|x| chain.evaluate(x)) {
        Ok(Classification::Invariant { constant }) => ChainStatus::Invariant { constant },
        Ok(Classification::Variant { .. }) => ChainStatus::Variant,
        Err(err) => ChainStatus::Invalid(err),
    }
}

/// Incremental chain editor with validation.
///
/// ## Example
///
/// ```
/// use mind_logic::affine::Operator;
/// use mind_logic::builder::BuilderValidator;
///
/// let mut builder = BuilderValidator::new();
/// builder.append_operation(Operator::Mul, 2.0).unwrap();
/// builder.append_operation(Operator::Add, 10.0).unwrap();
/// assert!(!builder.current_status().is_invariant());
///
/// builder.append_operation(Operator::Div, 2.0).unwrap();
/// builder.append_operation(Operator::SubtractOriginal, 1.0).unwrap();
/// assert_eq!(builder.current_status().constant(), Some(5.0));
///
/// let puzzle = builder.promote().unwrap();
/// assert_eq!(puzzle.steps().unwrap()[1], "Multiply by 2");
/// ```
#[derive(Clone, Debug)]
pub struct BuilderValidator {
    chain: Chain,
    status: ChainStatus,
}

impl Default for BuilderValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderValidator {
    /// Start with an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::from_chain(Chain::new())
    }

    /// Take ownership of an existing chain.
    #[must_use]
    pub fn from_chain(chain: Chain) -> Self {
        let status = status_of(&chain);
        Self { chain, status }
    }

    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Append a step. Rejected operands leave the chain untouched.
    pub fn append_operation(&mut self, operator: Operator, operand: f64) -> Result<ChainStatus, BuilderError> {
        if !operand.is_finite() {
            return Err(BuilderError::NonFiniteOperand(operand));
        }
        if operator == Operator::Div && operand == 0.0 {
            return Err(BuilderError::DivisionByZero);
        }

        self.chain.push(Operation::new(operator, operand));
        Ok(self.revalidate())
    }

    /// Remove the step at `index`.
    pub fn remove_operation(&mut self, index: usize) -> Result<ChainStatus, BuilderError> {
        let len = self.chain.len();
        self.chain
            .remove(index)
            .ok_or(BuilderError::IndexOutOfRange { index, len })?;
        Ok(self.revalidate())
    }

    /// Status of the chain as of the last edit.
    #[must_use]
    pub fn current_status(&self) -> ChainStatus {
        self.status
    }

    /// Turn the chain into a guided puzzle.
    ///
    /// Fails with `NotInvariant` while the secret still affects the result.
    pub fn promote(&self) -> Result<PuzzleDefinition, BuilderError> {
        let constant = match self.status {
            ChainStatus::Invariant { constant } => constant,
            ChainStatus::Variant => return Err(BuilderError::NotInvariant),
            ChainStatus::Invalid(err) => return Err(err.into()),
        };

        let steps = std::iter::once(OPENING_STEP.to_string())
            .chain(self.chain.operations().iter().map(Operation::describe));

        let mut proof = String::from("Custom User Algorithm:\nLet x = number");
        for (i, op) in self.chain.operations().iter().enumerate() {
            proof.push_str(&format!("\n{}. {}", i + 1, op));
        }
        proof.push_str(&format!("\nf(x) = 0x + {constant} = {constant}"));

        tracing::info!(steps = self.chain.len(), constant, "promoted builder chain");

        Ok(PuzzleDefinition::guided(PuzzleId::CUSTOM, "Your Logic", steps, Solver::Constant(constant))
            .with_difficulty(Difficulty::Builder)
            .with_proof(proof))
    }

    fn revalidate(&mut self) -> ChainStatus {
        self.status = status_of(&self.chain);
        tracing::debug!(len = self.chain.len(), status = ?self.status, "builder chain revalidated");
        self.status
    }
}
