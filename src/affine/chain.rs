//! Chains of affine operations.
//!
//! A chain is applied to the player's secret number `x` one operation at a
//! time. Every operation is affine in `x`, so the whole chain collapses to
//! `m·x + k`.

use serde::{Deserialize, Serialize};

use super::probe::ProbeError;

/// Operator of a single chain step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `v + c`
    Add,
    /// `v - c`
    Sub,
    /// `v * c`
    Mul,
    /// `v / c`
    Div,
    /// `v - c·x`, where `x` is the original number.
    SubtractOriginal,
}

/// One step of a chain: an operator and its constant operand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub operator: Operator,
    pub operand: f64,
}

impl Operation {
    #[must_use]
    pub const fn new(operator: Operator, operand: f64) -> Self {
        Self { operator, operand }
    }

    #[must_use]
    pub const fn add(operand: f64) -> Self {
        Self::new(Operator::Add, operand)
    }

    #[must_use]
    pub const fn sub(operand: f64) -> Self {
        Self::new(Operator::Sub, operand)
    }

    #[must_use]
    pub const fn mul(operand: f64) -> Self {
        Self::new(Operator::Mul, operand)
    }

    #[must_use]
    pub const fn div(operand: f64) -> Self {
        Self::new(Operator::Div, operand)
    }

    /// Subtract `times` copies of the original number.
    #[must_use]
    pub const fn subtract_original(times: f64) -> Self {
        Self::new(Operator::SubtractOriginal, times)
    }

    /// Apply this step to the running value `v` for original number `x`.
    ///
    /// `step` is only used to locate a division by zero.
    pub fn apply(&self, v: f64, x: f64, step: usize) -> Result<f64, ProbeError> {
        let c = self.operand;
        match self.operator {
            Operator::Add => Ok(v + c),
            Operator::Sub => Ok(v - c),
            Operator::Mul => Ok(v * c),
            Operator::Div if c == 0.0 => Err(ProbeError::DivisionByZero { step }),
            Operator::Div => Ok(v / c),
            Operator::SubtractOriginal => Ok(v - c * x),
        }
    }

    /// Player-facing instruction for this step.
    #[must_use]
    pub fn describe(&self) -> String {
        let c = self.operand;
        match self.operator {
            Operator::Add => format!("Add {c}"),
            Operator::Sub => format!("Subtract {c}"),
            Operator::Mul => format!("Multiply by {c}"),
            Operator::Div => format!("Divide by {c}"),
            Operator::SubtractOriginal if c == 1.0 => "Subtract your ORIGINAL number".to_string(),
            Operator::SubtractOriginal => format!("Subtract {c} times your ORIGINAL number"),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Ordered sequence of operations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    ops: Vec<Operation>,
}

impl Chain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation (builder pattern).
    #[must_use]
    pub fn then(mut self, op: Operation) -> Self {
        self.ops.push(op);
        self
    }

    pub fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    /// Remove and return the operation at `index`, `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<Operation> {
        (index < self.ops.len()).then(|| self.ops.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Run the chain on starting value `x`.
    pub fn evaluate(&self, x: f64) -> Result<f64, ProbeError> {
        self.ops
            .iter()
            .enumerate()
            .try_fold(x, |v, (step, op)| op.apply(v, x, step))
    }
}

impl FromIterator<Operation> for Chain {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}
