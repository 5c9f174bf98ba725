//! Two-point invariance probe.
//!
//! Any composition of `x+c`, `x-c`, `x·c`, `x/c` and `v-c·x` is an affine map
//! `f(x) = m·x + k`. Two distinct samples determine `m` exactly, so comparing
//! `f(10)` with `f(100)` decides whether the slope is zero. This is exact for
//! the closed operation set and must not be replaced with symbolic algebra.
//! Floating point error is absorbed by [`EPSILON`].

use thiserror::Error;

/// Tolerance for treating two samples as equal.
pub const EPSILON: f64 = 0.001;

/// Sample points used to detect a non-zero slope.
pub const SAMPLE_POINTS: [f64; 2] = [10.0, 100.0];

/// Point at which an invariant chain's constant is read.
pub const CONSTANT_POINT: f64 = 0.0;

/// Failure to evaluate a chain at a sample point.
///
/// A chain that fails here is invalid, never variant or invariant.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProbeError {
    #[error("division by zero at step {step}")]
    DivisionByZero { step: usize },
    #[error("chain produced a non-finite value at x = {sample}")]
    NonFinite { sample: f64 },
}

/// Probe verdict for a chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Classification {
    /// Slope is zero; the chain always yields `constant`.
    Invariant { constant: f64 },
    /// The result still depends on the input.
    Variant { slope: f64 },
}

impl Classification {
    #[must_use]
    pub fn is_invariant(&self) -> bool {
        matches!(self, Classification::Invariant { .. })
    }

    #[must_use]
    pub fn constant(&self) -> Option<f64> {
        match self {
            Classification::Invariant { constant } => Some(*constant),
            Classification::Variant { .. } => None,
        }
    }
}

fn sample<F>(f: &F, x: f64) -> Result<f64, ProbeError>
where
    F: Fn(f64) -> Result<f64, ProbeError>,
{
    let y = f(x)?;
    if y.is_finite() {
        Ok(y)
    } else {
        Err(ProbeError::NonFinite { sample: x })
    }
}

/// Classify `f` as invariant or variant of its input.
///
/// The constant of an invariant chain is `f(0)`.
pub fn probe<F>(f: F) -> Result<Classification, ProbeError>
where
    F: Fn(f64) -> Result<f64, ProbeError>,
{
    let [lo, hi] = SAMPLE_POINTS;
    let y_lo = sample(&f, lo)?;
    let y_hi = sample(&f, hi)?;

    if (y_lo - y_hi).abs() < EPSILON {
        let constant = constant_of(&f)?;
        Ok(Classification::Invariant { constant })
    } else {
        Ok(Classification::Variant {
            slope: (y_hi - y_lo) / (hi - lo),
        })
    }
}

/// Value of `f` at [`CONSTANT_POINT`].
///
/// Only meaningful when [`probe`] classified `f` as invariant.
pub fn constant_of<F>(f: F) -> Result<f64, ProbeError>
where
    F: Fn(f64) -> Result<f64, ProbeError>,
{
    sample(&f, CONSTANT_POINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::{Chain, Operation};

    #[test]
    fn test_known_zero_slope() {
        let chain = Chain::new()
            .then(Operation::mul(2.0))
            .then(Operation::add(10.0))
            .then(Operation::div(2.0))
            .then(Operation::subtract_original(1.0));

        let verdict = probe(|x| chain.evaluate(x)).unwrap();
        assert_eq!(verdict, Classification::Invariant { constant: 5.0 });
    }

    #[test]
    fn test_known_nonzero_slope() {
        let chain = Chain::new().then(Operation::mul(2.0)).then(Operation::add(10.0));

        let verdict = probe(|x| chain.evaluate(x)).unwrap();
        assert!(!verdict.is_invariant());
        assert_eq!(verdict, Classification::Variant { slope: 2.0 });
        assert_eq!(verdict.constant(), None);
    }

    #[test]
    fn test_identity_is_variant() {
        let verdict = probe(|x| Ok(x)).unwrap();
        assert_eq!(verdict, Classification::Variant { slope: 1.0 });
    }

    #[test]
    fn test_multiply_by_zero_is_invariant() {
        let chain = Chain::new().then(Operation::mul(0.0)).then(Operation::add(7.0));
        assert_eq!(
            probe(|x| chain.evaluate(x)).unwrap().constant(),
            Some(7.0)
        );
    }

    #[test]
    fn test_division_by_zero_is_invalid() {
        let chain = Chain::new()
            .then(Operation::subtract_original(1.0))
            .then(Operation::div(0.0));
        assert_eq!(
            probe(|x| chain.evaluate(x)),
            Err(ProbeError::DivisionByZero { step: 1 })
        );
    }

    #[test]
    fn test_non_finite_is_invalid() {
        let verdict = probe(|x| Ok(x * f64::MAX * 10.0));
        assert_eq!(verdict, Err(ProbeError::NonFinite { sample: 10.0 }));
    }

    #[test]
    fn test_fractional_constant_survives_rounding() {
        let chain = Chain::new()
            .then(Operation::add(1.0))
            .then(Operation::div(3.0))
            .then(Operation::mul(3.0))
            .then(Operation::subtract_original(1.0));

        let constant = probe(|x| chain.evaluate(x)).unwrap().constant().unwrap();
        assert!((constant - 1.0).abs() < EPSILON);
    }
}
