//! Affine operation chains and the invariance probe.
//!
//! ## Key Types
//!
//! - `Operation`: One add/sub/mul/div/subtract-original step
//! - `Chain`: Ordered operations applied to a secret number
//! - `probe`: Decides whether a chain ignores its input
//!
//! ```
//! use mind_logic::affine::{probe, Chain, Classification, Operation};
//!
//! let chain = Chain::new()
//!     .then(Operation::mul(2.0))
//!     .then(Operation::add(10.0))
//!     .then(Operation::div(2.0))
//!     .then(Operation::subtract_original(1.0));
//!
//! let verdict = probe(|x| chain.evaluate(x)).unwrap();
//! assert_eq!(verdict, Classification::Invariant { constant: 5.0 });
//! ```

mod chain;
mod probe;

pub use chain::{Chain, Operation, Operator};
pub use probe::{constant_of, probe, Classification, ProbeError, CONSTANT_POINT, EPSILON, SAMPLE_POINTS};
