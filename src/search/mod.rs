//! Interactive binary search over the player's secret number.
//!
//! Each round asks "is your number greater than `mid`?" with
//! `mid = floor((min + max) / 2)`. A yes moves `min` to `mid + 1`, a no moves
//! `max` to `mid`. The search ends when `min == max`, after at most
//! `ceil(log2(max - min + 1))` rounds.
//!
//! ```
//! use mind_logic::puzzles::Bounds;
//! use mind_logic::search::{BinarySearchController, Query};
//!
//! let secret = 42;
//! let mut search = BinarySearchController::new(Bounds::new(1, 100));
//! loop {
//!     match search.query() {
//!         Query::Ask { mid } => search.answer(secret > mid),
//!         Query::Resolved(value) => {
//!             assert_eq!(value, secret);
//!             break;
//!         }
//!     }
//! }
//! assert_eq!(search.rounds(), 7);
//! ```

use serde::{Deserialize, Serialize};

use crate::puzzles::Bounds;

/// What the controller needs next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    /// Ask whether the secret is greater than `mid`.
    Ask { mid: i64 },
    /// The range has collapsed to the secret.
    Resolved(i64),
}

/// Narrowing state for one search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinarySearchController {
    min: i64,
    max: i64,
    /// Midpoint of the question awaiting an answer.
    pending: Option<i64>,
    rounds: u32,
}

impl BinarySearchController {
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            min: bounds.min(),
            max: bounds.max(),
            pending: None,
            rounds: 0,
        }
    }

    /// Upper bound on rounds needed for `bounds`.
    #[must_use]
    pub fn max_rounds(bounds: Bounds) -> u32 {
        let span = bounds.span();
        if span <= 1 {
            0
        } else {
            u128::BITS - (span - 1).leading_zeros()
        }
    }

    /// Current question, or the secret once resolved.
    ///
    /// Repeated calls without an answer return the same question.
    pub fn query(&mut self) -> Query {
        if self.min == self.max {
            self.pending = None;
            return Query::Resolved(self.min);
        }
        // Widened so the full i64 range cannot overflow; max > min keeps the
        // halved difference non-negative, so truncation is a floor.
        let floor_mid = (i128::from(self.min) + (i128::from(self.max) - i128::from(self.min)) / 2) as i64;
        let mid = *self.pending.get_or_insert(floor_mid);
        Query::Ask { mid }
    }

    /// Record the answer to the outstanding question.
    ///
    /// Panics if no question is outstanding; answering unasked questions is a
    /// caller bug.
    pub fn answer(&mut self, is_greater: bool) {
        let Some(mid) = self.pending.take() else {
            panic!("answer() called with no outstanding query");
        };
        if is_greater {
            self.min = mid + 1;
        } else {
            self.max = mid;
        }
        self.rounds += 1;
    }

    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Midpoint of the outstanding question.
    #[must_use]
    pub fn mid(&self) -> Option<i64> {
        self.pending
    }

    /// Answers recorded so far.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.min == self.max
    }
}
