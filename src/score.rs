//! Accumulated XP persistence boundary.
//!
//! The engine reads the stored score once when it is constructed and saves
//! the new total exactly once per finished puzzle.

/// Persistent score storage.
pub trait ScoreStore {
    /// Previously accumulated score.
    fn load(&self) -> u64;

    /// Persist the new total.
    fn save(&mut self, score: u64);
}

/// In-process store, useful for tests and headless runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    score: u64,
    saves: u32,
}

impl MemoryScoreStore {
    /// Store seeded with an existing score.
    #[must_use]
    pub fn with_score(score: u64) -> Self {
        Self { score, saves: 0 }
    }

    /// Number of `save` calls received.
    #[must_use]
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.score
    }

    fn save(&mut self, score: u64) {
        self.score = score;
        self.saves += 1;
    }
}
