//! Puzzle catalog for definition lookup.
//!
//! The `PuzzleCatalog` stores every playable definition and provides lookup
//! by `PuzzleId` plus an ordered listing for the puzzle menu.

use rustc_hash::FxHashMap;

use super::definition::{Bounds, Difficulty, KindTag, PuzzleDefinition, PuzzleId, Solver};

/// Symbols used by the built-in symbol oracle.
pub const DEFAULT_SYMBOLS: [char; 9] = ['☮', '☯', '☪', '☢', '☣', '⚡', '❄', '♫', '⚓'];

/// Registry of puzzle definitions.
///
/// ## Example
///
/// ```
/// use mind_logic::puzzles::{KindTag, PuzzleCatalog, PuzzleId};
///
/// let catalog = PuzzleCatalog::builtin();
/// let first = catalog.get(PuzzleId::new(1)).unwrap();
/// assert_eq!(first.title, "The Classic Illusion");
/// assert_eq!(first.tag(), KindTag::Guided);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PuzzleCatalog {
    puzzles: FxHashMap<PuzzleId, PuzzleDefinition>,
    next_id: u32,
}

impl PuzzleCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the five standard puzzles, one per kind.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();

        catalog.register(
            PuzzleDefinition::guided(
                PuzzleId::new(1),
                "The Classic Illusion",
                [
                    "Think of a number between 1 and 50.",
                    "Multiply your number by 2.",
                    "Add 10 to the total.",
                    "Divide the result by 2.",
                    "Subtract your ORIGINAL number.",
                ],
                Solver::Constant(5.0),
            )
            .with_difficulty(Difficulty::Novice)
            .with_proof("Algebra Proof:\nLet x = number\n1. 2x\n2. 2x + 10\n3. (2x + 10)/2 = x + 5\n4. x + 5 - x = 5"),
        );

        catalog.register(
            PuzzleDefinition::input_solve(
                PuzzleId::new(2),
                "Reverse Engineer",
                [
                    "Think of any number.",
                    "Multiply it by 4.",
                    "Add 12 to the result.",
                    "Divide by 2.",
                    "Input your CURRENT total below:",
                ],
                Solver::InvertAffine { slope: 2.0, intercept: 6.0 },
            )
            .with_difficulty(Difficulty::Apprentice)
            .with_proof(
                "I reversed your math:\nYour result was (4x + 12)/2 = 2x + 6\nI subtracted 6, then divided by 2 to find x.",
            ),
        );

        catalog.register(
            PuzzleDefinition::symbol_grid(
                PuzzleId::new(3),
                "Symbol Oracle",
                [
                    "Think of a 2-digit number (e.g. 23).",
                    "Add the two digits together (2+3=5).",
                    "Subtract that sum from your original (23-5=18).",
                    "Find your resulting number in the list below.",
                    "Memorize the symbol next to it.",
                ],
                DEFAULT_SYMBOLS.to_vec(),
            )
            .with_difficulty(Difficulty::Adept)
            .with_proof(
                "Mathematical Law:\n(10a + b) - (a + b) = 9a\nThe result is always a multiple of 9.\nI put the same symbol on every multiple of 9.",
            ),
        );

        catalog.register(
            PuzzleDefinition::binary_search(
                PuzzleId::new(4),
                "Binary Search",
                "Think of a number between 1 and 100.",
                Bounds::new(1, 100),
            )
            .with_difficulty(Difficulty::Master)
            .with_proof(
                "Binary Search Algorithm:\nBy repeatedly dividing the range in half, I can find any number in log2(N) steps.",
            ),
        );

        catalog.register(
            PuzzleDefinition::dynamic(PuzzleId::new(5), "Dynamic Chaos")
                .with_difficulty(Difficulty::GrandMaster)
                .with_proof("Generated at Runtime:\nThe system built a custom equation where variables cancel out."),
        );

        catalog
    }

    /// Register a puzzle definition.
    ///
    /// Panics if a puzzle with the same ID already exists.
    pub fn register(&mut self, puzzle: PuzzleDefinition) {
        if self.puzzles.contains_key(&puzzle.id) {
            panic!("Puzzle with ID {:?} already registered", puzzle.id);
        }
        if puzzle.id != PuzzleId::CUSTOM {
            self.next_id = self.next_id.max(puzzle.id.raw().saturating_add(1));
        }
        self.puzzles.insert(puzzle.id, puzzle);
    }

    /// Register a puzzle under a fresh ID, returning the ID.
    ///
    /// The definition's own ID is overwritten.
    pub fn register_auto(&mut self, mut puzzle: PuzzleDefinition) -> PuzzleId {
        let id = PuzzleId::new(self.next_id);
        puzzle.id = id;
        self.register(puzzle);
        id
    }

    /// Get a puzzle definition by ID.
    #[must_use]
    pub fn get(&self, id: PuzzleId) -> Option<&PuzzleDefinition> {
        self.puzzles.get(&id)
    }

    /// Check if a puzzle ID is registered.
    #[must_use]
    pub fn contains(&self, id: PuzzleId) -> bool {
        self.puzzles.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// Definitions in menu order (ascending ID).
    #[must_use]
    pub fn listing(&self) -> Vec<&PuzzleDefinition> {
        let mut all: Vec<_> = self.puzzles.values().collect();
        all.sort_by_key(|p| p.id);
        all
    }

    /// Find puzzles of one kind.
    pub fn find_by_kind(&self, kind: KindTag) -> impl Iterator<Item = &PuzzleDefinition> {
        self.puzzles.values().filter(move |p| p.tag() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_one_of_each_kind() {
        let catalog = PuzzleCatalog::builtin();
        assert_eq!(catalog.len(), 5);

        for kind in [
            KindTag::Guided,
            KindTag::InputSolve,
            KindTag::SymbolGrid,
            KindTag::BinarySearch,
            KindTag::Dynamic,
        ] {
            assert_eq!(catalog.find_by_kind(kind).count(), 1, "kind {kind}");
        }
    }

    #[test]
    fn test_listing_order() {
        let catalog = PuzzleCatalog::builtin();
        let titles: Vec<_> = catalog.listing().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "The Classic Illusion",
                "Reverse Engineer",
                "Symbol Oracle",
                "Binary Search",
                "Dynamic Chaos",
            ]
        );
    }

    #[test]
    fn test_register_auto_continues_after_builtin() {
        let mut catalog = PuzzleCatalog::builtin();
        let def = PuzzleDefinition::guided(PuzzleId::CUSTOM, "Mine", ["Think."], Solver::Constant(1.0));

        let id = catalog.register_auto(def);
        assert_eq!(id, PuzzleId::new(6));
        assert!(catalog.contains(id));
        assert_eq!(catalog.get(id).unwrap().title, "Mine");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut catalog = PuzzleCatalog::builtin();
        catalog.register(PuzzleDefinition::dynamic(PuzzleId::new(1), "Clash"));
    }

    #[test]
    fn test_missing() {
        let catalog = PuzzleCatalog::builtin();
        assert!(catalog.get(PuzzleId::new(99)).is_none());
        assert!(!PuzzleCatalog::new().contains(PuzzleId::new(1)));
        assert!(PuzzleCatalog::new().is_empty());
    }
}
