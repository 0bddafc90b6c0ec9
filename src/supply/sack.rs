//! The sack of students.
//!
//! The sack is an opaque multiset with randomized extraction. Its contents
//! follow the setup sequence of a match:
//!
//! 1. `initial_fill` puts 2 students of each color in the sack.
//! 2. Those 10 students are drawn to seed the islands.
//! 3. `fill` adds the rest of the box, so each color totals 24 across the
//!    sack and everything already distributed.

use serde::{Deserialize, Serialize};

use crate::core::config::{INITIAL_SACK_PER_COLOR, STUDENTS_PER_COLOR};
use crate::core::{GameRng, PawnColor, Pawns};

/// Randomized pawn pool.
#[derive(Clone, Debug)]
pub struct Sack {
    pawns: Pawns,
    /// Students already added to the sack over the whole match, per color.
    supplied: Pawns,
    rng: GameRng,
}

impl Sack {
    /// Create an empty sack drawing from the given RNG stream.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            pawns: Pawns::new(),
            supplied: Pawns::new(),
            rng,
        }
    }

    /// Seed the sack with the students used for island setup.
    pub fn initial_fill(&mut self) {
        self.supply_up_to(INITIAL_SACK_PER_COLOR);
    }

    /// Add the remaining students of the box.
    pub fn fill(&mut self) {
        self.supply_up_to(STUDENTS_PER_COLOR);
    }

    fn supply_up_to(&mut self, per_color: u8) {
        for color in PawnColor::all() {
            let missing = per_color.saturating_sub(self.supplied.get(color));
            self.pawns.add(color, missing);
            self.supplied.add(color, missing);
        }
    }

    /// Draw one student uniformly at random.
    pub fn extract_one(&mut self) -> Option<PawnColor> {
        let total = self.pawns.total();
        if total == 0 {
            return None;
        }
        let color = self.pawns.nth_color(self.rng.gen_range_usize(0..total))?;
        self.pawns.remove(color, 1);
        Some(color)
    }

    /// Draw up to `count` students without replacement.
    ///
    /// Returns fewer than `count` students when the sack runs out.
    pub fn extract(&mut self, count: usize) -> Pawns {
        let mut drawn = Pawns::new();
        for _ in 0..count {
            match self.extract_one() {
                Some(color) => drawn.add(color, 1),
                None => break,
            }
        }
        drawn
    }

    /// Return students to the sack.
    pub fn put_back(&mut self, pawns: &Pawns) {
        self.pawns.add_all(pawns);
    }

    /// Students currently in the sack.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pawns.total()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pawns.is_empty()
    }

    /// Current contents, for tests and diagnostics.
    #[must_use]
    pub fn contents(&self) -> &Pawns {
        &self.pawns
    }
}

/// Serializable summary of the sack for snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SackView {
    pub remaining: usize,
}

impl From<&Sack> for SackView {
    fn from(sack: &Sack) -> Self {
        Self {
            remaining: sack.remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sack() -> Sack {
        Sack::new(GameRng::new(42))
    }

    /// Test that the initial fill puts two students of each color in the sack.
    #[test]
    fn test_initial_fill() {
        let mut sack = sack();
        sack.initial_fill();

        assert_eq!(sack.remaining(), 10);
        for color in PawnColor::all() {
            assert_eq!(sack.contents()[color], 2);
        }
    }

    /// Test that the full fill counts students already drawn.
    #[test]
    fn test_fill_accounts_for_distributed_students() {
        let mut sack = sack();
        sack.initial_fill();
        let seeded = sack.extract(10);
        assert_eq!(seeded.total(), 10);
        assert!(sack.is_empty());

        sack.fill();

        // 24 per color in total, 2 per color already left the sack.
        assert_eq!(sack.remaining(), 110);
        for color in PawnColor::all() {
            assert_eq!(sack.contents()[color], 22);
        }
    }

    /// Test that filling the sack twice changes nothing.
    #[test]
    fn test_fill_is_idempotent() {
        let mut sack = sack();
        sack.fill();
        sack.fill();
        assert_eq!(sack.remaining(), 120);
    }

    /// Test that extracted students leave the sack.
    #[test]
    fn test_extract_without_replacement() {
        let mut sack = sack();
        sack.initial_fill();

        let drawn = sack.extract(4);
        assert_eq!(drawn.total(), 4);
        assert_eq!(sack.remaining(), 6);

        let mut combined = drawn;
        combined.add_all(sack.contents());
        assert_eq!(combined, Pawns::uniform(2));
    }

    /// Test that extraction stops when the sack is empty.
    #[test]
    fn test_extract_exhausted() {
        let mut sack = sack();
        sack.initial_fill();

        let drawn = sack.extract(15);
        assert_eq!(drawn.total(), 10);
        assert!(sack.extract_one().is_none());
    }

    /// Test that extraction is seed-determined.
    #[test]
    fn test_deterministic_extraction() {
        let mut a = sack();
        let mut b = sack();
        a.fill();
        b.fill();

        assert_eq!(a.extract(20), b.extract(20));
    }

    /// Test that students put back can be drawn again.
    #[test]
    fn test_put_back() {
        let mut sack = sack();
        sack.put_back(&Pawns::from_pairs(&[(PawnColor::Pink, 3)]));
        assert_eq!(sack.remaining(), 3);
        assert_eq!(sack.extract_one(), Some(PawnColor::Pink));
    }
}
