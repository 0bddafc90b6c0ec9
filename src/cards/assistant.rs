//! Assistant cards.
//!
//! Every player starts with the same ten assistants. Playing one fixes the
//! player's position in the turn order (lower priority acts first) and the
//! maximum number of steps mother nature may take that turn. Played cards
//! are discarded.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// The ten assistant cards, ordered by priority.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    EnumIter, EnumCount, strum::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Assistant {
    Elephant,
    Cat,
    Ostrich,
    Eagle,
    Fox,
    Lizard,
    Octopus,
    Dog,
    Turtle,
    Lion,
}

impl Assistant {
    /// Turn-order priority (1..=10, lower plays first).
    #[must_use]
    pub const fn priority(self) -> u8 {
        self as u8 + 1
    }

    /// Maximum mother-nature steps granted (1..=5).
    #[must_use]
    pub const fn movement(self) -> u8 {
        (self as u8) / 2 + 1
    }

    /// A complete hand, in priority order.
    pub fn all() -> impl Iterator<Item = Assistant> {
        Self::iter()
    }
}
