//! Character cards (expert mode).
//!
//! Three of the twelve characters are drawn for each expert match. Using a
//! character costs its base cost plus one once a coin has been left on the
//! card by a previous use. Some characters hold an inventory: students
//! (Monk, Jester, Princess) or ban tiles (Herbalist).
//!
//! Using a card is split in two steps. [`Game::use_character`] pays and
//! returns the kind; [`Game::resolve_character`] then applies a
//! [`CharacterEffect`] carrying the parameters the player chose.
//!
//! [`Game::use_character`]: crate::game::Game::use_character
//! [`Game::resolve_character`]: crate::game::Game::resolve_character

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::core::{GameError, GameResult, GameRng, PawnColor, Pawns};
use crate::supply::Sack;

/// Ban tiles stocked on the Herbalist.
pub const HERBALIST_BAN_TILES: u8 = 4;

/// The twelve character kinds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    EnumIter, EnumCount, strum::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum CharacterKind {
    Monk,
    Farmer,
    Herald,
    Mailman,
    Herbalist,
    Centaur,
    Jester,
    Knight,
    Mushroom,
    Minstrel,
    Princess,
    Thief,
}

impl CharacterKind {
    /// Printed cost before any coin was left on the card.
    #[must_use]
    pub const fn base_cost(self) -> u8 {
        match self {
            Self::Monk | Self::Mailman | Self::Jester | Self::Minstrel => 1,
            Self::Farmer | Self::Herbalist | Self::Knight | Self::Princess => 2,
            Self::Herald | Self::Centaur | Self::Mushroom | Self::Thief => 3,
        }
    }

    /// Students the card holds while in play.
    #[must_use]
    pub const fn student_slots(self) -> usize {
        match self {
            Self::Monk | Self::Princess => 4,
            Self::Jester => 6,
            _ => 0,
        }
    }

    pub fn all() -> impl Iterator<Item = CharacterKind> {
        Self::iter()
    }
}

/// A character in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCard {
    kind: CharacterKind,
    coin_on: bool,
    students: Pawns,
    ban_tiles: u8,
}

impl CharacterCard {
    #[must_use]
    pub fn new(kind: CharacterKind) -> Self {
        let ban_tiles = if kind == CharacterKind::Herbalist {
            HERBALIST_BAN_TILES
        } else {
            0
        };
        Self {
            kind,
            coin_on: false,
            students: Pawns::new(),
            ban_tiles,
        }
    }

    #[must_use]
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    /// Whether a coin was left on the card by an earlier use.
    #[must_use]
    pub fn has_coin(&self) -> bool {
        self.coin_on
    }

    /// Current cost to use the card.
    #[must_use]
    pub fn cost(&self) -> u8 {
        self.kind.base_cost() + u8::from(self.coin_on)
    }

    #[must_use]
    pub fn students(&self) -> &Pawns {
        &self.students
    }

    #[must_use]
    pub fn ban_tiles(&self) -> u8 {
        self.ban_tiles
    }

    pub(crate) fn set_coin(&mut self) {
        self.coin_on = true;
    }

    /// Top the student inventory up from the sack.
    ///
    /// Returns how many students were drawn.
    pub fn stock(&mut self, sack: &mut Sack) -> usize {
        let missing = self.kind.student_slots().saturating_sub(self.students.total());
        let drawn = sack.extract(missing);
        self.students.add_all(&drawn);
        drawn.total()
    }

    /// Check that the card holds the given students.
    pub fn check_students(&self, pawns: &Pawns) -> GameResult<()> {
        if self.students.contains(pawns) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds("students not on the character"))
        }
    }

    pub(crate) fn take_students(&mut self, pawns: &Pawns) -> GameResult<()> {
        self.check_students(pawns)?;
        self.students.remove_all(pawns);
        Ok(())
    }

    pub(crate) fn add_students(&mut self, pawns: &Pawns) {
        self.students.add_all(pawns);
    }

    pub(crate) fn take_ban_tile(&mut self) -> GameResult<()> {
        if self.ban_tiles == 0 {
            return Err(GameError::ResourceExhausted("no ban tiles left on the character"));
        }
        self.ban_tiles -= 1;
        Ok(())
    }

    pub(crate) fn return_ban_tile(&mut self) {
        self.ban_tiles += 1;
    }
}

/// Draws the characters used in a match.
pub struct CharactersDeck;

impl CharactersDeck {
    /// Draw `count` distinct characters uniformly at random.
    #[must_use]
    pub fn draw(rng: &mut GameRng, count: usize) -> Vec<CharacterCard> {
        let mut kinds: Vec<CharacterKind> = CharacterKind::all().collect();
        rng.shuffle(&mut kinds);
        kinds
            .into_iter()
            .take(count.min(CharacterKind::COUNT))
            .map(CharacterCard::new)
            .collect()
    }
}

/// A character's effect together with the parameters chosen by the player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterEffect {
    /// Move a student from the card onto an island.
    Monk { color: PawnColor, island: usize },
    /// Ties with the current holder take professors this turn.
    Farmer,
    /// Resolve an island as if mother nature ended there.
    Herald { island: usize },
    /// Two extra mother-nature steps this turn.
    Mailman,
    /// Place a ban tile on an island.
    Herbalist { island: usize },
    /// Towers give no influence this turn.
    Centaur,
    /// Swap up to three students between the card and the entrance.
    Jester { from_card: Pawns, from_entrance: Pawns },
    /// Two extra influence for the acting team this turn.
    Knight,
    /// A color gives no influence this turn.
    Mushroom { color: PawnColor },
    /// Swap up to two students between the entrance and the hall.
    Minstrel { from_entrance: Pawns, from_hall: Pawns },
    /// Move a student from the card into the hall.
    Princess { color: PawnColor },
    /// Every player returns up to three students of a color to the sack.
    Thief { color: PawnColor },
}

impl CharacterEffect {
    /// The character this effect belongs to.
    #[must_use]
    pub fn kind(&self) -> CharacterKind {
        match self {
            Self::Monk { .. } => CharacterKind::Monk,
            Self::Farmer => CharacterKind::Farmer,
            Self::Herald { .. } => CharacterKind::Herald,
            Self::Mailman => CharacterKind::Mailman,
            Self::Herbalist { .. } => CharacterKind::Herbalist,
            Self::Centaur => CharacterKind::Centaur,
            Self::Jester { .. } => CharacterKind::Jester,
            Self::Knight => CharacterKind::Knight,
            Self::Mushroom { .. } => CharacterKind::Mushroom,
            Self::Minstrel { .. } => CharacterKind::Minstrel,
            Self::Princess { .. } => CharacterKind::Princess,
            Self::Thief { .. } => CharacterKind::Thief,
        }
    }
}
