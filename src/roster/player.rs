//! Match participants.
//!
//! A `Player` owns its identity (name, wizard, tower color), its hand of
//! assistants and its school. Coin balances live in the
//! [`Bank`](crate::supply::Bank) so that every coin movement is checked
//! against the zero-sum invariant in one place.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{EnumIter, IntoEnumIterator};

use crate::board::{Island, TowerColor};
use crate::cards::Assistant;
use crate::core::config::ASSISTANTS_PER_HAND;
use crate::core::{GameError, GameResult, Pawns, PlayerId};
use crate::school::School;

/// Wizard (card back) chosen by a player; unique per match.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    EnumIter, strum::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Wizard {
    Druid,
    Sage,
    Witch,
    King,
}

impl Wizard {
    pub fn all() -> impl Iterator<Item = Wizard> {
        Self::iter()
    }
}

/// Hand of assistant cards.
pub type Hand = SmallVec<[Assistant; ASSISTANTS_PER_HAND]>;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    wizard: Wizard,
    tower: TowerColor,
    hand: Hand,
    last_assistant: Option<Assistant>,
    school: School,
}

impl Player {
    /// Create a player with a full hand and an empty school.
    #[must_use]
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        wizard: Wizard,
        tower: TowerColor,
        max_entrance: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            wizard,
            tower,
            hand: Assistant::all().collect(),
            last_assistant: None,
            school: School::new(max_entrance),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn wizard(&self) -> Wizard {
        self.wizard
    }

    #[must_use]
    pub fn tower(&self) -> TowerColor {
        self.tower
    }

    #[must_use]
    pub fn hand(&self) -> &[Assistant] {
        &self.hand
    }

    /// The assistant played most recently, if any.
    #[must_use]
    pub fn last_assistant(&self) -> Option<Assistant> {
        self.last_assistant
    }

    #[must_use]
    pub fn school(&self) -> &School {
        &self.school
    }

    pub fn school_mut(&mut self) -> &mut School {
        &mut self.school
    }

    /// Discard an assistant from the hand and make it the last played one.
    ///
    /// Returns the card's priority.
    pub fn play_assistant(&mut self, assistant: Assistant) -> GameResult<u8> {
        let pos = self
            .hand
            .iter()
            .position(|&a| a == assistant)
            .ok_or(GameError::OutOfBounds("assistant not in hand"))?;
        self.hand.remove(pos);
        self.last_assistant = Some(assistant);
        Ok(assistant.priority())
    }

    /// Deal the starting students into the entrance.
    pub fn initial_entrance_fill(&mut self, pawns: &Pawns) -> GameResult<()> {
        self.school.add_to_entrance(pawns)
    }

    /// Move students from the entrance onto an island; all-or-nothing.
    pub fn move_from_entrance_to_island(&mut self, pawns: &Pawns, island: &mut Island) -> GameResult<()> {
        self.school.remove_all_from_entrance(pawns)?;
        island.add_students(pawns);
        Ok(())
    }

    /// Put the students of a cloud in the entrance; rejects overflow.
    pub fn add_pawns_from_cloud(&mut self, pawns: &Pawns) -> GameResult<()> {
        self.school.add_to_entrance(pawns)
    }
}
