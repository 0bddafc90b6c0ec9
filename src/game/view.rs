//! Read-only snapshots of the match for presentation layers.
//!
//! Views are plain serializable values copied out of the live state; holding
//! one never borrows the [`Game`](super::Game).

use serde::{Deserialize, Serialize};

use crate::board::{Board, Island, TowerColor};
use crate::cards::{Assistant, CharacterCard, CharacterKind};
use crate::core::{PawnColor, Pawns, PlayerId};
use crate::roster::Player;
use crate::supply::{Cloud, SackView};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandView {
    pub index: usize,
    pub students: Pawns,
    pub tower: Option<TowerColor>,
    pub ban_tiles: u8,
    pub dimension: u8,
    pub mother_nature: bool,
}

impl IslandView {
    fn new(index: usize, island: &Island, mother_nature: usize) -> Self {
        Self {
            index,
            students: *island.students(),
            tower: island.tower(),
            ban_tiles: island.ban_tiles(),
            dimension: island.dimension(),
            mother_nature: index == mother_nature,
        }
    }
}

/// The island ring plus the sack size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub islands: Vec<IslandView>,
    pub mother_nature: usize,
    pub sack: SackView,
}

impl BoardView {
    pub(crate) fn new(board: &Board, sack: SackView) -> Self {
        Self {
            islands: board
                .islands()
                .iter()
                .enumerate()
                .map(|(index, island)| IslandView::new(index, island, board.mother_nature()))
                .collect(),
            mother_nature: board.mother_nature(),
            sack,
        }
    }
}

/// One player's school and public counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolView {
    pub player: PlayerId,
    pub name: String,
    pub tower: TowerColor,
    pub entrance: Pawns,
    pub hall: Pawns,
    pub professors: Vec<PawnColor>,
    /// Towers the player's tower color still has to place.
    pub towers_left: u8,
    pub coins: u8,
    pub last_assistant: Option<Assistant>,
    pub hand_size: usize,
}

impl SchoolView {
    pub(crate) fn new(
        player: &Player,
        professors: Vec<PawnColor>,
        towers_left: u8,
        coins: u8,
    ) -> Self {
        Self {
            player: player.id(),
            name: player.name().to_owned(),
            tower: player.tower(),
            entrance: *player.school().entrance(),
            hall: *player.school().hall(),
            professors,
            towers_left,
            coins,
            last_assistant: player.last_assistant(),
            hand_size: player.hand().len(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudView {
    pub index: usize,
    pub students: Pawns,
}

impl CloudView {
    pub(crate) fn new(index: usize, cloud: &Cloud) -> Self {
        Self {
            index,
            students: *cloud.students(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterView {
    pub index: usize,
    pub kind: CharacterKind,
    pub cost: u8,
    pub coin_on: bool,
    pub students: Pawns,
    pub ban_tiles: u8,
}

impl CharacterView {
    pub(crate) fn new(index: usize, card: &CharacterCard) -> Self {
        Self {
            index,
            kind: card.kind(),
            cost: card.cost(),
            coin_on: card.has_coin(),
            students: *card.students(),
            ban_tiles: card.ban_tiles(),
        }
    }
}
