//! Change events.
//!
//! The orchestrator appends one event per state change it commits. The
//! session layer drains the queue with
//! [`Game::drain_events`](super::Game::drain_events) after each call and
//! forwards what it needs to its clients. Rejected operations emit nothing.

use serde::{Deserialize, Serialize};

use super::result::MatchResult;
use crate::board::{Merge, TowerChange, TowerColor};
use crate::cards::{Assistant, CharacterKind};
use crate::core::{PawnColor, Pawns, PlayerId};
use crate::roster::Wizard;
use crate::school::ProfessorChange;
use crate::supply::CloudFill;

/// Where a student was moved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentDestination {
    Hall,
    Island(usize),
}

/// A committed change to the match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerAdded {
        player: PlayerId,
        name: String,
        wizard: Wizard,
        tower: TowerColor,
    },
    PlayerRemoved {
        player: PlayerId,
    },
    GameStarted {
        first: PlayerId,
    },
    RoundStarted {
        round: u32,
    },
    TurnChanged {
        player: PlayerId,
    },
    AssistantPlayed {
        player: PlayerId,
        assistant: Assistant,
    },
    StudentMoved {
        player: PlayerId,
        color: PawnColor,
        to: StudentDestination,
    },
    ProfessorChanged(ProfessorChange),
    MotherNatureMoved {
        island: usize,
        steps: u8,
    },
    /// A ban tile cancelled the resolution of an island.
    IslandBanned {
        island: usize,
    },
    TowerChanged(TowerChange),
    IslandsMerged(Merge),
    CloudsFilled(CloudFill),
    CloudPicked {
        player: PlayerId,
        cloud: usize,
        students: Pawns,
    },
    CoinChanged {
        player: PlayerId,
        balance: u8,
        pool: u8,
    },
    CharacterUsed {
        player: PlayerId,
        kind: CharacterKind,
        cost: u8,
    },
    CharacterResolved {
        player: PlayerId,
        kind: CharacterKind,
    },
    /// The current round is the last one.
    LastRound,
    GameEnded(MatchResult),
}

impl GameEvent {
    /// Whether the event marks the end of the match.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameEnded(_))
    }
}
