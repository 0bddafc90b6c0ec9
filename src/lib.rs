//! # eriantys-core
//!
//! Rule engine for the Eriantys board game, for 2 to 4 players, in standard
//! and expert mode.
//!
//! ## Design Principles
//!
//! 1. **One authority**: `Game` holds the whole match state and decides
//!    whether each request succeeds. Presentation and networking layers only
//!    send [`Action`]s and read views and events.
//!
//! 2. **Validate, then commit**: a rejected request returns a [`GameError`]
//!    and changes nothing.
//!
//! 3. **Deterministic**: every random draw comes from a seeded [`GameRng`],
//!    so the same seed and the same actions replay the same match.
//!
//! ## Modules
//!
//! - `core`: pawns, player IDs, errors, RNG, configuration
//! - `supply`: sack, clouds and the coin bank
//! - `school`: entrance, hall and professor control
//! - `board`: island ring, mother nature, conquest and merging
//! - `cards`: assistants and expert-mode characters
//! - `roster`: seated players
//! - `game`: the orchestrator, events, views and results

pub mod board;
pub mod cards;
pub mod core;
pub mod game;
pub mod roster;
pub mod school;
pub mod supply;

// Re-export commonly used types
pub use crate::core::{
    ErrorSeverity, GameError, GameLimit, GameResult, GameRng, MatchConfig, PawnColor, Pawns,
    PlayerId,
};

pub use crate::board::{Board, Island, TowerColor};

pub use crate::cards::{Assistant, CharacterEffect, CharacterKind};

pub use crate::roster::{Player, Wizard};

pub use crate::game::{Action, Game, GameEvent, GameState, MatchResult};
