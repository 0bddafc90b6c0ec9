//! Core match types: pawns, players, errors, RNG, configuration.
//!
//! Everything here is a leaf: no module in `core` depends on the board, the
//! supplies or the game orchestrator.

pub mod config;
pub mod error;
pub mod pawn;
pub mod player;
pub mod rng;

pub use config::{GameLimit, MatchConfig};
pub use error::{ErrorSeverity, GameError, GameResult};
pub use pawn::{PawnColor, Pawns};
pub use player::PlayerId;
pub use rng::GameRng;
