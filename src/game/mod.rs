//! The match orchestrator and its outward surface.
//!
//! ## Key Types
//!
//! - `Game`: owns every component of a match and validates each request
//! - `Action`/`ActionRecord`: inbound requests and the accepted history
//! - `GameEvent`: committed changes, drained by the session layer
//! - `BoardView`, `SchoolView`, `CloudView`, `CharacterView`: snapshots
//! - `MatchResult`: who won

pub mod action;
pub mod effects;
pub mod engine;
pub mod event;
pub mod result;
pub mod view;

pub use action::{Action, ActionRecord};
pub use engine::{Game, GameState};
pub use event::{GameEvent, StudentDestination};
pub use result::{MatchResult, Standing};
pub use view::{BoardView, CharacterView, CloudView, IslandView, SchoolView};
