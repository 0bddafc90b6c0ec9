//! The island ring.
//!
//! ## Key Types
//!
//! - `Island`: students, tower and ban tiles of one ring entry
//! - `Board`: the ring, mother nature, conquest and merging
//! - `TowerSupply`: towers each tower color has left to place

#[allow(clippy::module_inception)]
pub mod board;
pub mod island;
pub mod tower;

pub use board::{
    Board, InfluenceContext, InfluenceRule, Merge, Resolution, TowerChange, SEEDED_ISLANDS,
};
pub use island::Island;
pub use tower::{TowerColor, TowerSupply};
