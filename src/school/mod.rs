//! Player schools and professor control.
//!
//! ## Key Types
//!
//! - `School`: entrance plus hall rows of one player
//! - `ProfessorAssignor`: which player controls each professor
//! - `HallManager`: hall placement, professor recount and coin seats

pub mod hall;
pub mod professor;
#[allow(clippy::module_inception)]
pub mod school;

pub use hall::{HallManager, HallOutcome, COIN_SEATS};
pub use professor::{ProfessorAssignor, ProfessorChange, ProfessorRule};
pub use school::School;
