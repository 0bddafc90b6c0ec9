//! Shared supplies: the student sack, the clouds and the coin bank.
//!
//! ## Key Types
//!
//! - `Sack`: randomized student pool
//! - `CloudManager`: per-round student offers
//! - `Bank`: zero-sum coin economy (expert mode)

pub mod bank;
pub mod cloud;
pub mod sack;

pub use bank::Bank;
pub use cloud::{Cloud, CloudFill, CloudManager};
pub use sack::{Sack, SackView};
