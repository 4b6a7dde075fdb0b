//! Invite aggregate - single-use codes admitting non-members into groups

pub mod code;
pub mod entity;
pub mod repository;

pub use code::{CODE_LENGTH, InviteCode, InviteCodeError};
pub use entity::Invite;
pub use repository::{InviteRepository, RedeemOutcome};

#[cfg(test)]
pub use repository::mock;
