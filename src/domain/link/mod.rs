//! Link aggregate

pub mod entity;
pub mod repository;

pub use entity::{Link, LinkId, LinkValidationError};
pub use repository::LinkRepository;

#[cfg(test)]
pub use repository::mock;
