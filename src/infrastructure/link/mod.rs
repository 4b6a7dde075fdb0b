//! Link infrastructure

pub mod repository;
pub mod service;

pub use repository::PostgresLinkRepository;
pub use service::{CreateLinkRequest, LinkService};
