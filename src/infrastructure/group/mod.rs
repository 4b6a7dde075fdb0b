//! Group infrastructure

pub mod repository;
pub mod service;

pub use repository::PostgresGroupRepository;
pub use service::GroupService;
