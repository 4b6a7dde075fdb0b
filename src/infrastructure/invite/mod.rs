//! Invite infrastructure

pub mod generator;
pub mod repository;
pub mod service;

pub use generator::InviteCodeGenerator;
pub use repository::PostgresInviteRepository;
pub use service::InviteService;
