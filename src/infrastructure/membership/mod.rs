//! Membership infrastructure

pub mod guard;
pub mod repository;

pub use guard::MembershipGuard;
pub use repository::PostgresMembershipRepository;
