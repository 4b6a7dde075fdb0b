//! Link repository trait

use async_trait::async_trait;

use super::entity::{Link, LinkId};
use crate::domain::DomainError;
use crate::domain::group::GroupId;

/// Repository for links
#[async_trait]
pub trait LinkRepository: Send + Sync + std::fmt::Debug {
    /// Persist a new link
    async fn create(&self, link: &Link) -> Result<(), DomainError>;

    /// Get a link by ID
    async fn get(&self, id: &LinkId) -> Result<Option<Link>, DomainError>;

    /// List a group's links, newest first
    async fn list_by_group(&self, group: &GroupId) -> Result<Vec<Link>, DomainError>;

    /// Persist changes to an existing link
    async fn update(&self, link: &Link) -> Result<(), DomainError>;

    /// Delete a link by ID. Returns false if no such link exists.
    async fn delete(&self, id: &LinkId) -> Result<bool, DomainError>;
}
