//! Membership-based authorization guard

use std::sync::Arc;

use tracing::error;

use crate::domain::group::GroupId;
use crate::domain::membership::MembershipRepository;
use crate::domain::{DomainError, UserId};

/// Authorization guard over the membership relation.
///
/// Every group-scoped operation consults this guard before acting. Each
/// call re-queries the store - an authorization decision is never served
/// from a cache. The guard fails closed: a store failure during a lookup
/// denies access rather than letting the request proceed.
#[derive(Debug, Clone)]
pub struct MembershipGuard {
    memberships: Arc<dyn MembershipRepository>,
}

impl MembershipGuard {
    pub fn new(memberships: Arc<dyn MembershipRepository>) -> Self {
        Self { memberships }
    }

    /// Whether the user currently belongs to the group. Store failures
    /// propagate; use `require_member` when enforcing access.
    pub async fn is_member(&self, user: &UserId, group: &GroupId) -> Result<bool, DomainError> {
        self.memberships.is_member(user, group).await
    }

    /// Enforce membership. Non-membership and store failures both come
    /// back as `Forbidden`.
    pub async fn require_member(&self, user: &UserId, group: &GroupId) -> Result<(), DomainError> {
        match self.memberships.is_member(user, group).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DomainError::forbidden("not a member of this group")),
            Err(e) => {
                error!(group = %group, error = %e, "membership lookup failed, denying access");
                Err(DomainError::forbidden("not a member of this group"))
            }
        }
    }
}
