//! Group service

use std::sync::Arc;

use tracing::info;

use crate::domain::group::{Group, GroupId, GroupRepository};
use crate::domain::membership::{Membership, MembershipRepository};
use crate::domain::{DomainError, UserId};
use crate::infrastructure::membership::MembershipGuard;

/// Group management: creation, lookup, membership listing and deletion.
///
/// Group creation is the one operation exempt from the membership guard -
/// no membership can exist before the group does. The creator's
/// membership is written by the repository in the same unit of work as
/// the group row.
#[derive(Debug)]
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    memberships: Arc<dyn MembershipRepository>,
    guard: MembershipGuard,
}

impl GroupService {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        memberships: Arc<dyn MembershipRepository>,
        guard: MembershipGuard,
    ) -> Self {
        Self {
            groups,
            memberships,
            guard,
        }
    }

    /// Create a group and record the creator's membership
    pub async fn create(
        &self,
        name: &str,
        creator: &UserId,
    ) -> Result<Group, DomainError> {
        let group = Group::new(name, creator.clone())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.groups.create(&group).await?;
        info!(group = %group.id(), "group created");

        Ok(group)
    }

    /// List the groups the requester belongs to
    pub async fn list_for_user(&self, user: &UserId) -> Result<Vec<Group>, DomainError> {
        self.groups.list_for_user(user).await
    }

    /// Fetch a group's public metadata. Requires authentication only.
    pub async fn get(&self, id: &GroupId) -> Result<Group, DomainError> {
        self.groups
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Group '{id}' not found")))
    }

    /// List a group's members. Members only.
    pub async fn members(
        &self,
        id: &GroupId,
        requester: &UserId,
    ) -> Result<Vec<UserId>, DomainError> {
        self.guard.require_member(requester, id).await?;
        self.memberships.list_for_group(id).await
    }

    /// Add a user to a group. Members only; a duplicate member surfaces
    /// as a conflict.
    pub async fn add_member(
        &self,
        id: &GroupId,
        requester: &UserId,
        new_member: UserId,
    ) -> Result<Membership, DomainError> {
        self.guard.require_member(requester, id).await?;

        let membership = Membership::new(*id, new_member);
        self.memberships.add(&membership).await?;

        Ok(membership)
    }

    /// Delete a group. Creator only; cascades to memberships, invites
    /// and links.
    pub async fn delete(&self, id: &GroupId, requester: &UserId) -> Result<(), DomainError> {
        let group = self.get(id).await?;

        if !group.is_created_by(requester) {
            return Err(DomainError::forbidden(
                "only the group creator can delete it",
            ));
        }

        if !self.groups.delete(id).await? {
            return Err(DomainError::not_found(format!("Group '{id}' not found")));
        }

        info!(group = %id, "group deleted");
        Ok(())
    }
}
