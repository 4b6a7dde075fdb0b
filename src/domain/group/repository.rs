//! Group repository trait

use async_trait::async_trait;

use super::entity::{Group, GroupId};
use crate::domain::{DomainError, UserId};

/// Repository for managing groups
#[async_trait]
pub trait GroupRepository: Send + Sync + std::fmt::Debug {
    /// Persist a new group.
    ///
    /// The creator's membership row is written in the same unit of work;
    /// a group never exists without its creator as a member.
    async fn create(&self, group: &Group) -> Result<(), DomainError>;

    /// Get a group by ID
    async fn get(&self, id: &GroupId) -> Result<Option<Group>, DomainError>;

    /// List the groups a user belongs to, oldest first
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Group>, DomainError>;

    /// Delete a group by ID, cascading to memberships, invites and links.
    /// Returns false if no such group exists.
    async fn delete(&self, id: &GroupId) -> Result<bool, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::domain::membership::mock::MockMembershipRepository;
    use crate::domain::membership::{Membership, MembershipRepository};

    /// Mock implementation for testing.
    ///
    /// Shares a membership store so that group creation records the
    /// creator's membership, mirroring the transactional behavior of the
    /// real store.
    #[derive(Debug, Default)]
    pub struct MockGroupRepository {
        groups: Mutex<HashMap<GroupId, Group>>,
        memberships: Arc<MockMembershipRepository>,
    }

    impl MockGroupRepository {
        pub fn new(memberships: Arc<MockMembershipRepository>) -> Self {
            Self {
                groups: Mutex::new(HashMap::new()),
                memberships,
            }
        }
    }

    #[async_trait]
    impl GroupRepository for MockGroupRepository {
        async fn create(&self, group: &Group) -> Result<(), DomainError> {
            {
                let mut groups = self.groups.lock().unwrap();

                if groups.contains_key(&group.id()) {
                    return Err(DomainError::conflict(format!(
                        "Group '{}' already exists",
                        group.id()
                    )));
                }

                groups.insert(group.id(), group.clone());
            }

            self.memberships
                .add(&Membership::new(group.id(), group.created_by().clone()))
                .await
        }

        async fn get(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
            let groups = self.groups.lock().unwrap();
            Ok(groups.get(id).cloned())
        }

        async fn list_for_user(&self, user: &UserId) -> Result<Vec<Group>, DomainError> {
            let member_of = self.memberships.groups_of(user);
            let groups = self.groups.lock().unwrap();

            let mut result: Vec<Group> = groups
                .values()
                .filter(|g| member_of.contains(&g.id()))
                .cloned()
                .collect();
            result.sort_by_key(|g| g.created_at());

            Ok(result)
        }

        async fn delete(&self, id: &GroupId) -> Result<bool, DomainError> {
            let mut groups = self.groups.lock().unwrap();
            let removed = groups.remove(id).is_some();
            drop(groups);

            if removed {
                self.memberships.remove_group(id);
            }

            Ok(removed)
        }
    }
}
