//! Membership repository trait

use async_trait::async_trait;

use super::entity::Membership;
use crate::domain::group::GroupId;
use crate::domain::{DomainError, UserId};

/// Repository for the membership relation.
///
/// `is_member` is the authorization primitive: it must always reflect
/// current stored state, so implementations never cache.
#[async_trait]
pub trait MembershipRepository: Send + Sync + std::fmt::Debug {
    /// Record a membership. A duplicate (group, user) pair is a conflict.
    async fn add(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Whether the user currently belongs to the group
    async fn is_member(&self, user: &UserId, group: &GroupId) -> Result<bool, DomainError>;

    /// List the members of a group, in join order
    async fn list_for_group(&self, group: &GroupId) -> Result<Vec<UserId>, DomainError>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockMembershipRepository;
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_mock_add_and_is_member() {
        let repo = MockMembershipRepository::new();
        let group = GroupId::generate();

        assert!(!repo.is_member(&user("user-a"), &group).await.unwrap());

        repo.add(&Membership::new(group, user("user-a")))
            .await
            .unwrap();

        assert!(repo.is_member(&user("user-a"), &group).await.unwrap());
        assert!(!repo.is_member(&user("user-b"), &group).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_duplicate_is_conflict() {
        let repo = MockMembershipRepository::new();
        let group = GroupId::generate();
        let membership = Membership::new(group, user("user-a"));

        repo.add(&membership).await.unwrap();
        let result = repo.add(&membership).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_mock_list_for_group_in_join_order() {
        let repo = MockMembershipRepository::new();
        let group = GroupId::generate();

        repo.add(&Membership::new(group, user("first")))
            .await
            .unwrap();
        repo.add(&Membership::new(group, user("second")))
            .await
            .unwrap();

        let members = repo.list_for_group(&group).await.unwrap();
        assert_eq!(members, vec![user("first"), user("second")]);
    }

    #[tokio::test]
    async fn test_mock_failing_lookups() {
        let repo = MockMembershipRepository::new();
        repo.set_fail_lookups(true);

        let result = repo.is_member(&user("user-a"), &GroupId::generate()).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
