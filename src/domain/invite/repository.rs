//! Invite repository trait

use async_trait::async_trait;

use super::code::InviteCode;
use super::entity::Invite;
use crate::domain::group::GroupId;
use crate::domain::{DomainError, UserId};

/// Result of an attempted redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// The caller won the transition; membership in the returned group
    /// was recorded in the same unit of work
    Redeemed(GroupId),
    /// The invite was consumed before this attempt could claim it
    AlreadyUsed,
}

/// Repository for invites.
///
/// `redeem` is the linearization point of the invite lifecycle: the
/// unused -> used transition and the membership insert must commit as one
/// atomic unit, expressed as a conditional update rather than a
/// read-then-write pair. Under concurrent redemption of the same code
/// exactly one caller observes `Redeemed`.
#[async_trait]
pub trait InviteRepository: Send + Sync + std::fmt::Debug {
    /// Persist a new unused invite. A code collision is a conflict.
    async fn create(&self, invite: &Invite) -> Result<(), DomainError>;

    /// Get an invite by code, used or not
    async fn get(&self, code: &InviteCode) -> Result<Option<Invite>, DomainError>;

    /// Atomically consume an unused invite for `user` and record the
    /// membership. Returns `AlreadyUsed` when the conditional update
    /// matches no row.
    async fn redeem(
        &self,
        code: &InviteCode,
        user: &UserId,
    ) -> Result<RedeemOutcome, DomainError>;

    /// List a group's invites, oldest first
    async fn list_by_group(&self, group: &GroupId) -> Result<Vec<Invite>, DomainError>;
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
    /// Redemption performs a compare-and-set under a single lock, giving
    /// the same exactly-once guarantee as the store's conditional update.
    #[derive(Debug, Default)]
    pub struct MockInviteRepository {
        invites: Mutex<HashMap<InviteCode, Invite>>,
        memberships: Arc<MockMembershipRepository>,
    }

    impl MockInviteRepository {
        pub fn new(memberships: Arc<MockMembershipRepository>) -> Self {
            Self {
                invites: Mutex::new(HashMap::new()),
                memberships,
            }
        }
    }

    #[async_trait]
    impl InviteRepository for MockInviteRepository {
        async fn create(&self, invite: &Invite) -> Result<(), DomainError> {
            let mut invites = self.invites.lock().unwrap();

            if invites.contains_key(invite.code()) {
                return Err(DomainError::conflict(format!(
                    "Invite code '{}' already exists",
                    invite.code()
                )));
            }

            invites.insert(invite.code().clone(), invite.clone());
            Ok(())
        }

        async fn get(&self, code: &InviteCode) -> Result<Option<Invite>, DomainError> {
            let invites = self.invites.lock().unwrap();
            Ok(invites.get(code).cloned())
        }

        async fn redeem(
            &self,
            code: &InviteCode,
            user: &UserId,
        ) -> Result<RedeemOutcome, DomainError> {
            let group_id = {
                let mut invites = self.invites.lock().unwrap();

                match invites.get(code) {
                    Some(invite) if !invite.is_used() => {
                        let group_id = invite.group_id();
                        let used = Invite::from_parts(
                            code.clone(),
                            group_id,
                            Some(user.clone()),
                            invite.created_at(),
                        );
                        invites.insert(code.clone(), used);
                        group_id
                    }
                    _ => return Ok(RedeemOutcome::AlreadyUsed),
                }
            };

            self.memberships
                .add(&Membership::new(group_id, user.clone()))
                .await?;

            Ok(RedeemOutcome::Redeemed(group_id))
        }

        async fn list_by_group(&self, group: &GroupId) -> Result<Vec<Invite>, DomainError> {
            let invites = self.invites.lock().unwrap();

            let mut result: Vec<Invite> = invites
                .values()
                .filter(|i| i.group_id() == *group)
                .cloned()
                .collect();
            result.sort_by_key(|i| i.created_at());

            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::mock::MockInviteRepository;
    use super::*;
    use crate::domain::membership::MembershipRepository;
    use crate::domain::membership::mock::MockMembershipRepository;

    fn code(s: &str) -> InviteCode {
        InviteCode::new(s).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_mock_create_and_get() {
        let repo = MockInviteRepository::new(Arc::new(MockMembershipRepository::new()));
        let invite = Invite::new(code("aaaaaaaaaa"), GroupId::generate());

        repo.create(&invite).await.unwrap();

        let fetched = repo.get(invite.code()).await.unwrap().unwrap();
        assert_eq!(fetched.group_id(), invite.group_id());
        assert!(!fetched.is_used());
    }

    #[tokio::test]
    async fn test_mock_code_collision_is_conflict() {
        let repo = MockInviteRepository::new(Arc::new(MockMembershipRepository::new()));
        let first = Invite::new(code("aaaaaaaaaa"), GroupId::generate());
        let second = Invite::new(code("aaaaaaaaaa"), GroupId::generate());

        repo.create(&first).await.unwrap();
        let result = repo.create(&second).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_mock_redeem_marks_used_and_adds_member() {
        let memberships = Arc::new(MockMembershipRepository::new());
        let repo = MockInviteRepository::new(memberships.clone());
        let group = GroupId::generate();
        let invite = Invite::new(code("aaaaaaaaaa"), group);

        repo.create(&invite).await.unwrap();

        let outcome = repo.redeem(invite.code(), &user("user-b")).await.unwrap();
        assert_eq!(outcome, RedeemOutcome::Redeemed(group));

        let fetched = repo.get(invite.code()).await.unwrap().unwrap();
        assert_eq!(fetched.used_by(), Some(&user("user-b")));
        assert!(memberships.is_member(&user("user-b"), &group).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_redeem_twice_loses() {
        let repo = MockInviteRepository::new(Arc::new(MockMembershipRepository::new()));
        let invite = Invite::new(code("aaaaaaaaaa"), GroupId::generate());

        repo.create(&invite).await.unwrap();
        repo.redeem(invite.code(), &user("user-b")).await.unwrap();

        let outcome = repo.redeem(invite.code(), &user("user-c")).await.unwrap();
        assert_eq!(outcome, RedeemOutcome::AlreadyUsed);
    }

    #[tokio::test]
    async fn test_mock_list_by_group_oldest_first() {
        let repo = MockInviteRepository::new(Arc::new(MockMembershipRepository::new()));
        let group = GroupId::generate();

        for c in ["aaaaaaaaaa", "bbbbbbbbbb"] {
            repo.create(&Invite::new(code(c), group)).await.unwrap();
        }
        repo.create(&Invite::new(code("cccccccccc"), GroupId::generate()))
            .await
            .unwrap();

        let invites = repo.list_by_group(&group).await.unwrap();
        assert_eq!(invites.len(), 2);
        assert!(invites[0].created_at() <= invites[1].created_at());
    }
}
