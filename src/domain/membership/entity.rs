//! Membership relation

use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::group::GroupId;

/// The fact that an identity belongs to a group.
///
/// Unique per (group, user) pair; written once and never updated. This is
/// the sole basis for group-scoped authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    group_id: GroupId,
    user_id: UserId,
}

impl Membership {
    pub fn new(group_id: GroupId, user_id: UserId) -> Self {
        Self { group_id, user_id }
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_fields() {
        let group = GroupId::generate();
        let user = UserId::new("user-a").unwrap();
        let membership = Membership::new(group, user.clone());

        assert_eq!(membership.group_id(), group);
        assert_eq!(membership.user_id(), &user);
    }

    #[test]
    fn test_membership_serialization() {
        let membership = Membership::new(GroupId::generate(), UserId::new("user-a").unwrap());
        let json = serde_json::to_string(&membership).unwrap();

        assert!(json.contains("\"group_id\":"));
        assert!(json.contains("\"user_id\":\"user-a\""));
    }
}
