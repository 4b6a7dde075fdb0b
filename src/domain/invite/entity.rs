//! Invite entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::code::InviteCode;
use crate::domain::UserId;
use crate::domain::group::GroupId;

/// A single-use invitation into a group.
///
/// Lifecycle: unused (`used_by` absent) -> used (`used_by` set), with no
/// way back. The transition itself lives in the store as an atomic
/// conditional update; this entity only reflects stored state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    /// Unguessable code, unique across all invites
    code: InviteCode,
    /// Group the invite admits into
    group_id: GroupId,
    /// Identity that consumed the invite, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    used_by: Option<UserId>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Invite {
    /// Create a new unused invite for a group
    pub fn new(code: InviteCode, group_id: GroupId) -> Self {
        Self {
            code,
            group_id,
            used_by: None,
            created_at: Utc::now(),
        }
    }

    /// Reconstruct an invite from stored fields
    pub fn from_parts(
        code: InviteCode,
        group_id: GroupId,
        used_by: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            group_id,
            used_by,
            created_at,
        }
    }

    pub fn code(&self) -> &InviteCode {
        &self.code
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn used_by(&self) -> Option<&UserId> {
        self.used_by.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_used(&self) -> bool {
        self.used_by.is_some()
    }
}
