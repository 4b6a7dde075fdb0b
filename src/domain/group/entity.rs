//! Group entity and identifier

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{GroupValidationError, validate_group_name};
use crate::domain::UserId;

/// Group identifier (UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its textual form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for GroupId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A private group of users sharing links with each other
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    id: GroupId,
    /// Display name
    name: String,
    /// Identity that created the group; the only identity allowed to
    /// delete it
    created_by: UserId,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group owned by `created_by`
    pub fn new(name: impl Into<String>, created_by: UserId) -> Result<Self, GroupValidationError> {
        let name = name.into();
        validate_group_name(&name)?;

        Ok(Self {
            id: GroupId::generate(),
            name,
            created_by,
            created_at: Utc::now(),
        })
    }

    /// Reconstruct a group from stored fields
    pub fn from_parts(
        id: GroupId,
        name: String,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            created_by,
            created_at,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the given identity created this group
    pub fn is_created_by(&self, user: &UserId) -> bool {
        &self.created_by == user
    }
}
