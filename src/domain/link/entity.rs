//! Link entity and identifier

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::group::GroupId;

/// Maximum length of a link URL
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors for invalid link fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkValidationError {
    #[error("link URL must not be empty")]
    EmptyUrl,

    #[error("link URL must be at most {MAX_URL_LENGTH} characters")]
    UrlTooLong,
}

/// Link identifier (UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(Uuid);

impl LinkId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for LinkId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A link posted into a group's feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    id: LinkId,
    /// Owning group; all access to the link is scoped to its members
    group_id: GroupId,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    /// Poster; the only identity allowed to edit or delete the link
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl Link {
    /// Create a new link posted by `created_by` into `group_id`
    pub fn new(
        group_id: GroupId,
        url: impl Into<String>,
        created_by: UserId,
    ) -> Result<Self, LinkValidationError> {
        let url = url.into();
        validate_url(&url)?;

        Ok(Self {
            id: LinkId::generate(),
            group_id,
            url,
            title: None,
            comment: None,
            created_by,
            created_at: Utc::now(),
        })
    }

    /// Set title (builder pattern)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set comment (builder pattern)
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Reconstruct a link from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: LinkId,
        group_id: GroupId,
        url: String,
        title: Option<String>,
        comment: Option<String>,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            group_id,
            url,
            title,
            comment,
            created_by,
            created_at,
        }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the given identity posted this link
    pub fn is_created_by(&self, user: &UserId) -> bool {
        &self.created_by == user
    }

    /// Replace the comment; `None` clears it
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}

fn validate_url(url: &str) -> Result<(), LinkValidationError> {
    if url.trim().is_empty() {
        return Err(LinkValidationError::EmptyUrl);
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(LinkValidationError::UrlTooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_link_creation() {
        let group = GroupId::generate();
        let link = Link::new(group, "https://example.com", user("user-a")).unwrap();

        assert_eq!(link.group_id(), group);
        assert_eq!(link.url(), "https://example.com");
        assert!(link.title().is_none());
        assert!(link.comment().is_none());
        assert!(link.is_created_by(&user("user-a")));
    }

    #[test]
    fn test_link_builders() {
        let link = Link::new(GroupId::generate(), "https://example.com", user("user-a"))
            .unwrap()
            .with_title("Example")
            .with_comment("worth a read");

        assert_eq!(link.title(), Some("Example"));
        assert_eq!(link.comment(), Some("worth a read"));
    }

    #[test]
    fn test_link_empty_url() {
        let result = Link::new(GroupId::generate(), "", user("user-a"));
        assert_eq!(result.unwrap_err(), LinkValidationError::EmptyUrl);
    }

    #[test]
    fn test_link_url_too_long() {
        let url = format!("https://example.com/{}", "x".repeat(MAX_URL_LENGTH));
        let result = Link::new(GroupId::generate(), url, user("user-a"));
        assert_eq!(result.unwrap_err(), LinkValidationError::UrlTooLong);
    }

    #[test]
    fn test_set_comment() {
        let mut link = Link::new(GroupId::generate(), "https://example.com", user("user-a"))
            .unwrap()
            .with_comment("first");

        link.set_comment(Some("second".to_string()));
        assert_eq!(link.comment(), Some("second"));

        link.set_comment(None);
        assert!(link.comment().is_none());
    }
}
