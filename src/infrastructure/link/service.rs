//! Link service

use std::sync::Arc;

use tracing::info;

use crate::domain::group::GroupId;
use crate::domain::link::{Link, LinkId, LinkRepository};
use crate::domain::{DomainError, UserId};
use crate::infrastructure::membership::MembershipGuard;

/// Request for posting a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    pub group_id: GroupId,
    pub url: String,
    pub title: Option<String>,
    pub comment: Option<String>,
}

/// Link management within a group's feed.
///
/// Every operation is scoped to the owning group's members; edits and
/// deletion are further restricted to the poster.
#[derive(Debug)]
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    guard: MembershipGuard,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkRepository>, guard: MembershipGuard) -> Self {
        Self { links, guard }
    }

    /// Post a link into a group. Members only.
    pub async fn create(
        &self,
        requester: &UserId,
        request: CreateLinkRequest,
    ) -> Result<Link, DomainError> {
        self.guard.require_member(requester, &request.group_id).await?;

        let mut link = Link::new(request.group_id, request.url, requester.clone())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(title) = request.title {
            link = link.with_title(title);
        }
        if let Some(comment) = request.comment {
            link = link.with_comment(comment);
        }

        self.links.create(&link).await?;
        info!(link = %link.id(), group = %link.group_id(), "link created");

        Ok(link)
    }

    /// Fetch a link. Members of its group only.
    pub async fn get(&self, id: &LinkId, requester: &UserId) -> Result<Link, DomainError> {
        let link = self
            .links
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Link '{id}' not found")))?;

        self.guard.require_member(requester, &link.group_id()).await?;

        Ok(link)
    }

    /// List a group's links, newest first. Members only.
    pub async fn list_by_group(
        &self,
        group: &GroupId,
        requester: &UserId,
    ) -> Result<Vec<Link>, DomainError> {
        self.guard.require_member(requester, group).await?;
        self.links.list_by_group(group).await
    }

    /// Replace a link's comment. Poster only.
    pub async fn update_comment(
        &self,
        id: &LinkId,
        requester: &UserId,
        comment: Option<String>,
    ) -> Result<Link, DomainError> {
        let mut link = self.get(id, requester).await?;

        if !link.is_created_by(requester) {
            return Err(DomainError::forbidden(
                "only the link's poster can modify it",
            ));
        }

        link.set_comment(comment);
        self.links.update(&link).await?;

        Ok(link)
    }

    /// Delete a link. Poster only.
    pub async fn delete(&self, id: &LinkId, requester: &UserId) -> Result<(), DomainError> {
        let link = self.get(id, requester).await?;

        if !link.is_created_by(requester) {
            return Err(DomainError::forbidden(
                "only the link's poster can delete it",
            ));
        }

        if !self.links.delete(id).await? {
            return Err(DomainError::not_found(format!("Link '{id}' not found")));
        }

        info!(link = %id, "link deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::link::mock::MockLinkRepository;
    use crate::domain::membership::mock::MockMembershipRepository;
    use crate::domain::membership::{Membership, MembershipRepository};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    struct Fixture {
        service: LinkService,
        group: GroupId,
    }

    /// Service with `user-a` and `user-b` members of the fixture group
    async fn fixture() -> Fixture {
        let memberships = Arc::new(MockMembershipRepository::new());
        let group = GroupId::generate();

        for id in ["user-a", "user-b"] {
            memberships
                .add(&Membership::new(group, user(id)))
                .await
                .unwrap();
        }

        let service = LinkService::new(
            Arc::new(MockLinkRepository::new()),
            MembershipGuard::new(memberships),
        );

        Fixture { service, group }
    }

    fn request(group: GroupId) -> CreateLinkRequest {
        CreateLinkRequest {
            group_id: group,
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_membership() {
        let f = fixture().await;

        let result = f.service.create(&user("stranger"), request(f.group)).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let link = f.service.create(&user("user-a"), request(f.group)).await.unwrap();
        assert_eq!(link.title(), Some("Example"));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_url() {
        let f = fixture().await;
        let mut req = request(f.group);
        req.url = String::new();

        let result = f.service.create(&user("user-a"), req).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_scoped_to_group_members() {
        let f = fixture().await;
        let link = f.service.create(&user("user-a"), request(f.group)).await.unwrap();

        assert!(f.service.get(&link.id(), &user("user-b")).await.is_ok());

        let result = f.service.get(&link.id(), &user("stranger")).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_get_unknown_link() {
        let f = fixture().await;
        let result = f.service.get(&LinkId::generate(), &user("user-a")).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let f = fixture().await;
        f.service.create(&user("user-a"), request(f.group)).await.unwrap();
        f.service.create(&user("user-b"), request(f.group)).await.unwrap();

        let links = f
            .service
            .list_by_group(&f.group, &user("user-a"))
            .await
            .unwrap();

        assert_eq!(links.len(), 2);
        assert!(links[0].created_at() >= links[1].created_at());
    }

    #[tokio::test]
    async fn test_update_comment_poster_only() {
        let f = fixture().await;
        let link = f.service.create(&user("user-a"), request(f.group)).await.unwrap();

        // Another member cannot edit
        let result = f
            .service
            .update_comment(&link.id(), &user("user-b"), Some("mine now".into()))
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let updated = f
            .service
            .update_comment(&link.id(), &user("user-a"), Some("a note".into()))
            .await
            .unwrap();
        assert_eq!(updated.comment(), Some("a note"));
    }

    #[tokio::test]
    async fn test_delete_poster_only() {
        let f = fixture().await;
        let link = f.service.create(&user("user-a"), request(f.group)).await.unwrap();

        let result = f.service.delete(&link.id(), &user("user-b")).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        f.service.delete(&link.id(), &user("user-a")).await.unwrap();

        let result = f.service.get(&link.id(), &user("user-a")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
