//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::TokenVerifier;
use crate::infrastructure::group::GroupService;
use crate::infrastructure::invite::InviteService;
use crate::infrastructure::link::LinkService;

/// Application state shared across request handlers.
///
/// Everything in here is immutable after startup; per-request state
/// travels through extractors, never through this struct.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub group_service: Arc<GroupService>,
    pub invite_service: Arc<InviteService>,
    pub link_service: Arc<LinkService>,
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        verifier: Arc<TokenVerifier>,
        group_service: Arc<GroupService>,
        invite_service: Arc<InviteService>,
        link_service: Arc<LinkService>,
    ) -> Self {
        Self {
            verifier,
            group_service,
            invite_service,
            link_service,
        }
    }
}
