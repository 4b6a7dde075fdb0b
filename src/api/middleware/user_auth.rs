//! Request authentication middleware
//!
//! Verifies the bearer token and attaches the resulting identity to the
//! request. Handlers receive the identity by declaring the extractor; a
//! request that never passed verification cannot reach them.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::UserId;
use crate::infrastructure::auth::bearer_token;

/// Extractor that requires a verified identity.
///
/// Extracts the token from the `Authorization: Bearer <token>` header and
/// runs full verification. Absence of an identity is always a 401 - it is
/// never treated as an anonymous or wildcard user.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserId);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let user = state.verifier.verify(token)?;
        debug!(user = %user, "request authenticated");

        Ok(RequireUser(user))
    }
}
