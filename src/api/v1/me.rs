//! Authenticated identity endpoint

use serde::Serialize;

use crate::api::middleware::RequireUser;
use crate::api::types::Data;

/// Identity response
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub id: String,
}

/// GET /v1/me
pub async fn me(RequireUser(user): RequireUser) -> Data<MeResponse> {
    Data(MeResponse {
        id: user.to_string(),
    })
}
