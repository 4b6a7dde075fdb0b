//! Invite endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::groups::{MembershipResponse, parse_group_id};
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Data, Json};
use crate::domain::invite::{Invite, InviteCode};

/// Request to create a new invite
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInviteApiRequest {
    pub group_id: String,
}

/// Invite response; `used_by` is surfaced only once set
#[derive(Debug, Clone, Serialize)]
pub struct InviteResponse {
    pub code: String,
    pub group_id: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_by: Option<String>,
}

impl From<&Invite> for InviteResponse {
    fn from(invite: &Invite) -> Self {
        Self {
            code: invite.code().to_string(),
            group_id: invite.group_id().to_string(),
            created_at: invite.created_at().to_rfc3339(),
            used_by: invite.used_by().map(ToString::to_string),
        }
    }
}

/// List invites response
#[derive(Debug, Clone, Serialize)]
pub struct ListInvitesResponse {
    pub invites: Vec<InviteResponse>,
    pub total: usize,
}

fn parse_code(code: &str) -> Result<InviteCode, ApiError> {
    InviteCode::new(code).map_err(|_| ApiError::bad_request("Invalid invite code"))
}

/// POST /v1/invites
pub async fn create_invite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateInviteApiRequest>,
) -> Result<(StatusCode, Data<InviteResponse>), ApiError> {
    let group_id = parse_group_id(&request.group_id)?;
    debug!(group = %group_id, "creating invite");

    let invite = state.invite_service.create(&group_id, &user).await?;

    Ok((StatusCode::CREATED, Data(InviteResponse::from(&invite))))
}

/// GET /v1/invites/:code
pub async fn get_invite(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(code): Path<String>,
) -> Result<Data<InviteResponse>, ApiError> {
    let code = parse_code(&code)?;

    let invite = state.invite_service.lookup(&code).await?;

    Ok(Data(InviteResponse::from(&invite)))
}

/// POST /v1/invites/:code/accept
pub async fn accept_invite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(code): Path<String>,
) -> Result<Data<MembershipResponse>, ApiError> {
    let code = parse_code(&code)?;

    let membership = state.invite_service.redeem(&code, &user).await?;

    Ok(Data(MembershipResponse::from(&membership)))
}

/// GET /v1/groups/:id/invites
pub async fn list_group_invites(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Data<ListInvitesResponse>, ApiError> {
    let group_id = parse_group_id(&id)?;

    let invites = state.invite_service.list_by_group(&group_id, &user).await?;

    let invites: Vec<InviteResponse> = invites.iter().map(InviteResponse::from).collect();
    let total = invites.len();

    Ok(Data(ListInvitesResponse { invites, total }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::domain::group::GroupId;

    #[test]
    fn test_create_invite_request_deserialization() {
        let json = r#"{"group_id": "1f4a41f0-7c60-4c7a-9464-63fe522b07a5"}"#;

        let request: CreateInviteApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.group_id, "1f4a41f0-7c60-4c7a-9464-63fe522b07a5");
    }

    #[test]
    fn test_invite_response_unused_omits_used_by() {
        let invite = Invite::new(InviteCode::new("aB3-_x9Zkq").unwrap(), GroupId::generate());
        let json = serde_json::to_string(&InviteResponse::from(&invite)).unwrap();

        assert!(json.contains("\"code\":\"aB3-_x9Zkq\""));
        assert!(!json.contains("used_by"));
    }

    #[test]
    fn test_invite_response_used_includes_used_by() {
        let invite = Invite::from_parts(
            InviteCode::new("aB3-_x9Zkq").unwrap(),
            GroupId::generate(),
            Some(UserId::new("user-b").unwrap()),
            chrono::Utc::now(),
        );
        let json = serde_json::to_string(&InviteResponse::from(&invite)).unwrap();

        assert!(json.contains("\"used_by\":\"user-b\""));
    }

    #[test]
    fn test_parse_code_rejects_garbage() {
        assert!(parse_code("aB3-_x9Zkq").is_ok());
        assert!(parse_code("not a code").is_err());
    }
}
