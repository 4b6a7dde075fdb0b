//! Group endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Data, Json};
use crate::domain::UserId;
use crate::domain::group::{Group, GroupId};
use crate::domain::membership::Membership;

/// Request to create a new group
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupApiRequest {
    pub name: String,
}

/// Request to add a member to a group
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberApiRequest {
    pub user_id: String,
}

/// Group response
#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: String,
}

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id().to_string(),
            name: group.name().to_string(),
            created_by: group.created_by().to_string(),
            created_at: group.created_at().to_rfc3339(),
        }
    }
}

/// List groups response
#[derive(Debug, Clone, Serialize)]
pub struct ListGroupsResponse {
    pub groups: Vec<GroupResponse>,
    pub total: usize,
}

/// Members list response
#[derive(Debug, Clone, Serialize)]
pub struct MembersResponse {
    pub members: Vec<String>,
    pub total: usize,
}

/// Membership response
#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub group_id: String,
    pub user_id: String,
}

impl From<&Membership> for MembershipResponse {
    fn from(membership: &Membership) -> Self {
        Self {
            group_id: membership.group_id().to_string(),
            user_id: membership.user_id().to_string(),
        }
    }
}

pub(super) fn parse_group_id(id: &str) -> Result<GroupId, ApiError> {
    GroupId::parse(id).map_err(|_| ApiError::bad_request("Invalid group ID format"))
}

/// POST /v1/groups
pub async fn create_group(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateGroupApiRequest>,
) -> Result<(StatusCode, Data<GroupResponse>), ApiError> {
    debug!(name = %request.name, "creating group");

    let group = state.group_service.create(&request.name, &user).await?;

    Ok((StatusCode::CREATED, Data(GroupResponse::from(&group))))
}

/// GET /v1/groups
pub async fn list_groups(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Data<ListGroupsResponse>, ApiError> {
    let groups = state.group_service.list_for_user(&user).await?;

    let groups: Vec<GroupResponse> = groups.iter().map(GroupResponse::from).collect();
    let total = groups.len();

    Ok(Data(ListGroupsResponse { groups, total }))
}

/// GET /v1/groups/:id
pub async fn get_group(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<String>,
) -> Result<Data<GroupResponse>, ApiError> {
    let group_id = parse_group_id(&id)?;

    let group = state.group_service.get(&group_id).await?;

    Ok(Data(GroupResponse::from(&group)))
}

/// DELETE /v1/groups/:id
pub async fn delete_group(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Data<serde_json::Value>, ApiError> {
    let group_id = parse_group_id(&id)?;

    state.group_service.delete(&group_id, &user).await?;

    Ok(Data(serde_json::json!({
        "deleted": true,
        "id": id,
    })))
}

/// GET /v1/groups/:id/members
pub async fn list_members(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Data<MembersResponse>, ApiError> {
    let group_id = parse_group_id(&id)?;

    let members = state.group_service.members(&group_id, &user).await?;

    let members: Vec<String> = members.iter().map(ToString::to_string).collect();
    let total = members.len();

    Ok(Data(MembersResponse { members, total }))
}

/// POST /v1/groups/:id/members
pub async fn add_member(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<AddMemberApiRequest>,
) -> Result<(StatusCode, Data<MembershipResponse>), ApiError> {
    let group_id = parse_group_id(&id)?;

    let new_member =
        UserId::new(request.user_id).map_err(|_| ApiError::bad_request("Invalid user ID"))?;

    let membership = state
        .group_service
        .add_member(&group_id, &user, new_member)
        .await?;

    Ok((
        StatusCode::CREATED,
        Data(MembershipResponse::from(&membership)),
    ))
}
