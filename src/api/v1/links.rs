//! Link endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::groups::parse_group_id;
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Data, Json};
use crate::domain::link::{Link, LinkId};
use crate::infrastructure::link::CreateLinkRequest;

/// Request to post a new link
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkApiRequest {
    pub group_id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Request to update a link's comment; omitting the field clears it
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLinkApiRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

/// Link response
#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub id: String,
    pub group_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

impl From<&Link> for LinkResponse {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id().to_string(),
            group_id: link.group_id().to_string(),
            url: link.url().to_string(),
            title: link.title().map(String::from),
            comment: link.comment().map(String::from),
            created_by: link.created_by().to_string(),
            created_at: link.created_at().to_rfc3339(),
        }
    }
}

/// List links response
#[derive(Debug, Clone, Serialize)]
pub struct ListLinksResponse {
    pub links: Vec<LinkResponse>,
    pub total: usize,
}

fn parse_link_id(id: &str) -> Result<LinkId, ApiError> {
    LinkId::parse(id).map_err(|_| ApiError::bad_request("Invalid link ID format"))
}

/// POST /v1/links
pub async fn create_link(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateLinkApiRequest>,
) -> Result<(StatusCode, Data<LinkResponse>), ApiError> {
    let group_id = parse_group_id(&request.group_id)?;
    debug!(group = %group_id, "posting link");

    let link = state
        .link_service
        .create(
            &user,
            CreateLinkRequest {
                group_id,
                url: request.url,
                title: request.title,
                comment: request.comment,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Data(LinkResponse::from(&link))))
}

/// GET /v1/links/:id
pub async fn get_link(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Data<LinkResponse>, ApiError> {
    let link_id = parse_link_id(&id)?;

    let link = state.link_service.get(&link_id, &user).await?;

    Ok(Data(LinkResponse::from(&link)))
}

/// GET /v1/groups/:id/links
pub async fn list_group_links(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Data<ListLinksResponse>, ApiError> {
    let group_id = parse_group_id(&id)?;

    let links = state.link_service.list_by_group(&group_id, &user).await?;

    let links: Vec<LinkResponse> = links.iter().map(LinkResponse::from).collect();
    let total = links.len();

    Ok(Data(ListLinksResponse { links, total }))
}

/// PATCH /v1/links/:id
pub async fn update_link(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateLinkApiRequest>,
) -> Result<Data<LinkResponse>, ApiError> {
    let link_id = parse_link_id(&id)?;

    let link = state
        .link_service
        .update_comment(&link_id, &user, request.comment)
        .await?;

    Ok(Data(LinkResponse::from(&link)))
}

/// DELETE /v1/links/:id
pub async fn delete_link(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Data<serde_json::Value>, ApiError> {
    let link_id = parse_link_id(&id)?;

    state.link_service.delete(&link_id, &user).await?;

    Ok(Data(serde_json::json!({
        "deleted": true,
        "id": id,
    })))
}
