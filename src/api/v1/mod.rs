//! Protected v1 API endpoints

pub mod groups;
pub mod invites;
pub mod links;
pub mod me;

use axum::{
    Router,
    routing::{get, post},
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        // Identity
        .route("/me", get(me::me))
        // Groups
        .route("/groups", post(groups::create_group).get(groups::list_groups))
        .route(
            "/groups/{id}",
            get(groups::get_group).delete(groups::delete_group),
        )
        .route(
            "/groups/{id}/members",
            post(groups::add_member).get(groups::list_members),
        )
        // Invites
        .route("/invites", post(invites::create_invite))
        .route("/invites/{code}", get(invites::get_invite))
        .route("/invites/{code}/accept", post(invites::accept_invite))
        .route("/groups/{id}/invites", get(invites::list_group_invites))
        // Links
        .route("/links", post(links::create_link))
        .route(
            "/links/{id}",
            get(links::get_link)
                .patch(links::update_link)
                .delete(links::delete_link),
        )
        .route("/groups/{id}/links", get(links::list_group_links))
}
