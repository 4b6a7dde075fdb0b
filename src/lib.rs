//! Grotto API
//!
//! A private link-sharing service for small groups:
//! - bearer-token verification against an external identity provider
//! - membership-scoped authorization for every group operation
//! - single-use invite codes with exactly-once redemption

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::AppState;
use domain::group::GroupRepository;
use domain::invite::InviteRepository;
use domain::link::LinkRepository;
use domain::membership::MembershipRepository;
use infrastructure::auth::{TokenVerifier, VerifierConfig};
use infrastructure::group::{GroupService, PostgresGroupRepository};
use infrastructure::invite::{InviteService, PostgresInviteRepository};
use infrastructure::link::{LinkService, PostgresLinkRepository};
use infrastructure::membership::{MembershipGuard, PostgresMembershipRepository};
use infrastructure::migrations::run_schema_migrations;

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let verifier = Arc::new(TokenVerifier::new(verifier_config(config)?));

    let database_url = config
        .database
        .url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
    info!("PostgreSQL connection established");

    run_schema_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    let groups: Arc<dyn GroupRepository> = Arc::new(PostgresGroupRepository::new(pool.clone()));
    let memberships: Arc<dyn MembershipRepository> =
        Arc::new(PostgresMembershipRepository::new(pool.clone()));
    let invites: Arc<dyn InviteRepository> = Arc::new(PostgresInviteRepository::new(pool.clone()));
    let links: Arc<dyn LinkRepository> = Arc::new(PostgresLinkRepository::new(pool));

    let guard = MembershipGuard::new(memberships.clone());

    let group_service = Arc::new(GroupService::new(groups, memberships, guard.clone()));
    let invite_service = Arc::new(InviteService::new(invites, guard.clone()));
    let link_service = Arc::new(LinkService::new(links, guard));

    Ok(AppState::new(
        verifier,
        group_service,
        invite_service,
        link_service,
    ))
}

/// Assemble the immutable token verification parameters from config and
/// environment
fn verifier_config(config: &AppConfig) -> anyhow::Result<VerifierConfig> {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

    let issuer = config
        .auth
        .issuer
        .clone()
        .or_else(|| std::env::var("JWT_ISSUER").ok())
        .ok_or_else(|| anyhow::anyhow!("JWT_ISSUER environment variable is required"))?;

    let audience = config
        .auth
        .audience
        .clone()
        .or_else(|| std::env::var("JWT_AUDIENCE").ok())
        .ok_or_else(|| anyhow::anyhow!("JWT_AUDIENCE environment variable is required"))?;

    Ok(VerifierConfig::new(secret, issuer, audience))
}
