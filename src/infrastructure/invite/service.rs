//! Invite lifecycle service

use std::sync::Arc;

use tracing::{info, warn};

use super::generator::InviteCodeGenerator;
use crate::domain::group::GroupId;
use crate::domain::invite::{Invite, InviteCode, InviteRepository, RedeemOutcome};
use crate::domain::membership::Membership;
use crate::domain::{DomainError, UserId};
use crate::infrastructure::membership::MembershipGuard;

/// Attempts at allocating a unique code before giving up. A collision of
/// sixty-bit codes is astronomically unlikely; more than one retry in a
/// row points at a store problem, not bad luck.
const MAX_CODE_ATTEMPTS: usize = 3;

/// Manages the invite lifecycle: unused -> used, exactly once.
///
/// Creation and listing are member-gated through the guard. Redemption
/// delegates the unused -> used transition to the repository's atomic
/// conditional update, so two racing redemptions of the same code resolve
/// to exactly one winner regardless of process count.
#[derive(Debug)]
pub struct InviteService {
    invites: Arc<dyn InviteRepository>,
    guard: MembershipGuard,
    generator: InviteCodeGenerator,
}

impl InviteService {
    pub fn new(invites: Arc<dyn InviteRepository>, guard: MembershipGuard) -> Self {
        Self {
            invites,
            guard,
            generator: InviteCodeGenerator::new(),
        }
    }

    /// Create an invite for a group. Members only.
    pub async fn create(
        &self,
        group: &GroupId,
        requester: &UserId,
    ) -> Result<Invite, DomainError> {
        self.guard.require_member(requester, group).await?;

        for attempt in 0..MAX_CODE_ATTEMPTS {
            let invite = Invite::new(self.generator.generate(), *group);

            match self.invites.create(&invite).await {
                Ok(()) => {
                    info!(group = %group, code = %invite.code(), "invite created");
                    return Ok(invite);
                }
                Err(DomainError::Conflict { .. }) => {
                    warn!(attempt, "invite code collision, drawing a fresh code");
                }
                Err(e) => return Err(e),
            }
        }

        Err(DomainError::internal(
            "could not allocate a unique invite code",
        ))
    }

    /// Look up an invite's metadata before redeeming. Read-only: reports
    /// `AlreadyUsed` for a consumed code without transitioning anything.
    pub async fn lookup(&self, code: &InviteCode) -> Result<Invite, DomainError> {
        let invite = self
            .invites
            .get(code)
            .await?
            .ok_or_else(|| DomainError::not_found("Invite not found"))?;

        if invite.is_used() {
            return Err(DomainError::AlreadyUsed);
        }

        Ok(invite)
    }

    /// Redeem an invite for the requester, joining them to its group.
    ///
    /// An existing member is rejected with `AlreadyMember` before the
    /// code is touched. The winner of a redemption race gets the
    /// membership; every loser observes `AlreadyUsed`.
    pub async fn redeem(
        &self,
        code: &InviteCode,
        requester: &UserId,
    ) -> Result<Membership, DomainError> {
        let invite = self
            .invites
            .get(code)
            .await?
            .ok_or_else(|| DomainError::not_found("Invite not found"))?;

        if invite.is_used() {
            return Err(DomainError::AlreadyUsed);
        }

        // A conflict check, not an authorization gate: store failures
        // surface as faults instead of being collapsed into Forbidden
        if self.guard.is_member(requester, &invite.group_id()).await? {
            return Err(DomainError::AlreadyMember);
        }

        match self.invites.redeem(code, requester).await? {
            RedeemOutcome::Redeemed(group_id) => {
                info!(group = %group_id, code = %code, "invite redeemed");
                Ok(Membership::new(group_id, requester.clone()))
            }
            RedeemOutcome::AlreadyUsed => Err(DomainError::AlreadyUsed),
        }
    }

    /// List a group's invites, oldest first. Members only.
    pub async fn list_by_group(
        &self,
        group: &GroupId,
        requester: &UserId,
    ) -> Result<Vec<Invite>, DomainError> {
        self.guard.require_member(requester, group).await?;
        self.invites.list_by_group(group).await
    }
}
