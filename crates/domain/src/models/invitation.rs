//! Group invitation domain models.
//!
//! An invitation is a single-use token. It is created unredeemed and flips
//! to redeemed exactly once, atomically with the membership it creates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single-use invitation into a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupInvitation {
    pub id: Uuid,
    pub group_id: Uuid,
    /// True once the invitation has been redeemed. Immutable afterward.
    pub invited: bool,
    /// The membership created by redemption, set together with `invited`.
    pub membership_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request to redeem an invitation and join its group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RedeemInvitationRequest {
    pub invitation_id: Uuid,
}

/// Response after issuing an invitation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationResponse {
    pub id: Uuid,
    pub group_id: Uuid,
    pub invited: bool,
    pub created_at: DateTime<Utc>,
}

/// Response after redeeming an invitation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RedeemInvitationResponse {
    pub group_id: Uuid,
    pub membership_id: Uuid,
    pub joined_at: DateTime<Utc>,
}
