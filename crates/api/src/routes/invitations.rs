//! Group invitation endpoints: issue and redeem.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::models::invitation::{
    InvitationResponse, RedeemInvitationRequest, RedeemInvitationResponse,
};
use domain::CoordinationError;
use persistence::repositories::{GroupRepository, InvitationRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Issue a single-use invitation into a group. Leaders only.
pub async fn create_invitation(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(group_id): Path<Uuid>,
) -> Result<(StatusCode, Json<InvitationResponse>), ApiError> {
    let group_repo = GroupRepository::new(state.pool.clone());
    group_repo
        .find_by_id(group_id)
        .await?
        .ok_or(CoordinationError::GroupNotFound)?;

    if !group_repo.is_leader(group_id, auth.user_id).await? {
        return Err(ApiError::Forbidden(
            "Only group leaders can issue invitations".into(),
        ));
    }

    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let invitation = invitation_repo.create(group_id, auth.user_id).await?;

    info!(
        invitation_id = %invitation.id,
        group_id = %group_id,
        created_by = %auth.user_id,
        "Invitation issued"
    );

    Ok((
        StatusCode::CREATED,
        Json(InvitationResponse {
            id: invitation.id,
            group_id: invitation.group_id,
            invited: invitation.invited,
            created_at: invitation.created_at,
        }),
    ))
}

/// Redeem an invitation and join its group. The invitation is single-use;
/// redemption and the membership it creates commit together.
pub async fn join_group(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<RedeemInvitationRequest>,
) -> Result<(StatusCode, Json<RedeemInvitationResponse>), ApiError> {
    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let (invitation, membership) = invitation_repo
        .redeem(request.invitation_id, auth.user_id)
        .await?;

    info!(
        invitation_id = %invitation.id,
        group_id = %invitation.group_id,
        user_id = %auth.user_id,
        "Invitation redeemed"
    );

    Ok((
        StatusCode::CREATED,
        Json(RedeemInvitationResponse {
            group_id: membership.group_id,
            membership_id: membership.id,
            joined_at: membership.joined_at,
        }),
    ))
}
