//! Group endpoints: creation and detail.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::group::{CreateGroupRequest, GroupResponse};
use domain::CoordinationError;
use persistence::repositories::{GroupRepository, UserRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create a new group. The creator is seated as its founding leader in
/// the same transaction.
pub async fn create_group(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), ApiError> {
    request.validate()?;

    if !auth.role.is_artist() {
        return Err(ApiError::Forbidden("Only artists can create groups".into()));
    }

    let user_repo = UserRepository::new(state.pool.clone());
    if !user_repo.exists(auth.user_id).await? {
        return Err(CoordinationError::UserNotFound.into());
    }

    let group_repo = GroupRepository::new(state.pool.clone());
    let (group, _membership) = group_repo
        .create_group(
            &request.name,
            &request.slug,
            request.description.as_deref(),
            auth.user_id,
        )
        .await?;

    info!(group_id = %group.id, slug = %group.slug, created_by = %auth.user_id, "Group created");

    let response = GroupResponse {
        id: group.id,
        name: group.name,
        slug: group.slug,
        description: group.description,
        member_count: 1,
        created_at: group.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Group detail with its member count.
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupResponse>, ApiError> {
    let group_repo = GroupRepository::new(state.pool.clone());
    let group = group_repo
        .find_with_member_count(group_id)
        .await?
        .ok_or(CoordinationError::GroupNotFound)?;

    Ok(Json(GroupResponse {
        id: group.id,
        name: group.name,
        slug: group.slug,
        description: group.description,
        member_count: group.member_count,
        created_at: group.created_at,
    }))
}
