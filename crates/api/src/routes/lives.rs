//! Live endpoints: creation, edit, detail, and performance request
//! replies.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::live::{
    CreateLiveRequest, EditLiveRequest, LiveResponse, LiveStyleKind, PerformerInfo, RequestSummary,
};
use domain::models::performance_request::{ReplyDecision, ReplyRequest, ReplyResponse};
use domain::services::notification::DomainEvent;
use domain::CoordinationError;
use persistence::entities::LiveEntity;
use persistence::repositories::{
    GroupRepository, LiveFields, LiveRepository, PerformanceRequestRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_live_created;
use crate::services::fanout::dispatch_after_commit;

/// Create a live hosted by one of the author's groups.
///
/// Declared non-host performers become pending performance requests; the
/// host performs unconditionally. Followers of every declared performer
/// are notified once the live has committed.
pub async fn create_live(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateLiveRequest>,
) -> Result<(StatusCode, Json<LiveResponse>), ApiError> {
    request.validate()?;

    if !auth.role.is_artist() {
        return Err(CoordinationError::FanCannotCreateLive.into());
    }

    request.style.validate_for_host(request.host_group_id)?;

    let group_repo = GroupRepository::new(state.pool.clone());
    group_repo
        .find_by_id(request.host_group_id)
        .await?
        .ok_or(CoordinationError::GroupNotFound)?;

    if !group_repo
        .is_member(request.host_group_id, auth.user_id)
        .await?
    {
        return Err(CoordinationError::NotMemberOfGroup.into());
    }

    let guest_group_ids = request.style.guest_performer_ids(request.host_group_id);
    for group_id in &guest_group_ids {
        group_repo
            .find_by_id(*group_id)
            .await?
            .ok_or(CoordinationError::GroupNotFound)?;
    }

    let fields = LiveFields {
        title: request.title.clone(),
        venue: request.venue.clone(),
        artwork_url: request.artwork_url.clone(),
        opens_at: request.opens_at,
        starts_at: request.starts_at,
        price: request.price,
    };

    let live_repo = LiveRepository::new(state.pool.clone());
    let live = live_repo
        .create_live(
            request.host_group_id,
            auth.user_id,
            request.style.kind().into(),
            &fields,
            &guest_group_ids,
        )
        .await?;

    let style_kind: LiveStyleKind = live.style.into();
    record_live_created(&style_kind.to_string());

    info!(
        live_id = %live.id,
        host_group_id = %live.host_group_id,
        style = %style_kind,
        guest_count = guest_group_ids.len(),
        author_id = %auth.user_id,
        "Live created"
    );

    dispatch_after_commit(
        state.notifier.clone(),
        DomainEvent::LiveCreated {
            live_id: live.id,
            title: live.title.clone(),
            host_group_id: live.host_group_id,
            guest_group_ids,
        },
    );

    let response = live_response(&state.pool, live).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Edit a live's descriptive fields. Style, host, and the performer set
/// are fixed at creation.
pub async fn edit_live(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(live_id): Path<Uuid>,
    Json(request): Json<EditLiveRequest>,
) -> Result<Json<LiveResponse>, ApiError> {
    request.validate()?;

    let live_repo = LiveRepository::new(state.pool.clone());
    let live = live_repo
        .find_by_id(live_id)
        .await?
        .ok_or(CoordinationError::LiveNotFound)?;

    let group_repo = GroupRepository::new(state.pool.clone());
    if !group_repo
        .is_member(live.host_group_id, auth.user_id)
        .await?
    {
        return Err(CoordinationError::NotMemberOfGroup.into());
    }

    let live = live_repo
        .edit_live(
            live_id,
            request.title.as_deref(),
            request.venue.as_deref(),
            request.artwork_url.as_deref(),
            request.opens_at,
            request.starts_at,
        )
        .await?;

    info!(live_id = %live.id, edited_by = %auth.user_id, "Live updated");

    let response = live_response(&state.pool, live).await?;
    Ok(Json(response))
}

/// Live detail with the declared performer set resolved to group names
/// and every performance request's current status.
pub async fn get_live(
    State(state): State<AppState>,
    Path(live_id): Path<Uuid>,
) -> Result<Json<LiveResponse>, ApiError> {
    let live_repo = LiveRepository::new(state.pool.clone());
    let live = live_repo
        .find_by_id(live_id)
        .await?
        .ok_or(CoordinationError::LiveNotFound)?;

    let response = live_response(&state.pool, live).await?;
    Ok(Json(response))
}

/// Reply to a pending performance request. Only a leader of the
/// requested group may reply; the live's author is notified of the
/// outcome.
pub async fn reply_to_request(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(request_id): Path<Uuid>,
    Json(body): Json<ReplyRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let request_repo = PerformanceRequestRepository::new(state.pool.clone());
    let request = request_repo
        .find_by_id(request_id)
        .await?
        .ok_or(CoordinationError::RequestNotFound)?;

    let group_repo = GroupRepository::new(state.pool.clone());
    match group_repo.is_leader(request.group_id, auth.user_id).await {
        Ok(true) => {}
        Ok(false) | Err(CoordinationError::NotMemberOfGroup) => {
            return Err(CoordinationError::OnlyLeaderCanAccept.into());
        }
        Err(err) => return Err(err.into()),
    }

    let updated = request_repo.reply(request_id, body.decision).await?;

    info!(
        request_id = %updated.id,
        live_id = %updated.live_id,
        group_id = %updated.group_id,
        decision = ?body.decision,
        replied_by = %auth.user_id,
        "Performance request resolved"
    );

    let live_repo = LiveRepository::new(state.pool.clone());
    let live = live_repo
        .find_by_id(updated.live_id)
        .await?
        .ok_or(CoordinationError::LiveNotFound)?;
    let group = group_repo
        .find_by_id(updated.group_id)
        .await?
        .ok_or(CoordinationError::GroupNotFound)?;

    let event = match body.decision {
        ReplyDecision::Accept => DomainEvent::RequestAccepted {
            live_id: live.id,
            live_title: live.title,
            group_name: group.name,
            author_id: live.author_id,
        },
        ReplyDecision::Deny => DomainEvent::RequestDenied {
            live_id: live.id,
            live_title: live.title,
            group_name: group.name,
            author_id: live.author_id,
        },
    };
    dispatch_after_commit(state.notifier.clone(), event);

    Ok(Json(ReplyResponse {
        request_id: updated.id,
        live_id: updated.live_id,
        group_id: updated.group_id,
        status: updated.status.into(),
    }))
}

/// Assembles the live detail response: performer rows resolve the host,
/// request rows resolve the declared guests and their statuses.
async fn live_response(pool: &PgPool, live: LiveEntity) -> Result<LiveResponse, ApiError> {
    let live_repo = LiveRepository::new(pool.clone());
    let accepted = live_repo.accepted_performers(live.id).await?;
    let requests = live_repo.requests_with_groups(live.id).await?;

    let host = accepted
        .into_iter()
        .find(|p| p.group_id == live.host_group_id)
        .map(PerformerInfo::from)
        .ok_or_else(|| ApiError::Internal("Live is missing its host performer row".into()))?;

    let guests: Vec<PerformerInfo> = requests
        .iter()
        .map(|r| PerformerInfo {
            id: r.group_id,
            name: r.group_name.clone(),
        })
        .collect();

    let style_kind: LiveStyleKind = live.style.into();
    let style = style_kind.with_performers(host, guests);

    let performance_requests = requests
        .into_iter()
        .map(|r| RequestSummary {
            id: r.id,
            group: PerformerInfo {
                id: r.group_id,
                name: r.group_name,
            },
            status: r.status.into(),
        })
        .collect();

    Ok(LiveResponse {
        id: live.id,
        title: live.title,
        host_group_id: live.host_group_id,
        author_id: live.author_id,
        venue: live.venue,
        artwork_url: live.artwork_url,
        opens_at: live.opens_at,
        starts_at: live.starts_at,
        price: live.price,
        style,
        performance_requests,
        created_at: live.created_at,
    })
}
