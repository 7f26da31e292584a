//! Ticket endpoints: reserve, refund, and the participants listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::models::ticket::{ParticipantResponse, Ticket};
use domain::CoordinationError;
use persistence::repositories::{LiveRepository, TicketRepository};
use shared::pagination::{Page, PageParams};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_ticket_reserved;

/// Reserve a ticket for a live. At most one reserved ticket per (live,
/// user); a refunded ticket does not block a fresh reservation.
pub async fn reserve_ticket(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(live_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let live_repo = LiveRepository::new(state.pool.clone());
    live_repo
        .find_by_id(live_id)
        .await?
        .ok_or(CoordinationError::LiveNotFound)?;

    let ticket_repo = TicketRepository::new(state.pool.clone());
    let ticket = ticket_repo.reserve(live_id, auth.user_id).await?;

    record_ticket_reserved();
    info!(ticket_id = %ticket.id, live_id = %live_id, user_id = %auth.user_id, "Ticket reserved");

    Ok((StatusCode::CREATED, Json(ticket.into())))
}

/// Refund the caller's reserved ticket. The row stays in the ledger with
/// its status flipped.
pub async fn refund_ticket(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(ticket_id): Path<Uuid>,
) -> Result<Json<Ticket>, ApiError> {
    let ticket_repo = TicketRepository::new(state.pool.clone());
    let ticket = ticket_repo.refund(ticket_id, auth.user_id).await?;

    info!(ticket_id = %ticket.id, live_id = %ticket.live_id, user_id = %auth.user_id, "Ticket refunded");

    Ok(Json(ticket.into()))
}

/// Users currently holding a reserved ticket for a live, most recent
/// reservation first.
pub async fn list_participants(
    State(state): State<AppState>,
    Path(live_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ParticipantResponse>>, ApiError> {
    let live_repo = LiveRepository::new(state.pool.clone());
    live_repo
        .find_by_id(live_id)
        .await?
        .ok_or(CoordinationError::LiveNotFound)?;

    let page = params.normalize();
    let ticket_repo = TicketRepository::new(state.pool.clone());
    let (rows, total) = ticket_repo.participants(live_id, page).await?;

    let response = Page::new(rows, page, total).map(ParticipantResponse::from);
    Ok(Json(response))
}
