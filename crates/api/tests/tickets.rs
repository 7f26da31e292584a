//! Integration tests for the ticket ledger and participants listing.

mod common;

use chrono::{Duration, Utc};
use domain::CoordinationError;
use persistence::entities::{LiveStyleDb, TicketStatusDb};
use persistence::repositories::{LiveFields, LiveRepository, TicketRepository};
use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use common::{seed_group, seed_user, test_pool};

async fn seed_live(pool: &PgPool) -> Uuid {
    let author = seed_user(pool, "artist").await;
    let host_group = seed_group(pool, author).await;
    let live = LiveRepository::new(pool.clone())
        .create_live(
            host_group,
            author,
            LiveStyleDb::Oneman,
            &LiveFields {
                title: "Ticketed Night".to_string(),
                venue: None,
                artwork_url: None,
                opens_at: None,
                starts_at: Utc::now() + Duration::days(14),
                price: 2500,
            },
            &[],
        )
        .await
        .unwrap();
    live.id
}

#[tokio::test]
async fn a_user_holds_at_most_one_reserved_ticket_per_live() {
    let Some(pool) = test_pool().await else { return };
    let live_id = seed_live(&pool).await;
    let fan = seed_user(&pool, "fan").await;

    let repo = TicketRepository::new(pool.clone());
    let ticket = repo.reserve(live_id, fan).await.unwrap();
    assert_eq!(ticket.status, TicketStatusDb::Reserved);

    let err = repo.reserve(live_id, fan).await.unwrap_err();
    assert!(matches!(err, CoordinationError::TicketAlreadyReserved));
}

#[tokio::test]
async fn a_refund_frees_the_slot_and_keeps_the_row() {
    let Some(pool) = test_pool().await else { return };
    let live_id = seed_live(&pool).await;
    let fan = seed_user(&pool, "fan").await;

    let repo = TicketRepository::new(pool.clone());
    let first = repo.reserve(live_id, fan).await.unwrap();

    let refunded = repo.refund(first.id, fan).await.unwrap();
    assert_eq!(refunded.status, TicketStatusDb::Refunded);

    // A fresh reservation is a new ledger row; the refunded one stays.
    let second = repo.reserve(live_id, fan).await.unwrap();
    assert_ne!(second.id, first.id);
    assert_eq!(second.status, TicketStatusDb::Reserved);
}

#[tokio::test]
async fn only_the_holder_may_refund() {
    let Some(pool) = test_pool().await else { return };
    let live_id = seed_live(&pool).await;
    let holder = seed_user(&pool, "fan").await;
    let stranger = seed_user(&pool, "fan").await;

    let repo = TicketRepository::new(pool.clone());
    let ticket = repo.reserve(live_id, holder).await.unwrap();

    let err = repo.refund(ticket.id, stranger).await.unwrap_err();
    assert!(matches!(err, CoordinationError::TicketPermission));
}

#[tokio::test]
async fn a_ticket_cannot_be_refunded_twice() {
    let Some(pool) = test_pool().await else { return };
    let live_id = seed_live(&pool).await;
    let fan = seed_user(&pool, "fan").await;

    let repo = TicketRepository::new(pool.clone());
    let ticket = repo.reserve(live_id, fan).await.unwrap();
    repo.refund(ticket.id, fan).await.unwrap();

    let err = repo.refund(ticket.id, fan).await.unwrap_err();
    assert!(matches!(err, CoordinationError::TicketNotReserved));
}

#[tokio::test]
async fn refunding_an_unknown_ticket_is_not_found() {
    let Some(pool) = test_pool().await else { return };
    let fan = seed_user(&pool, "fan").await;

    let repo = TicketRepository::new(pool.clone());
    let err = repo.refund(Uuid::new_v4(), fan).await.unwrap_err();
    assert!(matches!(err, CoordinationError::TicketNotFound));
}

#[tokio::test]
async fn participants_lists_reserved_holders_only() {
    let Some(pool) = test_pool().await else { return };
    let live_id = seed_live(&pool).await;
    let attending = seed_user(&pool, "fan").await;
    let refunded = seed_user(&pool, "fan").await;

    let repo = TicketRepository::new(pool.clone());
    repo.reserve(live_id, attending).await.unwrap();
    let ticket = repo.reserve(live_id, refunded).await.unwrap();
    repo.refund(ticket.id, refunded).await.unwrap();

    let page = PageParams::default().normalize();
    let (rows, total) = repo.participants(live_id, page).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, attending);
}

#[tokio::test]
async fn participants_paginate_with_a_stable_total() {
    let Some(pool) = test_pool().await else { return };
    let live_id = seed_live(&pool).await;

    let repo = TicketRepository::new(pool.clone());
    for _ in 0..3 {
        let fan = seed_user(&pool, "fan").await;
        repo.reserve(live_id, fan).await.unwrap();
    }

    let first = PageParams {
        page: Some(1),
        per: Some(2),
    }
    .normalize();
    let (rows, total) = repo.participants(live_id, first).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(total, 3);

    let second = PageParams {
        page: Some(2),
        per: Some(2),
    }
    .normalize();
    let (rows, total) = repo.participants(live_id, second).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(total, 3);
}
