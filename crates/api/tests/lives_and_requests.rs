//! Integration tests for live creation and the performance request state
//! machine.

mod common;

use chrono::{Duration, Utc};
use domain::models::performance_request::ReplyDecision;
use domain::CoordinationError;
use persistence::entities::{LiveStyleDb, RequestStatusDb};
use persistence::repositories::{LiveFields, LiveRepository, PerformanceRequestRepository};
use sqlx::PgPool;
use uuid::Uuid;

use common::{seed_group, seed_user, test_pool};

fn fields(title: &str) -> LiveFields {
    LiveFields {
        title: title.to_string(),
        venue: Some("Shimokitazawa Basement".to_string()),
        artwork_url: None,
        opens_at: None,
        starts_at: Utc::now() + Duration::days(30),
        price: 3000,
    }
}

async fn create_battle(
    pool: &PgPool,
    host_group_id: Uuid,
    author_id: Uuid,
    guests: &[Uuid],
) -> persistence::entities::LiveEntity {
    LiveRepository::new(pool.clone())
        .create_live(
            host_group_id,
            author_id,
            LiveStyleDb::Battle,
            &fields("Battle Night"),
            guests,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn oneman_live_has_only_the_host_performing() {
    let Some(pool) = test_pool().await else { return };
    let author = seed_user(&pool, "artist").await;
    let host_group = seed_group(&pool, author).await;

    let repo = LiveRepository::new(pool.clone());
    let live = repo
        .create_live(host_group, author, LiveStyleDb::Oneman, &fields("Solo Night"), &[])
        .await
        .unwrap();

    let performers = repo.accepted_performers(live.id).await.unwrap();
    assert_eq!(performers.len(), 1);
    assert_eq!(performers[0].group_id, host_group);
    assert!(repo.requests_with_groups(live.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn guests_start_as_pending_requests_not_performers() {
    let Some(pool) = test_pool().await else { return };
    let author = seed_user(&pool, "artist").await;
    let other = seed_user(&pool, "artist").await;
    let host_group = seed_group(&pool, author).await;
    let guest_a = seed_group(&pool, other).await;
    let guest_b = seed_group(&pool, other).await;

    let live = create_battle(&pool, host_group, author, &[guest_a, guest_b]).await;

    let repo = LiveRepository::new(pool.clone());
    let performers = repo.accepted_performers(live.id).await.unwrap();
    assert_eq!(performers.len(), 1);
    assert_eq!(performers[0].group_id, host_group);

    let requests = repo.requests_with_groups(live.id).await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.status == RequestStatusDb::Pending));
}

#[tokio::test]
async fn accepting_a_request_adds_the_performer() {
    let Some(pool) = test_pool().await else { return };
    let author = seed_user(&pool, "artist").await;
    let guest_leader = seed_user(&pool, "artist").await;
    let host_group = seed_group(&pool, author).await;
    let guest_group = seed_group(&pool, guest_leader).await;

    let live = create_battle(&pool, host_group, author, &[guest_group]).await;

    let live_repo = LiveRepository::new(pool.clone());
    let request = live_repo.requests_with_groups(live.id).await.unwrap()[0].clone();

    let request_repo = PerformanceRequestRepository::new(pool.clone());
    let updated = request_repo.reply(request.id, ReplyDecision::Accept).await.unwrap();
    assert_eq!(updated.status, RequestStatusDb::Accepted);

    let performers = live_repo.accepted_performers(live.id).await.unwrap();
    assert_eq!(performers.len(), 2);
    assert!(performers.iter().any(|p| p.group_id == guest_group));
}

#[tokio::test]
async fn denying_a_request_keeps_the_group_off_the_bill() {
    let Some(pool) = test_pool().await else { return };
    let author = seed_user(&pool, "artist").await;
    let guest_leader = seed_user(&pool, "artist").await;
    let host_group = seed_group(&pool, author).await;
    let guest_group = seed_group(&pool, guest_leader).await;

    let live = create_battle(&pool, host_group, author, &[guest_group]).await;

    let live_repo = LiveRepository::new(pool.clone());
    let request = live_repo.requests_with_groups(live.id).await.unwrap()[0].clone();

    let request_repo = PerformanceRequestRepository::new(pool.clone());
    let updated = request_repo.reply(request.id, ReplyDecision::Deny).await.unwrap();
    assert_eq!(updated.status, RequestStatusDb::Denied);

    let performers = live_repo.accepted_performers(live.id).await.unwrap();
    assert_eq!(performers.len(), 1);
    assert_eq!(performers[0].group_id, host_group);
}

#[tokio::test]
async fn a_resolved_request_cannot_be_replied_to_again() {
    let Some(pool) = test_pool().await else { return };
    let author = seed_user(&pool, "artist").await;
    let guest_leader = seed_user(&pool, "artist").await;
    let host_group = seed_group(&pool, author).await;
    let guest_group = seed_group(&pool, guest_leader).await;

    let live = create_battle(&pool, host_group, author, &[guest_group]).await;

    let live_repo = LiveRepository::new(pool.clone());
    let request = live_repo.requests_with_groups(live.id).await.unwrap()[0].clone();

    let request_repo = PerformanceRequestRepository::new(pool.clone());
    request_repo.reply(request.id, ReplyDecision::Deny).await.unwrap();

    let err = request_repo
        .reply(request.id, ReplyDecision::Accept)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinationError::RequestAlreadyResolved));

    // The denial must have stuck.
    let unchanged = request_repo.find_by_id(request.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, RequestStatusDb::Denied);
}

#[tokio::test]
async fn editing_a_live_keeps_absent_fields() {
    let Some(pool) = test_pool().await else { return };
    let author = seed_user(&pool, "artist").await;
    let host_group = seed_group(&pool, author).await;

    let repo = LiveRepository::new(pool.clone());
    let live = repo
        .create_live(host_group, author, LiveStyleDb::Oneman, &fields("Solo Night"), &[])
        .await
        .unwrap();

    let updated = repo
        .edit_live(live.id, Some("Solo Night (rescheduled)"), None, None, None, None)
        .await
        .unwrap();

    assert_eq!(updated.title, "Solo Night (rescheduled)");
    assert_eq!(updated.venue.as_deref(), Some("Shimokitazawa Basement"));
    assert_eq!(updated.starts_at, live.starts_at);
    assert_eq!(updated.style, live.style);
}

#[tokio::test]
async fn editing_an_unknown_live_is_not_found() {
    let Some(pool) = test_pool().await else { return };

    let repo = LiveRepository::new(pool.clone());
    let err = repo
        .edit_live(Uuid::new_v4(), Some("Ghost Show"), None, None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinationError::LiveNotFound));
}
