//! Shared harness for database-backed integration tests.
//!
//! Tests run against the database named by `TEST_DATABASE_URL` and skip
//! with a notice when it is unset, so the suite stays green on machines
//! without Postgres.

#![allow(dead_code)]

use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use persistence::repositories::GroupRepository;

/// Connects to the test database and applies migrations, or returns
/// `None` when `TEST_DATABASE_URL` is unset.
pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    Some(pool)
}

/// A slug unlikely to collide with other test runs.
pub fn unique_slug(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Inserts a user row. Users are normally provisioned externally, so
/// tests seed them directly.
pub async fn seed_user(pool: &PgPool, role: &str) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (display_name, role)
        VALUES ($1, $2::user_role)
        RETURNING id
        "#,
    )
    .bind(Name().fake::<String>())
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("failed to seed user")
}

/// Creates a group through the repository, seating `leader` as its
/// founding leader.
pub async fn seed_group(pool: &PgPool, leader: Uuid) -> Uuid {
    let repo = GroupRepository::new(pool.clone());
    let (group, _membership) = repo
        .create_group("Test Group", &unique_slug("test-group"), None, leader)
        .await
        .expect("failed to seed group");
    group.id
}
