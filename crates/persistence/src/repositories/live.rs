//! Live repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    LiveEntity, LiveStyleDb, PerformerRowEntity, RequestWithGroupEntity,
};
use crate::metrics::QueryTimer;
use domain::CoordinationError;

/// Descriptive fields shared by create and edit.
#[derive(Debug, Clone)]
pub struct LiveFields {
    pub title: String,
    pub venue: Option<String>,
    pub artwork_url: Option<String>,
    pub opens_at: Option<DateTime<Utc>>,
    pub starts_at: DateTime<Utc>,
    pub price: i64,
}

/// Repository for lives and their performer rows.
#[derive(Clone)]
pub struct LiveRepository {
    pool: PgPool,
}

impl LiveRepository {
    /// Creates a new LiveRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a live together with its performer rows.
    ///
    /// One transaction, writes in dependency order: the live row first,
    /// then the host's performer row (the host is auto-accepted), then one
    /// pending performance request per declared guest group. Input
    /// invariants (price, oneman performer, duplicate guests) are checked
    /// by the domain layer before this is called.
    pub async fn create_live(
        &self,
        host_group_id: Uuid,
        author_id: Uuid,
        style: LiveStyleDb,
        fields: &LiveFields,
        guest_group_ids: &[Uuid],
    ) -> Result<LiveEntity, CoordinationError> {
        let timer = QueryTimer::new("create_live");
        let mut tx = self.pool.begin().await?;

        let live = sqlx::query_as::<_, LiveEntity>(
            r#"
            INSERT INTO lives (title, style, host_group_id, author_id, venue, artwork_url, opens_at, starts_at, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, style, host_group_id, author_id, venue, artwork_url, opens_at, starts_at, price, created_at, updated_at
            "#,
        )
        .bind(&fields.title)
        .bind(style)
        .bind(host_group_id)
        .bind(author_id)
        .bind(&fields.venue)
        .bind(&fields.artwork_url)
        .bind(fields.opens_at)
        .bind(fields.starts_at)
        .bind(fields.price)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO live_performers (live_id, group_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(live.id)
        .bind(host_group_id)
        .execute(&mut *tx)
        .await?;

        for group_id in guest_group_ids {
            sqlx::query(
                r#"
                INSERT INTO performance_requests (live_id, group_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(live.id)
            .bind(group_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(live)
    }

    /// Update a live's descriptive fields.
    ///
    /// Style, host, and the performer set are never touched here. Absent
    /// fields keep their current values.
    pub async fn edit_live(
        &self,
        live_id: Uuid,
        title: Option<&str>,
        venue: Option<&str>,
        artwork_url: Option<&str>,
        opens_at: Option<DateTime<Utc>>,
        starts_at: Option<DateTime<Utc>>,
    ) -> Result<LiveEntity, CoordinationError> {
        let timer = QueryTimer::new("edit_live");
        let result = sqlx::query_as::<_, LiveEntity>(
            r#"
            UPDATE lives
            SET title = COALESCE($2, title),
                venue = COALESCE($3, venue),
                artwork_url = COALESCE($4, artwork_url),
                opens_at = COALESCE($5, opens_at),
                starts_at = COALESCE($6, starts_at),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, style, host_group_id, author_id, venue, artwork_url, opens_at, starts_at, price, created_at, updated_at
            "#,
        )
        .bind(live_id)
        .bind(title)
        .bind(venue)
        .bind(artwork_url)
        .bind(opens_at)
        .bind(starts_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoordinationError::LiveNotFound)?;
        timer.record();
        Ok(result)
    }

    /// Find a live by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LiveEntity>, CoordinationError> {
        let timer = QueryTimer::new("find_live_by_id");
        let result = sqlx::query_as::<_, LiveEntity>(
            r#"
            SELECT id, title, style, host_group_id, author_id, venue, artwork_url, opens_at, starts_at, price, created_at, updated_at
            FROM lives
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Accepted performers of a live, resolved to group names, in
    /// acceptance order.
    pub async fn accepted_performers(
        &self,
        live_id: Uuid,
    ) -> Result<Vec<PerformerRowEntity>, CoordinationError> {
        let timer = QueryTimer::new("list_accepted_performers");
        let result = sqlx::query_as::<_, PerformerRowEntity>(
            r#"
            SELECT p.group_id, g.name as group_name
            FROM live_performers p
            JOIN groups g ON p.group_id = g.id
            WHERE p.live_id = $1
            ORDER BY p.created_at, p.id
            "#,
        )
        .bind(live_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Performance requests of a live, with group names, in creation
    /// order.
    pub async fn requests_with_groups(
        &self,
        live_id: Uuid,
    ) -> Result<Vec<RequestWithGroupEntity>, CoordinationError> {
        let timer = QueryTimer::new("list_live_requests");
        let result = sqlx::query_as::<_, RequestWithGroupEntity>(
            r#"
            SELECT r.id, r.group_id, g.name as group_name, r.status
            FROM performance_requests r
            JOIN groups g ON r.group_id = g.id
            WHERE r.live_id = $1
            ORDER BY r.created_at, r.id
            "#,
        )
        .bind(live_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    // Note: LiveRepository tests require a database connection and are
    // covered by integration tests.
}
