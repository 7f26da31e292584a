//! Performance request repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PerformanceRequestEntity, RequestStatusDb};
use crate::metrics::QueryTimer;
use domain::models::performance_request::ReplyDecision;
use domain::CoordinationError;

/// Repository for the performance request state machine.
#[derive(Clone)]
pub struct PerformanceRequestRepository {
    pool: PgPool,
}

impl PerformanceRequestRepository {
    /// Creates a new PerformanceRequestRepository with the given
    /// connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a performance request by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<PerformanceRequestEntity>, CoordinationError> {
        let timer = QueryTimer::new("find_request_by_id");
        let result = sqlx::query_as::<_, PerformanceRequestEntity>(
            r#"
            SELECT id, live_id, group_id, status, created_at, updated_at
            FROM performance_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Apply a leader's reply to a pending request.
    ///
    /// The row is locked before the state check, so two concurrent replies
    /// serialize and only the first sees `pending`. Acceptance updates the
    /// status and inserts the live_performers row in the same transaction;
    /// denial updates the status only. Non-pending requests are rejected.
    pub async fn reply(
        &self,
        request_id: Uuid,
        decision: ReplyDecision,
    ) -> Result<PerformanceRequestEntity, CoordinationError> {
        let timer = QueryTimer::new("reply_to_request");
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, PerformanceRequestEntity>(
            r#"
            SELECT id, live_id, group_id, status, created_at, updated_at
            FROM performance_requests
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoordinationError::RequestNotFound)?;

        if request.status != RequestStatusDb::Pending {
            return Err(CoordinationError::RequestAlreadyResolved);
        }

        let new_status = match decision {
            ReplyDecision::Accept => RequestStatusDb::Accepted,
            ReplyDecision::Deny => RequestStatusDb::Denied,
        };

        let request = sqlx::query_as::<_, PerformanceRequestEntity>(
            r#"
            UPDATE performance_requests
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, live_id, group_id, status, created_at, updated_at
            "#,
        )
        .bind(request_id)
        .bind(new_status)
        .fetch_one(&mut *tx)
        .await?;

        if decision == ReplyDecision::Accept {
            sqlx::query(
                r#"
                INSERT INTO live_performers (live_id, group_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(request.live_id)
            .bind(request.group_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    // Note: PerformanceRequestRepository tests require a database
    // connection and are covered by integration tests.
}
