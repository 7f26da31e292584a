//! Ticket repository for database operations.

use shared::pagination::PageRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ParticipantEntity, TicketEntity, TicketStatusDb};
use crate::metrics::QueryTimer;
use crate::repositories::is_unique_violation;
use domain::CoordinationError;

/// Repository for the ticket ledger.
#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Creates a new TicketRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reserve a ticket for a user.
    ///
    /// A partial unique index on (live_id, user_id) over reserved rows is
    /// the race guard: of two concurrent reservations exactly one insert
    /// succeeds and the other surfaces here as `TicketAlreadyReserved`.
    pub async fn reserve(
        &self,
        live_id: Uuid,
        user_id: Uuid,
    ) -> Result<TicketEntity, CoordinationError> {
        let timer = QueryTimer::new("reserve_ticket");
        let result = sqlx::query_as::<_, TicketEntity>(
            r#"
            INSERT INTO tickets (live_id, user_id, status)
            VALUES ($1, $2, 'reserved')
            RETURNING id, live_id, user_id, status, created_at, updated_at
            "#,
        )
        .bind(live_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CoordinationError::TicketAlreadyReserved
            } else {
                e.into()
            }
        })?;
        timer.record();
        Ok(result)
    }

    /// Refund a user's reserved ticket.
    ///
    /// The row is kept (the ledger preserves history); only its status
    /// flips. Ownership and state are checked under a row lock.
    pub async fn refund(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
    ) -> Result<TicketEntity, CoordinationError> {
        let timer = QueryTimer::new("refund_ticket");
        let mut tx = self.pool.begin().await?;

        let ticket = sqlx::query_as::<_, TicketEntity>(
            r#"
            SELECT id, live_id, user_id, status, created_at, updated_at
            FROM tickets
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoordinationError::TicketNotFound)?;

        if ticket.user_id != user_id {
            return Err(CoordinationError::TicketPermission);
        }
        if ticket.status != TicketStatusDb::Reserved {
            return Err(CoordinationError::TicketNotReserved);
        }

        let ticket = sqlx::query_as::<_, TicketEntity>(
            r#"
            UPDATE tickets
            SET status = 'refunded', updated_at = now()
            WHERE id = $1
            RETURNING id, live_id, user_id, status, created_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(ticket)
    }

    /// Users holding a reserved ticket for a live, most recent reservation
    /// first. The (created_at, id) ordering keeps pagination deterministic
    /// when reservations share a timestamp.
    pub async fn participants(
        &self,
        live_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<ParticipantEntity>, i64), CoordinationError> {
        let timer = QueryTimer::new("list_participants");
        let rows = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            SELECT u.id as user_id, u.display_name, t.created_at as reserved_at
            FROM tickets t
            JOIN users u ON t.user_id = u.id
            WHERE t.live_id = $1 AND t.status = 'reserved'
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(live_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM tickets
            WHERE live_id = $1 AND status = 'reserved'
            "#,
        )
        .bind(live_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok((rows, total))
    }
}
