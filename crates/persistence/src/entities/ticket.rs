//! Ticket entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::ticket::TicketStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for ticket_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "lowercase")]
pub enum TicketStatusDb {
    Reserved,
    Refunded,
}

impl From<TicketStatusDb> for TicketStatus {
    fn from(db_status: TicketStatusDb) -> Self {
        match db_status {
            TicketStatusDb::Reserved => TicketStatus::Reserved,
            TicketStatusDb::Refunded => TicketStatus::Refunded,
        }
    }
}

impl From<TicketStatus> for TicketStatusDb {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::Reserved => TicketStatusDb::Reserved,
            TicketStatus::Refunded => TicketStatusDb::Refunded,
        }
    }
}

/// Database row mapping for the tickets table.
#[derive(Debug, Clone, FromRow)]
pub struct TicketEntity {
    pub id: Uuid,
    pub live_id: Uuid,
    pub user_id: Uuid,
    pub status: TicketStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TicketEntity> for domain::models::Ticket {
    fn from(entity: TicketEntity) -> Self {
        Self {
            id: entity.id,
            live_id: entity.live_id,
            user_id: entity.user_id,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A reserved-ticket holder with the reservation timestamp, for the
/// participants listing.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantEntity {
    pub user_id: Uuid,
    pub display_name: String,
    pub reserved_at: DateTime<Utc>,
}

impl From<ParticipantEntity> for domain::models::ticket::ParticipantResponse {
    fn from(entity: ParticipantEntity) -> Self {
        Self {
            user: domain::models::user::UserSummary {
                id: entity.user_id,
                display_name: entity.display_name,
            },
            reserved_at: entity.reserved_at,
        }
    }
}
