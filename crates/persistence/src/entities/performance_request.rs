//! Performance request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::performance_request::RequestStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for request_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
pub enum RequestStatusDb {
    Pending,
    Accepted,
    Denied,
}

impl From<RequestStatusDb> for RequestStatus {
    fn from(db_status: RequestStatusDb) -> Self {
        match db_status {
            RequestStatusDb::Pending => RequestStatus::Pending,
            RequestStatusDb::Accepted => RequestStatus::Accepted,
            RequestStatusDb::Denied => RequestStatus::Denied,
        }
    }
}

impl From<RequestStatus> for RequestStatusDb {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => RequestStatusDb::Pending,
            RequestStatus::Accepted => RequestStatusDb::Accepted,
            RequestStatus::Denied => RequestStatusDb::Denied,
        }
    }
}

/// Database row mapping for the performance_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct PerformanceRequestEntity {
    pub id: Uuid,
    pub live_id: Uuid,
    pub group_id: Uuid,
    pub status: RequestStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PerformanceRequestEntity> for domain::models::PerformanceRequest {
    fn from(entity: PerformanceRequestEntity) -> Self {
        Self {
            id: entity.id,
            live_id: entity.live_id,
            group_id: entity.group_id,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Request row joined with its group's name, for live detail listings.
#[derive(Debug, Clone, FromRow)]
pub struct RequestWithGroupEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub group_name: String,
    pub status: RequestStatusDb,
}
