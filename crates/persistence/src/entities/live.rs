//! Live and live performer entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::live::{LiveStyleKind, PerformerInfo};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for live_style that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "live_style", rename_all = "lowercase")]
pub enum LiveStyleDb {
    Oneman,
    Battle,
    Festival,
}

impl From<LiveStyleDb> for LiveStyleKind {
    fn from(db_style: LiveStyleDb) -> Self {
        match db_style {
            LiveStyleDb::Oneman => LiveStyleKind::Oneman,
            LiveStyleDb::Battle => LiveStyleKind::Battle,
            LiveStyleDb::Festival => LiveStyleKind::Festival,
        }
    }
}

impl From<LiveStyleKind> for LiveStyleDb {
    fn from(kind: LiveStyleKind) -> Self {
        match kind {
            LiveStyleKind::Oneman => LiveStyleDb::Oneman,
            LiveStyleKind::Battle => LiveStyleDb::Battle,
            LiveStyleKind::Festival => LiveStyleDb::Festival,
        }
    }
}

/// Database row mapping for the lives table.
#[derive(Debug, Clone, FromRow)]
pub struct LiveEntity {
    pub id: Uuid,
    pub title: String,
    pub style: LiveStyleDb,
    pub host_group_id: Uuid,
    pub author_id: Uuid,
    pub venue: Option<String>,
    pub artwork_url: Option<String>,
    pub opens_at: Option<DateTime<Utc>>,
    pub starts_at: DateTime<Utc>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LiveEntity> for domain::models::Live {
    fn from(entity: LiveEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            style: entity.style.into(),
            host_group_id: entity.host_group_id,
            author_id: entity.author_id,
            venue: entity.venue,
            artwork_url: entity.artwork_url,
            opens_at: entity.opens_at,
            starts_at: entity.starts_at,
            price: entity.price,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the live_performers table.
#[derive(Debug, Clone, FromRow)]
pub struct LivePerformerEntity {
    pub id: Uuid,
    pub live_id: Uuid,
    pub group_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A performer group resolved to displayable info.
#[derive(Debug, Clone, FromRow)]
pub struct PerformerRowEntity {
    pub group_id: Uuid,
    pub group_name: String,
}

impl From<PerformerRowEntity> for PerformerInfo {
    fn from(entity: PerformerRowEntity) -> Self {
        Self {
            id: entity.group_id,
            name: entity.group_name,
        }
    }
}
