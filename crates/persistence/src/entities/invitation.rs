//! Group invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the group_invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub invited: bool,
    pub membership_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<InvitationEntity> for domain::models::GroupInvitation {
    fn from(entity: InvitationEntity) -> Self {
        Self {
            id: entity.id,
            group_id: entity.group_id,
            invited: entity.invited,
            membership_id: entity.membership_id,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}
