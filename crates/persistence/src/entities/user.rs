//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::user::UserRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for user_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRoleDb {
    Artist,
    Fan,
}

impl From<UserRoleDb> for UserRole {
    fn from(db_role: UserRoleDb) -> Self {
        match db_role {
            UserRoleDb::Artist => UserRole::Artist,
            UserRoleDb::Fan => UserRole::Fan,
        }
    }
}

impl From<UserRole> for UserRoleDb {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Artist => UserRoleDb::Artist,
            UserRole::Fan => UserRoleDb::Fan,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub display_name: String,
    pub role: UserRoleDb,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            display_name: entity.display_name,
            role: entity.role.into(),
            created_at: entity.created_at,
        }
    }
}
