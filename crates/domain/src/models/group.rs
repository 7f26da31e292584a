//! Group and membership domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An artist group that can host or perform at lives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A (group, user) membership. Unique per pair; never updated after
/// creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupMembership {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub is_leader: bool,
    pub joined_at: DateTime<Utc>,
}

/// Request to create a new group. The creator is seated as leader.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupRequest {
    #[validate(custom(function = "shared::validation::validate_title"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Group detail returned by the API, with aggregate member count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_group_request_valid() {
        let request = CreateGroupRequest {
            name: "Tokyo Garage Band".to_string(),
            slug: "tokyo-garage-band".to_string(),
            description: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_group_request_rejects_bad_slug() {
        let request = CreateGroupRequest {
            name: "Tokyo Garage Band".to_string(),
            slug: "Tokyo Garage".to_string(),
            description: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_group_request_rejects_empty_name() {
        let request = CreateGroupRequest {
            name: "  ".to_string(),
            slug: "valid-slug".to_string(),
            description: None,
        };
        assert!(request.validate().is_err());
    }
}
