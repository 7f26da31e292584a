//! User domain models.
//!
//! Users are provisioned by the external identity system; this core only
//! reads them to authorize actions and resolve ticket holders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user acts under. Artists create groups and lives; fans attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Artist,
    Fan,
}

impl UserRole {
    /// Whether this role may create groups and lives.
    pub fn is_artist(&self) -> bool {
        matches!(self, UserRole::Artist)
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(UserRole::Artist),
            "fan" => Ok(UserRole::Fan),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

/// A user as stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Compact user info embedded in listings (ticket participants).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserSummary {
    pub id: Uuid,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::from_str("artist").unwrap(), UserRole::Artist);
        assert_eq!(UserRole::from_str("fan").unwrap(), UserRole::Fan);
        assert!(UserRole::from_str("admin").is_err());
    }

    #[test]
    fn test_is_artist() {
        assert!(UserRole::Artist.is_artist());
        assert!(!UserRole::Fan.is_artist());
    }
}
