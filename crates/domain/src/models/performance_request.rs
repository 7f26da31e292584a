//! Performance request domain models.
//!
//! A request is created `pending` for every declared non-host performer of
//! a live and is resolved exactly once by that group's leader. `accepted`
//! and `denied` are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State of a performance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Denied,
}

impl RequestStatus {
    /// Whether the request can still be replied to.
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::Denied => write!(f, "denied"),
        }
    }
}

/// The leader's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyDecision {
    Accept,
    Deny,
}

/// A performance request as stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PerformanceRequest {
    pub id: Uuid,
    pub live_id: Uuid,
    pub group_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for replying to a performance request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReplyRequest {
    pub decision: ReplyDecision,
}

/// Response after a reply has been applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReplyResponse {
    pub request_id: Uuid,
    pub live_id: Uuid,
    pub group_id: Uuid,
    pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_repliable() {
        assert!(RequestStatus::Pending.is_pending());
        assert!(!RequestStatus::Accepted.is_pending());
        assert!(!RequestStatus::Denied.is_pending());
    }

    #[test]
    fn test_decision_deserializes_lowercase() {
        let decision: ReplyDecision = serde_json::from_str("\"accept\"").unwrap();
        assert_eq!(decision, ReplyDecision::Accept);
        let decision: ReplyDecision = serde_json::from_str("\"deny\"").unwrap();
        assert_eq!(decision, ReplyDecision::Deny);
    }
}
