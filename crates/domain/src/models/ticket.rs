//! Ticket domain models.
//!
//! The ledger is append-only: a refund flips the row to `refunded` and a
//! later reservation creates a fresh row, so history is preserved. At most
//! one `reserved` ticket may exist per (live, user) at any time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State of a ticket row. `refunded` is terminal for the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Reserved,
    Refunded,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Reserved => write!(f, "reserved"),
            TicketStatus::Refunded => write!(f, "refunded"),
        }
    }
}

/// A user's attendance record for a live.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Ticket {
    pub id: Uuid,
    pub live_id: Uuid,
    pub user_id: Uuid,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reserved-ticket holder in the participants listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ParticipantResponse {
    pub user: super::user::UserSummary,
    pub reserved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(TicketStatus::Reserved.to_string(), "reserved");
        assert_eq!(TicketStatus::Refunded.to_string(), "refunded");
    }
}
