//! Notification contract for coordination state changes.
//!
//! State transitions return `DomainEvent` values instead of publishing
//! inline. A dispatcher consumes events after the owning transaction has
//! committed; delivery failures are logged and never surfaced to the
//! caller of the triggering operation.

use std::collections::HashSet;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A state change worth announcing, emitted after commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    /// A live was created. Fans out to the host group's followers and,
    /// for battle/festival, to each declared guest performer's followers.
    LiveCreated {
        live_id: Uuid,
        title: String,
        host_group_id: Uuid,
        guest_group_ids: Vec<Uuid>,
    },
    /// A guest group's leader accepted a performance request.
    RequestAccepted {
        live_id: Uuid,
        live_title: String,
        group_name: String,
        author_id: Uuid,
    },
    /// A guest group's leader denied a performance request.
    RequestDenied {
        live_id: Uuid,
        live_title: String,
        group_name: String,
        author_id: Uuid,
    },
}

/// Notification type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LiveAnnounced,
    RequestAccepted,
    RequestDenied,
}

/// A message handed to the push transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NotificationMessage {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub live_id: Uuid,
    pub body: String,
}

impl NotificationMessage {
    pub fn live_announced(live_id: Uuid, title: &str) -> Self {
        Self {
            kind: NotificationKind::LiveAnnounced,
            live_id,
            body: format!("New live announced: {title}"),
        }
    }

    pub fn request_accepted(live_id: Uuid, live_title: &str, group_name: &str) -> Self {
        Self {
            kind: NotificationKind::RequestAccepted,
            live_id,
            body: format!("{group_name} accepted your performance request for {live_title}"),
        }
    }

    pub fn request_denied(live_id: Uuid, live_title: &str, group_name: &str) -> Self {
        Self {
            kind: NotificationKind::RequestDenied,
            live_id,
            body: format!("{group_name} denied your performance request for {live_title}"),
        }
    }
}

/// Result of a publish attempt.
#[derive(Debug, Clone)]
pub enum PublishResult {
    /// Message was handed to the transport.
    Sent,
    /// Publishing failed (non-blocking; the dispatcher logs and moves on).
    Failed(String),
}

/// Gateway to the social graph and push transport.
///
/// The concrete transport lives outside this core; the coordination code
/// only consumes this interface after commit and does not depend on
/// delivery succeeding.
#[async_trait::async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Users following the given group.
    async fn followers_of(&self, group_id: Uuid) -> HashSet<Uuid>;

    /// Publish a message to one user.
    async fn publish(&self, to_user_id: Uuid, message: &NotificationMessage) -> PublishResult;
}

/// In-process gateway for development and testing.
///
/// Logs publishes and records them for assertions; follower sets are
/// configured up front.
#[derive(Debug, Default)]
pub struct MockNotificationGateway {
    followers: std::collections::HashMap<Uuid, HashSet<Uuid>>,
    /// Whether to simulate publish failures for testing.
    pub simulate_failure: bool,
    published: Mutex<Vec<(Uuid, NotificationMessage)>>,
}

impl MockNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway that simulates publish failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Registers the follower set for a group.
    pub fn with_followers(mut self, group_id: Uuid, followers: impl IntoIterator<Item = Uuid>) -> Self {
        self.followers
            .insert(group_id, followers.into_iter().collect());
        self
    }

    /// Messages published so far, in publish order.
    pub fn published(&self) -> Vec<(Uuid, NotificationMessage)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotificationGateway for MockNotificationGateway {
    async fn followers_of(&self, group_id: Uuid) -> HashSet<Uuid> {
        self.followers.get(&group_id).cloned().unwrap_or_default()
    }

    async fn publish(&self, to_user_id: Uuid, message: &NotificationMessage) -> PublishResult {
        if self.simulate_failure {
            tracing::warn!(
                to_user_id = %to_user_id,
                live_id = %message.live_id,
                "Mock notification gateway simulating failure"
            );
            return PublishResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            to_user_id = %to_user_id,
            live_id = %message.live_id,
            body = %message.body,
            "Mock: would publish notification"
        );
        self.published
            .lock()
            .unwrap()
            .push((to_user_id, message.clone()));
        PublishResult::Sent
    }
}
