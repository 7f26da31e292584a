//! Post-commit notification fan-out.
//!
//! Route handlers emit a `DomainEvent` once their transaction has
//! committed; dispatch runs on a spawned task so delivery never blocks or
//! fails the triggering request. Gateway errors are logged and swallowed.

use std::collections::HashSet;
use std::sync::Arc;

use domain::services::notification::{
    DomainEvent, NotificationGateway, NotificationMessage, PublishResult,
};
use uuid::Uuid;

/// Spawns event dispatch after the owning transaction has committed.
pub fn dispatch_after_commit(gateway: Arc<dyn NotificationGateway>, event: DomainEvent) {
    tokio::spawn(async move {
        dispatch(gateway.as_ref(), event).await;
    });
}

/// Resolves an event to its recipient set and publishes one message per
/// recipient.
pub async fn dispatch(gateway: &dyn NotificationGateway, event: DomainEvent) {
    match event {
        DomainEvent::LiveCreated {
            live_id,
            title,
            host_group_id,
            guest_group_ids,
        } => {
            let mut recipients: HashSet<Uuid> = gateway.followers_of(host_group_id).await;
            for group_id in &guest_group_ids {
                recipients.extend(gateway.followers_of(*group_id).await);
            }

            let message = NotificationMessage::live_announced(live_id, &title);
            let recipient_count = recipients.len();
            for user_id in recipients {
                publish_logged(gateway, user_id, &message).await;
            }

            tracing::info!(
                live_id = %live_id,
                recipients = recipient_count,
                "Live announcement fan-out dispatched"
            );
        }
        DomainEvent::RequestAccepted {
            live_id,
            live_title,
            group_name,
            author_id,
        } => {
            let message = NotificationMessage::request_accepted(live_id, &live_title, &group_name);
            publish_logged(gateway, author_id, &message).await;
        }
        DomainEvent::RequestDenied {
            live_id,
            live_title,
            group_name,
            author_id,
        } => {
            let message = NotificationMessage::request_denied(live_id, &live_title, &group_name);
            publish_logged(gateway, author_id, &message).await;
        }
    }
}

async fn publish_logged(
    gateway: &dyn NotificationGateway,
    user_id: Uuid,
    message: &NotificationMessage,
) {
    if let PublishResult::Failed(reason) = gateway.publish(user_id, message).await {
        tracing::warn!(
            to_user_id = %user_id,
            live_id = %message.live_id,
            reason = %reason,
            "Notification publish failed"
        );
    }
}
