//! Repository implementations.
//!
//! Every multi-write operation runs inside a single transaction on one
//! handle, so each call commits all of its writes or none of them.

mod group;
mod invitation;
mod live;
mod performance_request;
mod ticket;
mod user;

pub use group::GroupRepository;
pub use invitation::InvitationRepository;
pub use live::{LiveFields, LiveRepository};
pub use performance_request::PerformanceRequestRepository;
pub use ticket::TicketRepository;
pub use user::UserRepository;

/// Postgres unique_violation error code.
const UNIQUE_VIOLATION: &str = "23505";

/// Whether an sqlx error is a unique-constraint conflict.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}
