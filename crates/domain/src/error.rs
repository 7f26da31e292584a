//! Error taxonomy for the coordination core.
//!
//! Every mutating operation returns a typed `CoordinationError` on failure.
//! `ErrorKind` classifies variants for the HTTP layer without that layer
//! needing to match every variant itself.

use thiserror::Error;

/// Classification of a `CoordinationError`, used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    InvalidInput,
    Internal,
}

/// Errors produced by the live-event coordination core.
#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("Group not found")]
    GroupNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Live not found")]
    LiveNotFound,

    #[error("Invitation not found")]
    InvitationNotFound,

    #[error("Performance request not found")]
    RequestNotFound,

    #[error("Ticket not found")]
    TicketNotFound,

    #[error("Invitation has already been used")]
    InvitationAlreadyUsed,

    #[error("Group slug is already taken")]
    SlugTaken,

    #[error("User is already a member of this group")]
    AlreadyMember,

    #[error("Performance request has already been resolved")]
    RequestAlreadyResolved,

    #[error("A reserved ticket already exists for this live")]
    TicketAlreadyReserved,

    #[error("Ticket is not in the reserved state")]
    TicketNotReserved,

    #[error("User is not a member of this group")]
    NotMemberOfGroup,

    #[error("Only a group leader can reply to a performance request")]
    OnlyLeaderCanAccept,

    #[error("Ticket belongs to another user")]
    TicketPermission,

    #[error("Fans cannot create lives")]
    FanCannotCreateLive,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl CoordinationError {
    /// Classifies this error for response mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GroupNotFound
            | Self::UserNotFound
            | Self::LiveNotFound
            | Self::InvitationNotFound
            | Self::RequestNotFound
            | Self::TicketNotFound => ErrorKind::NotFound,
            Self::InvitationAlreadyUsed
            | Self::SlugTaken
            | Self::AlreadyMember
            | Self::RequestAlreadyResolved
            | Self::TicketAlreadyReserved
            | Self::TicketNotReserved => ErrorKind::Conflict,
            Self::NotMemberOfGroup
            | Self::OnlyLeaderCanAccept
            | Self::TicketPermission
            | Self::FanCannotCreateLive => ErrorKind::Forbidden,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}
