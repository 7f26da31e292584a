//! HTTP route handlers.

pub mod groups;
pub mod health;
pub mod invitations;
pub mod lives;
pub mod tickets;
