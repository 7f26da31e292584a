//! Domain model definitions.

pub mod group;
pub mod invitation;
pub mod live;
pub mod performance_request;
pub mod ticket;
pub mod user;

pub use group::{Group, GroupMembership};
pub use invitation::GroupInvitation;
pub use live::{Live, LiveStyle};
pub use performance_request::{PerformanceRequest, RequestStatus};
pub use ticket::{Ticket, TicketStatus};
pub use user::{User, UserRole};
