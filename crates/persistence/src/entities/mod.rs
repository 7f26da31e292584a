//! Database entity definitions (row mappings).

mod group;
mod invitation;
mod live;
mod performance_request;
mod ticket;
mod user;

pub use group::{GroupEntity, GroupWithCountEntity, MembershipEntity};
pub use invitation::InvitationEntity;
pub use live::{LiveEntity, LivePerformerEntity, LiveStyleDb, PerformerRowEntity};
pub use performance_request::{
    PerformanceRequestEntity, RequestStatusDb, RequestWithGroupEntity,
};
pub use ticket::{ParticipantEntity, TicketEntity, TicketStatusDb};
pub use user::{UserEntity, UserRoleDb};
