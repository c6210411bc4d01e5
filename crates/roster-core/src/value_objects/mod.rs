//! Value objects - identifiers and permission bits

mod ids;
mod permissions;

pub use ids::{ChatId, UserId};
pub use permissions::MemberRights;
