//! Domain events

mod membership_event;

pub use membership_event::MembershipEvent;
