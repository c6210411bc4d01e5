//! Database models

mod member;

pub use member::MemberModel;
