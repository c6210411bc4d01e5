//! Repository implementations

pub mod error;
mod member;

pub use member::SqliteMemberRepository;
