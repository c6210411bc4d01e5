//! Capability traits (ports)

mod chat_client;
mod repositories;

pub use chat_client::{ChatClient, ClientError, ClientResult};
pub use repositories::{MemberRepository, RepoResult};
