//! Chat-gateway client adapter

mod http;
pub mod wire;

pub use http::HttpChatClient;
pub use wire::{UpdateEnvelope, UpdatePayload};
