//! # roster-bot
//!
//! Bot binary crate: configuration and storage wiring, the HTTP chat-gateway
//! adapter, and the update-dispatch loop.

pub mod client;
pub mod runtime;

pub use client::HttpChatClient;
pub use runtime::run;
