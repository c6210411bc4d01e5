//! Application services

pub mod commands;
pub mod context;
pub mod error;
pub mod ingest;
pub mod sweep;
pub mod sync;

pub use commands::{Command, CommandInvocation, CommandService};
pub use context::{ServiceContext, SweepPolicy};
pub use error::{ServiceError, ServiceResult};
pub use ingest::EventIngestor;
pub use sweep::{DeletionSweeper, Resolution, SweepReport, Verdict};
pub use sync::Reconciler;
