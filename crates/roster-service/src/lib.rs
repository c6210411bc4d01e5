//! # roster-service
//!
//! Application layer containing the reconciliation engine: event ingestion,
//! roster sync, the deleted-account sweep, and the command surface that
//! triggers them.

pub mod services;

pub use services::{
    Command, CommandInvocation, CommandService, DeletionSweeper, EventIngestor, Reconciler,
    Resolution, ServiceContext, ServiceError, ServiceResult, SweepPolicy, SweepReport, Verdict,
};
