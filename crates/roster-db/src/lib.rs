//! # roster-db
//!
//! Database layer implementing the member store with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate provides the SQLite implementation of the `MemberRepository`
//! trait defined in `roster-core`. It handles:
//!
//! - Connection pool management
//! - Idempotent embedded schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> model mappers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_db::{create_pool, run_migrations, DatabaseConfig, SqliteMemberRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let member_repo = SqliteMemberRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, SqlitePool};
pub use repositories::SqliteMemberRepository;
