//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain types:
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Connections come from a `bb8` pool via `diesel-async`.
//! - Database errors are classified once and mapped to each port's error
//!   enum.
//!
//! # Example
//!
//! ```no_run
//! use calculator_backend::outbound::persistence::{
//!     DbPool, DieselCalculationRepository, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/calculator")).await?;
//! let calculations = DieselCalculationRepository::new(pool);
//! # let _ = calculations;
//! # Ok(())
//! # }
//! ```

mod diesel_calculation_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_calculation_repository::DieselCalculationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
