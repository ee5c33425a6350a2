//! In-process repositories backed by locked collections.
//!
//! Used when no database URL is configured and by the integration tests.
//! Data lives for the lifetime of the process.

mod calculations;
mod users;

pub use calculations::InMemoryCalculationRepository;
pub use users::InMemoryUserRepository;
