//! Driving port for calculation reads.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, Error};

/// Domain use-case port for reading calculations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationsQuery: Send + Sync {
    /// Every calculation, newest first.
    async fn list(&self) -> Result<Vec<Calculation>, Error>;

    /// A single calculation, failing with `not_found` when absent.
    async fn get(&self, id: CalculationId) -> Result<Calculation, Error>;
}
