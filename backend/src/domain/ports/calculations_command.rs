//! Driving port for calculation mutations.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, CalculationInput, Error, UserId};

/// Domain use-case port for creating, updating and deleting calculations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationsCommand: Send + Sync {
    /// Compute and store a calculation, optionally owned by `owner`.
    async fn create(
        &self,
        input: CalculationInput,
        owner: Option<UserId>,
    ) -> Result<Calculation, Error>;

    /// Replace operands and type, recomputing the stored result.
    async fn update(
        &self,
        id: CalculationId,
        input: CalculationInput,
    ) -> Result<Calculation, Error>;

    /// Remove a calculation.
    async fn delete(&self, id: CalculationId) -> Result<(), Error>;
}
