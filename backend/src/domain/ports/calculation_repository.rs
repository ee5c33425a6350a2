//! Port for calculation persistence.
//!
//! Adapters store [`Calculation`] records with their cached result and serve
//! the aggregate queries behind the reports endpoints.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, RecentLimit, ReportSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by calculation repository adapters.
    pub enum CalculationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "calculation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "calculation repository query failed: {message}",
        /// A stored row could not be turned back into a calculation.
        Corrupt { message: String } =>
            "calculation repository returned an invalid row: {message}",
    }
}

/// Port for calculation storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Insert a new calculation.
    async fn insert(&self, calculation: &Calculation) -> Result<(), CalculationPersistenceError>;

    /// Fetch a calculation by identifier.
    async fn find_by_id(
        &self,
        id: &CalculationId,
    ) -> Result<Option<Calculation>, CalculationPersistenceError>;

    /// Every calculation, newest first.
    async fn list(&self) -> Result<Vec<Calculation>, CalculationPersistenceError>;

    /// The `limit` newest calculations, newest first.
    async fn recent(
        &self,
        limit: RecentLimit,
    ) -> Result<Vec<Calculation>, CalculationPersistenceError>;

    /// Overwrite operands, type and result. Returns `false` when the record
    /// does not exist.
    async fn update(&self, calculation: &Calculation) -> Result<bool, CalculationPersistenceError>;

    /// Remove a calculation. Returns `false` when the record does not exist.
    async fn delete(&self, id: &CalculationId) -> Result<bool, CalculationPersistenceError>;

    /// Aggregate statistics over every stored calculation.
    async fn summary(&self) -> Result<ReportSummary, CalculationPersistenceError>;
}
