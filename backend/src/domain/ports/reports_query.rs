//! Driving port for the reporting endpoints.

use async_trait::async_trait;

use crate::domain::{Calculation, Error, RecentLimit, ReportSummary};

/// Domain use-case port for aggregate reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsQuery: Send + Sync {
    /// Summary statistics over all calculations.
    async fn summary(&self) -> Result<ReportSummary, Error>;

    /// The newest calculations, newest first.
    async fn recent(&self, limit: RecentLimit) -> Result<Vec<Calculation>, Error>;
}
