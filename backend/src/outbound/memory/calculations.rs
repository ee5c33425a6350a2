//! In-memory `CalculationRepository`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{CalculationPersistenceError, CalculationRepository};
use crate::domain::{Calculation, CalculationId, RecentLimit, ReportSummary};

/// Calculations in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCalculationRepository {
    rows: RwLock<Vec<Calculation>>,
}

impl InMemoryCalculationRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Calculation>>, CalculationPersistenceError> {
        self.rows
            .read()
            .map_err(|_| CalculationPersistenceError::query("calculation store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Calculation>>, CalculationPersistenceError> {
        self.rows
            .write()
            .map_err(|_| CalculationPersistenceError::query("calculation store lock poisoned"))
    }

    /// Rows newest first; equal timestamps keep the later insert first.
    fn newest_first(&self) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        let mut rows: Vec<Calculation> = self.read()?.iter().rev().cloned().collect();
        rows.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(rows)
    }
}

#[async_trait]
impl CalculationRepository for InMemoryCalculationRepository {
    async fn insert(&self, calculation: &Calculation) -> Result<(), CalculationPersistenceError> {
        let mut rows = self.write()?;
        if rows.iter().any(|row| row.id() == calculation.id()) {
            return Err(CalculationPersistenceError::query("duplicate calculation id"));
        }
        rows.push(calculation.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CalculationId,
    ) -> Result<Option<Calculation>, CalculationPersistenceError> {
        Ok(self.read()?.iter().find(|row| row.id() == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        self.newest_first()
    }

    async fn recent(
        &self,
        limit: RecentLimit,
    ) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        let mut rows = self.newest_first()?;
        rows.truncate(usize::try_from(limit.get()).unwrap_or(usize::MAX));
        Ok(rows)
    }

    async fn update(&self, calculation: &Calculation) -> Result<bool, CalculationPersistenceError> {
        let mut rows = self.write()?;
        let Some(row) = rows.iter_mut().find(|row| row.id() == calculation.id()) else {
            return Ok(false);
        };
        *row = calculation.clone();
        Ok(true)
    }

    async fn delete(&self, id: &CalculationId) -> Result<bool, CalculationPersistenceError> {
        let mut rows = self.write()?;
        let before = rows.len();
        rows.retain(|row| row.id() != *id);
        Ok(rows.len() != before)
    }

    async fn summary(&self) -> Result<ReportSummary, CalculationPersistenceError> {
        Ok(ReportSummary::from_calculations(self.read()?.iter()))
    }
}
