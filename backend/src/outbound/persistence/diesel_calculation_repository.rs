//! PostgreSQL-backed `CalculationRepository` implementation using Diesel ORM.
//!
//! Results are stored alongside operands and never recomputed on read.
//! Summary statistics are computed with SQL aggregates.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{CalculationPersistenceError, CalculationRepository};
use crate::domain::{
    Calculation, CalculationId, CalculationType, RecentLimit, ReportSummary, StoredCalculation,
    UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{CalculationRow, CalculationUpdate, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculations;

/// Diesel-backed implementation of the [`CalculationRepository`] port.
#[derive(Clone)]
pub struct DieselCalculationRepository {
    pool: DbPool,
}

impl DieselCalculationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationPersistenceError {
    CalculationPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> CalculationPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CalculationPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } => {
            CalculationPersistenceError::query("duplicate calculation id")
        }
        DieselFailure::Query(message) => CalculationPersistenceError::query(message),
    }
}

fn parse_type(raw: &str, id: Uuid) -> Result<CalculationType, CalculationPersistenceError> {
    raw.parse().map_err(|err| {
        warn!(calculation_id = %id, value = raw, "unrecognised calculation_type value");
        CalculationPersistenceError::corrupt(format!("{err}"))
    })
}

fn row_to_calculation(row: CalculationRow) -> Result<Calculation, CalculationPersistenceError> {
    let kind = parse_type(&row.calculation_type, row.id)?;
    Calculation::restore(StoredCalculation {
        id: CalculationId::from_uuid(row.id),
        owner: row.user_id.map(UserId::from_uuid),
        a: row.a,
        b: row.b,
        kind,
        result: row.result,
        created_at: row.created_at,
    })
    .map_err(|err| CalculationPersistenceError::corrupt(format!("{}: {err}", row.id)))
}

fn rows_to_calculations(
    rows: Vec<CalculationRow>,
) -> Result<Vec<Calculation>, CalculationPersistenceError> {
    rows.into_iter().map(row_to_calculation).collect()
}

fn to_count(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or_default()
}

#[async_trait]
impl CalculationRepository for DieselCalculationRepository {
    async fn insert(&self, calculation: &Calculation) -> Result<(), CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCalculationRow {
            id: *calculation.id().as_uuid(),
            user_id: calculation.owner().map(|owner| *owner.as_uuid()),
            a: calculation.a(),
            b: calculation.b(),
            calculation_type: calculation.kind().as_str(),
            result: calculation.result(),
            created_at: calculation.created_at(),
        };

        diesel::insert_into(calculations::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &CalculationId,
    ) -> Result<Option<Calculation>, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        calculations::table
            .filter(calculations::id.eq(id.as_uuid()))
            .select(CalculationRow::as_select())
            .first::<CalculationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_calculation)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = calculations::table
            .order((calculations::created_at.desc(), calculations::id.desc()))
            .select(CalculationRow::as_select())
            .load::<CalculationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_calculations(rows)
    }

    async fn recent(
        &self,
        limit: RecentLimit,
    ) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = calculations::table
            .order((calculations::created_at.desc(), calculations::id.desc()))
            .limit(i64::from(limit.get()))
            .select(CalculationRow::as_select())
            .load::<CalculationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_calculations(rows)
    }

    async fn update(&self, calculation: &Calculation) -> Result<bool, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = CalculationUpdate {
            a: calculation.a(),
            b: calculation.b(),
            calculation_type: calculation.kind().as_str(),
            result: calculation.result(),
        };

        let id = calculation.id();
        let target = calculations::table.filter(calculations::id.eq(id.as_uuid()));
        let updated = diesel::update(target)
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &CalculationId) -> Result<bool, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(calculations::table.filter(calculations::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn summary(&self) -> Result<ReportSummary, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let counts = calculations::table
            .group_by(calculations::calculation_type)
            .select((calculations::calculation_type, count_star()))
            .load::<(String, i64)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let (average_a, average_b) = calculations::table
            .select((
                diesel::dsl::avg(calculations::a),
                diesel::dsl::avg(calculations::b),
            ))
            .first::<(Option<f64>, Option<f64>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let last = calculations::table
            .order((calculations::created_at.desc(), calculations::id.desc()))
            .select(calculations::id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let mut counts_by_type = BTreeMap::new();
        for (raw, count) in counts {
            let kind = parse_type(&raw, Uuid::nil())?;
            counts_by_type.insert(kind, to_count(count));
        }

        Ok(ReportSummary {
            total_calculations: counts_by_type.values().sum(),
            counts_by_type,
            average_a,
            average_b,
            last_calculation_id: last.map(CalculationId::from_uuid),
        })
    }
}
