//! Calculation and report domain services.
//!
//! [`CalculationsService`] implements the calculation command and query ports
//! and the reports query port over a single [`CalculationRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CalculationPersistenceError, CalculationRepository, CalculationsCommand, CalculationsQuery,
    ReportsQuery,
};
use crate::domain::{
    Calculation, CalculationError, CalculationId, CalculationInput, CalculationRecordError, Error,
    RecentLimit, ReportSummary, UserId,
};

const CALCULATION_NOT_FOUND: &str = "Calculation not found";

fn map_repository_error(error: CalculationPersistenceError) -> Error {
    match error {
        CalculationPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("calculation repository unavailable: {message}"))
        }
        CalculationPersistenceError::Query { message } => {
            Error::internal(format!("calculation repository error: {message}"))
        }
        CalculationPersistenceError::Corrupt { message } => {
            Error::internal(format!("calculation repository returned bad data: {message}"))
        }
    }
}

/// Map a dispatcher failure to a client error carrying a stable detail code.
pub fn calculation_error(error: &CalculationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

fn map_record_error(error: CalculationRecordError) -> Error {
    match error {
        CalculationRecordError::Operation(err) => calculation_error(&err),
        err @ CalculationRecordError::NonFiniteResult { .. } => {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "result",
                "code": "non_finite_result",
            }))
        }
    }
}

fn not_found() -> Error {
    Error::not_found(CALCULATION_NOT_FOUND)
}

/// Calculation service implementing the calculation and reports ports.
#[derive(Clone)]
pub struct CalculationsService<R> {
    calculations: Arc<R>,
}

impl<R> CalculationsService<R> {
    /// Create a new service backed by the calculation repository.
    pub fn new(calculations: Arc<R>) -> Self {
        Self { calculations }
    }
}

impl<R> CalculationsService<R>
where
    R: CalculationRepository,
{
    async fn load(&self, id: CalculationId) -> Result<Calculation, Error> {
        self.calculations
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl<R> CalculationsCommand for CalculationsService<R>
where
    R: CalculationRepository,
{
    async fn create(
        &self,
        input: CalculationInput,
        owner: Option<UserId>,
    ) -> Result<Calculation, Error> {
        let calculation = Calculation::create(CalculationId::random(), owner, input, Utc::now())
            .map_err(map_record_error)?;
        self.calculations
            .insert(&calculation)
            .await
            .map_err(map_repository_error)?;

        info!(
            calculation_id = %calculation.id(),
            kind = %calculation.kind(),
            "calculation created"
        );
        Ok(calculation)
    }

    async fn update(
        &self,
        id: CalculationId,
        input: CalculationInput,
    ) -> Result<Calculation, Error> {
        let updated = self
            .load(id)
            .await?
            .with_input(input)
            .map_err(map_record_error)?;
        let found = self
            .calculations
            .update(&updated)
            .await
            .map_err(map_repository_error)?;
        if !found {
            return Err(not_found());
        }

        info!(calculation_id = %id, kind = %updated.kind(), "calculation updated");
        Ok(updated)
    }

    async fn delete(&self, id: CalculationId) -> Result<(), Error> {
        let found = self
            .calculations
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !found {
            return Err(not_found());
        }
        info!(calculation_id = %id, "calculation deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> CalculationsQuery for CalculationsService<R>
where
    R: CalculationRepository,
{
    async fn list(&self) -> Result<Vec<Calculation>, Error> {
        self.calculations.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: CalculationId) -> Result<Calculation, Error> {
        self.load(id).await
    }
}

#[async_trait]
impl<R> ReportsQuery for CalculationsService<R>
where
    R: CalculationRepository,
{
    async fn summary(&self) -> Result<ReportSummary, Error> {
        self.calculations
            .summary()
            .await
            .map_err(map_repository_error)
    }

    async fn recent(&self, limit: RecentLimit) -> Result<Vec<Calculation>, Error> {
        self.calculations
            .recent(limit)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour over a mocked repository.
    use super::*;
    use crate::domain::ports::MockCalculationRepository;
    use crate::domain::{CalculationType, ErrorCode};
    use mockall::predicate::eq;
    use rstest::rstest;

    fn service(repo: MockCalculationRepository) -> CalculationsService<MockCalculationRepository> {
        CalculationsService::new(Arc::new(repo))
    }

    fn input(a: f64, b: f64, tag: &str) -> CalculationInput {
        CalculationInput::try_from_parts(a, b, tag).expect("valid input")
    }

    fn stored(a: f64, b: f64, tag: &str) -> Calculation {
        Calculation::create(CalculationId::random(), None, input(a, b, tag), Utc::now())
            .expect("finite")
    }

    #[rstest]
    #[tokio::test]
    async fn create_persists_computed_result() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_insert()
            .withf(|calc: &Calculation| calc.result() == 8.0)
            .times(1)
            .return_once(|_| Ok(()));

        let owner = UserId::random();
        let calc = service(repo)
            .create(input(5.0, 3.0, "add"), Some(owner.clone()))
            .await
            .expect("created");

        assert_eq!(calc.result(), 8.0);
        assert_eq!(calc.kind(), CalculationType::Add);
        assert_eq!(calc.owner(), Some(&owner));
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_non_finite_result_without_persisting() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_insert().never();

        let err = service(repo)
            .create(input(1e308, 1e308, "mul"), None)
            .await
            .expect_err("overflow");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Result is not a finite real number.");
    }

    #[rstest]
    #[tokio::test]
    async fn update_recomputes_result() {
        let existing = stored(1.0, 2.0, "add");
        let id = existing.id();
        let mut repo = MockCalculationRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_update()
            .withf(|calc: &Calculation| calc.result() == 2.0)
            .return_once(|_| Ok(true));

        let updated = service(repo)
            .update(id, input(6.0, 3.0, "div"))
            .await
            .expect("updated");

        assert_eq!(updated.id(), id);
        assert_eq!(updated.kind(), CalculationType::Div);
        assert_eq!(updated.result(), 2.0);
    }

    #[rstest]
    #[tokio::test]
    async fn update_reports_missing_calculation() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));
        repo.expect_update().never();

        let err = service(repo)
            .update(CalculationId::random(), input(1.0, 1.0, "add"))
            .await
            .expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Calculation not found");
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn delete_reports_outcome(#[case] found: bool, #[case] expected: Option<ErrorCode>) {
        let mut repo = MockCalculationRepository::new();
        repo.expect_delete().return_once(move |_| Ok(found));

        let result = service(repo).delete(CalculationId::random()).await;

        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn get_maps_connection_failure_to_unavailable() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_find_by_id()
            .return_once(|_| Err(CalculationPersistenceError::connection("pool timeout")));

        let err = service(repo)
            .get(CalculationId::random())
            .await
            .expect_err("unavailable");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn recent_passes_clamped_limit() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_recent()
            .with(eq(RecentLimit::new(Some(100))))
            .return_once(|_| Ok(Vec::new()));

        let rows = service(repo)
            .recent(RecentLimit::new(Some(1_000)))
            .await
            .expect("recent");

        assert!(rows.is_empty());
    }

    #[rstest]
    fn calculation_errors_carry_detail_codes() {
        let err = calculation_error(&CalculationError::DivisionByZero {
            operation: CalculationType::Div,
        });
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "b", "code": "division_by_zero" }))
        );
    }
}
