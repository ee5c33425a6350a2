//! Reporting API handlers.
//!
//! ```text
//! GET /api/v1/reports/summary
//! GET /api/v1/reports/recent?limit=5
//! ```

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::domain::{RecentLimit, ReportSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::calculations::{CalculationResponse, to_responses};
use crate::inbound::http::schemas::{CalculationTypeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Aggregate statistics over all stored calculations.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryResponse {
    pub total_calculations: u64,
    /// Occurrences per calculation type; types never used are omitted.
    pub counts_by_type: BTreeMap<String, u64>,
    pub average_a: Option<f64>,
    pub average_b: Option<f64>,
    #[schema(value_type = Option<CalculationTypeSchema>)]
    pub most_used_type: Option<String>,
    pub last_calculation_id: Option<String>,
}

impl From<&ReportSummary> for ReportSummaryResponse {
    fn from(report: &ReportSummary) -> Self {
        Self {
            total_calculations: report.total_calculations,
            counts_by_type: report
                .counts_by_type
                .iter()
                .map(|(kind, count)| (kind.as_str().to_owned(), *count))
                .collect(),
            average_a: report.average_a,
            average_b: report.average_b,
            most_used_type: report.most_used_type().map(|kind| kind.as_str().to_owned()),
            last_calculation_id: report.last_calculation_id.map(|id| id.to_string()),
        }
    }
}

/// Query string for `GET /api/v1/reports/recent`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Number of rows; defaults to 10 and is clamped to 1..=100.
    pub limit: Option<i64>,
}

/// Summary statistics.
#[utoipa::path(
    get,
    path = "/api/v1/reports/summary",
    responses(
        (status = 200, description = "Summary", body = ReportSummaryResponse),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "reportSummary",
    security([])
)]
#[get("/reports/summary")]
pub async fn report_summary(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ReportSummaryResponse>> {
    let summary = state.reports.summary().await?;
    Ok(web::Json(ReportSummaryResponse::from(&summary)))
}

/// Most recent calculations, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/reports/recent",
    params(RecentQuery),
    responses(
        (status = 200, description = "Recent calculations", body = [CalculationResponse]),
        (status = 400, description = "Invalid limit", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "recentCalculations",
    security([])
)]
#[get("/reports/recent")]
pub async fn recent_calculations(
    state: web::Data<HttpState>,
    query: web::Query<RecentQuery>,
) -> ApiResult<web::Json<Vec<CalculationResponse>>> {
    let limit = RecentLimit::new(query.limit);
    let calculations = state.reports.recent(limit).await?;
    Ok(web::Json(to_responses(&calculations)))
}
