//! Calculations API handlers.
//!
//! ```text
//! GET /api/v1/calculations
//! POST /api/v1/calculations {"a":6,"b":3,"type":"div"}
//! GET /api/v1/calculations/{id}
//! PUT /api/v1/calculations/{id} {"a":2,"b":10,"type":"power"}
//! DELETE /api/v1/calculations/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Calculation, CalculationId, CalculationInput, Error, calculation_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CalculationTypeSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Operands and operation tag for create and update.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[schema(example = 6.0)]
    pub a: f64,
    #[schema(example = 3.0)]
    pub b: f64,
    #[serde(rename = "type")]
    #[schema(rename = "type", example = "div")]
    pub kind: String,
}

impl CalculationRequest {
    fn into_input(self) -> Result<CalculationInput, Error> {
        CalculationInput::try_from_parts(self.a, self.b, &self.kind)
            .map_err(|err| calculation_error(&err))
    }
}

/// Stored calculation as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub a: f64,
    pub b: f64,
    #[serde(rename = "type")]
    #[schema(rename = "type", value_type = CalculationTypeSchema)]
    pub kind: String,
    pub result: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<&Calculation> for CalculationResponse {
    fn from(calculation: &Calculation) -> Self {
        Self {
            id: calculation.id().to_string(),
            a: calculation.a(),
            b: calculation.b(),
            kind: calculation.kind().as_str().to_owned(),
            result: calculation.result(),
            user_id: calculation.owner().map(ToString::to_string),
            created_at: calculation.created_at(),
        }
    }
}

pub(crate) fn to_responses(calculations: &[Calculation]) -> Vec<CalculationResponse> {
    calculations.iter().map(CalculationResponse::from).collect()
}

fn parse_calculation_id(raw: &str) -> Result<CalculationId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(CalculationId::from_uuid)
}

/// List every calculation, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/calculations",
    responses(
        (status = 200, description = "Calculations", body = [CalculationResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "listCalculations",
    security([])
)]
#[get("/calculations")]
pub async fn list_calculations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CalculationResponse>>> {
    let calculations = state.calculations_query.list().await?;
    Ok(web::Json(to_responses(&calculations)))
}

/// Compute and store a calculation. The session user, if any, becomes the
/// owner.
#[utoipa::path(
    post,
    path = "/api/v1/calculations",
    request_body = CalculationRequest,
    responses(
        (status = 201, description = "Calculation created", body = CalculationResponse),
        (status = 400, description = "Invalid operands or type", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "createCalculation",
    security([])
)]
#[post("/calculations")]
pub async fn create_calculation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CalculationRequest>,
) -> ApiResult<HttpResponse> {
    let input = payload.into_inner().into_input()?;
    let owner = session.user_id()?;
    let calculation = state.calculations.create(input, owner).await?;
    Ok(HttpResponse::Created().json(CalculationResponse::from(&calculation)))
}

/// Fetch one calculation.
#[utoipa::path(
    get,
    path = "/api/v1/calculations/{id}",
    params(("id" = String, Path, description = "Calculation id")),
    responses(
        (status = 200, description = "Calculation", body = CalculationResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "getCalculation",
    security([])
)]
#[get("/calculations/{id}")]
pub async fn get_calculation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CalculationResponse>> {
    let id = parse_calculation_id(&path)?;
    let calculation = state.calculations_query.get(id).await?;
    Ok(web::Json(CalculationResponse::from(&calculation)))
}

/// Replace operands and type; the result is recomputed.
#[utoipa::path(
    put,
    path = "/api/v1/calculations/{id}",
    params(("id" = String, Path, description = "Calculation id")),
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Updated calculation", body = CalculationResponse),
        (status = 400, description = "Invalid operands, type or id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "updateCalculation",
    security([])
)]
#[put("/calculations/{id}")]
pub async fn update_calculation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CalculationRequest>,
) -> ApiResult<web::Json<CalculationResponse>> {
    let id = parse_calculation_id(&path)?;
    let input = payload.into_inner().into_input()?;
    let calculation = state.calculations.update(id, input).await?;
    Ok(web::Json(CalculationResponse::from(&calculation)))
}

/// Delete a calculation.
#[utoipa::path(
    delete,
    path = "/api/v1/calculations/{id}",
    params(("id" = String, Path, description = "Calculation id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["calculations"],
    operation_id = "deleteCalculation",
    security([])
)]
#[delete("/calculations/{id}")]
pub async fn delete_calculation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_calculation_id(&path)?;
    state.calculations.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
