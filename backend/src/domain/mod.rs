//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, and the services that implement the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - CalculationType / compute: the operation registry and dispatcher.
//! - Calculation: a stored calculation with its cached result.
//! - User: account identity exposed to clients.
//! - ReportSummary / RecentLimit: reporting views.

pub mod auth;
pub mod calculation;
pub mod calculations_service;
pub mod error;
pub mod ports;
pub mod report;
pub mod trace_id;
pub mod user;
pub mod user_accounts_service;

pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PASSWORD_MAX, PASSWORD_MIN, Password,
    PasswordChange, ProfileUpdate, Registration,
};
pub use self::calculation::{
    Calculation, CalculationError, CalculationId, CalculationInput, CalculationRecordError,
    CalculationType, DomainViolation, StoredCalculation, compute,
};
pub use self::calculations_service::{CalculationsService, calculation_error};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::report::{RECENT_DEFAULT, RECENT_MAX, RecentLimit, ReportSummary};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PasswordHash, User, UserAccount, UserId, UserValidationError, Username,
};
pub use self::user_accounts_service::UserAccountsService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use calculator_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
