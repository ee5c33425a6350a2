//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every request validation failure becomes a `400 invalid_request` whose
//! details carry the offending `field` and a stable `code`.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{CredentialsValidationError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidBody,
    InvalidQuery,
    InvalidEmail,
    InvalidUsername,
    EmptyPassword,
    PasswordTooShort,
    PasswordTooLong,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidUsername => "invalid_username",
            ErrorCode::EmptyPassword => "empty_password",
            ErrorCode::PasswordTooShort => "password_too_short",
            ErrorCode::PasswordTooLong => "password_too_long",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn credentials_error(err: &CredentialsValidationError) -> Error {
    let code = match err {
        CredentialsValidationError::InvalidEmail(_) => ErrorCode::InvalidEmail,
        CredentialsValidationError::InvalidUsername(_) => ErrorCode::InvalidUsername,
        CredentialsValidationError::EmptyPassword => ErrorCode::EmptyPassword,
        CredentialsValidationError::PasswordTooShort { .. } => ErrorCode::PasswordTooShort,
        CredentialsValidationError::PasswordTooLong { .. } => ErrorCode::PasswordTooLong,
    };
    field_error(err.field(), code, err.to_string())
}

/// Reject malformed JSON bodies with the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        field_error("body", ErrorCode::InvalidBody, format!("invalid JSON body: {err}")).into()
    })
}

/// Reject malformed query strings with the standard error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        field_error("query", ErrorCode::InvalidQuery, format!("invalid query: {err}")).into()
    })
}
