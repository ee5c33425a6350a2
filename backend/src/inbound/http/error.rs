//! Actix rendering of domain errors.
//!
//! Every failed handler answers with the JSON error envelope. Server-side
//! failures (5xx) are logged in full and replaced with a generic message
//! before they reach the client; the trace id survives so operators can
//! correlate the log line.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const INTERNAL_MESSAGE: &str = "Internal server error";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload safe to send to the client.
///
/// Internal and unavailable errors lose their message and details.
fn client_view(error: &Error) -> Cow<'_, Error> {
    let generic = match error.code() {
        ErrorCode::InternalError => INTERNAL_MESSAGE,
        ErrorCode::ServiceUnavailable => UNAVAILABLE_MESSAGE,
        _ => return Cow::Borrowed(error),
    };
    let mut redacted = Error::new(error.code(), generic);
    if let Some(id) = error.trace_id() {
        redacted = redacted.with_trace_id(id);
    }
    Cow::Owned(redacted)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = self.trace_id().unwrap_or("-");
        if status.is_server_error() {
            error!(trace_id, code = ?self.code(), message = self.message(), "request failed");
        } else {
            warn!(trace_id, code = ?self.code(), message = self.message(), "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_view(self).as_ref())
    }
}

/// Framework errors reaching the domain boundary.
///
/// Client-side failures keep their status class as `invalid_request`;
/// anything else becomes a redacted internal error.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        if err.as_response_error().status_code().is_client_error() {
            warn!(error = %err, "framework rejected request");
            Error::invalid_request(err.to_string())
        } else {
            error!(error = %err, "framework error promoted to domain error");
            Error::internal(INTERNAL_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests;
