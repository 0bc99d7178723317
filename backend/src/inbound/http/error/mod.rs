//! Translation of handler failures into HTTP responses.
//!
//! Handlers fail through three channels: a declarative [`DeclaredError`], a
//! request [`ValidationFailure`] raised before the handler body runs, or an
//! unexpected internal fault. The first two become [`ErrorEnvelope`] JSON;
//! internal faults are logged and answered with a bare 500 so no detail leaks.

use actix_web::error::PathError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use thiserror::Error;
use tracing::{debug, error};

use crate::domain::DeclaredError;
use crate::inbound::http::envelope::{ErrorEnvelope, VALIDATION_STATUS};
use crate::inbound::http::validation::ValidationFailure;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure raised while serving a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Declarative error raised by a handler.
    #[error(transparent)]
    Declared(#[from] DeclaredError),
    /// Request input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    /// Unexpected fault; the message is logged and never sent to clients.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wrap an unexpected fault.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Declared(err) => status_from(err.status_code()),
            Self::Validation(_) => status_from(VALIDATION_STATUS),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Declared(err) => {
                debug!(code = err.error_code(), status = err.status_code(), "declared error");
                HttpResponse::build(self.status_code()).json(ErrorEnvelope::declared(err))
            }
            Self::Validation(failure) => {
                debug!(violations = failure.violations().len(), "request validation failed");
                HttpResponse::build(self.status_code()).json(ErrorEnvelope::validation(failure))
            }
            Self::Internal(message) => {
                error!(error = %message, "unhandled error while serving request");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

/// Locator used when a path parameter cannot be attributed to a name.
const PATH_LOCATOR: &str = "path";

/// Report path parameter extraction failures through the validation channel.
///
/// The failure is recorded against the first path parameter of the matched
/// route, so `/api/users/abc/` reports `user_id`.
#[must_use]
pub fn path_error_handler(err: &PathError, req: &HttpRequest) -> actix_web::Error {
    let field = req
        .match_info()
        .iter()
        .next()
        .map_or(PATH_LOCATOR, |(name, _)| name)
        .to_owned();
    ApiError::from(ValidationFailure::single([field], err.to_string())).into()
}

/// Path extractor configuration using [`path_error_handler`].
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| path_error_handler(&err, req))
}
