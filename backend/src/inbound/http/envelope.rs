//! Wire representation of error responses.
//!
//! ```text
//! { "status": 404, "error": { "code": "USER_NOT_FOUND", "details": { "message": "NOT FOUND" } } }
//! { "status": 422, "error": { "code": "VALIDATION_ERROR", "details": [ { "location": "query", ... } ] } }
//! ```
//!
//! Envelope keys are fixed and never go through schema aliasing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DeclaredError;
use crate::inbound::http::validation::ValidationFailure;

/// Error code used for every request validation failure.
pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

/// HTTP status used for every request validation failure.
pub const VALIDATION_STATUS: u16 = 422;

/// Location reported for every validation detail.
///
/// Always `"query"`, whichever part of the request the field came from.
pub const VALIDATION_LOCATION: &str = "query";

/// Uniform error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// HTTP status code, repeated in the body.
    #[schema(example = 404)]
    pub status: u16,
    /// Machine-readable code and details.
    pub error: ErrorBody,
}

/// Code and details of an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable error code.
    #[schema(example = "USER_NOT_FOUND")]
    pub code: String,
    /// Single-error object or list of validation failures.
    pub details: ErrorDetails,
}

/// Details payload; its shape depends on the error channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// Validation failures, one entry per failing field, in report order.
    Validation(Vec<ValidationDetail>),
    /// A single declarative error.
    Declared(DeclaredDetails),
}

/// Details of a declarative error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeclaredDetails {
    /// Offending input field; omitted when the error names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable message.
    #[schema(example = "NOT FOUND")]
    pub message: String,
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationDetail {
    /// Request part the field came from.
    #[schema(example = "query")]
    pub location: String,
    /// First segment of the failing field's locator.
    #[schema(example = "username")]
    pub field: String,
    /// Remaining locator segments joined with dots, `null` when there are none.
    pub field_full: Option<String>,
    /// Failure message.
    #[schema(example = "Field required")]
    pub message: String,
}

impl ErrorEnvelope {
    /// Envelope for a raised declarative error.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::{DeclaredError, ErrorKind};
    /// use users_api::inbound::http::envelope::ErrorEnvelope;
    ///
    /// let envelope = ErrorEnvelope::declared(&DeclaredError::from(ErrorKind::UserNotFound));
    /// assert_eq!(envelope.status, 404);
    /// assert_eq!(envelope.error.code, "USER_NOT_FOUND");
    /// ```
    #[must_use]
    pub fn declared(error: &DeclaredError) -> Self {
        Self {
            status: error.status_code(),
            error: ErrorBody {
                code: error.error_code().to_owned(),
                details: ErrorDetails::Declared(DeclaredDetails {
                    field: error.field().map(str::to_owned),
                    message: error.message().to_owned(),
                }),
            },
        }
    }

    /// Envelope for a request validation failure.
    #[must_use]
    pub fn validation(failure: &ValidationFailure) -> Self {
        let details = failure
            .violations()
            .iter()
            .map(|violation| ValidationDetail {
                location: VALIDATION_LOCATION.to_owned(),
                field: violation.field(),
                field_full: violation.field_full(),
                message: violation.message().to_owned(),
            })
            .collect();
        Self {
            status: VALIDATION_STATUS,
            error: ErrorBody {
                code: VALIDATION_ERROR_CODE.to_owned(),
                details: ErrorDetails::Validation(details),
            },
        }
    }
}
