//! Example error responses for the OpenAPI document.
//!
//! Every operation documents the declarative errors it may raise, grouped by
//! HTTP status, plus the canonical validation failure under 422.

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value, json};
use utoipa::openapi::example::ExampleBuilder;
use utoipa::openapi::{ContentBuilder, Ref, Response, ResponseBuilder};

use crate::domain::{DeclaredError, ErrorKind};
use crate::inbound::http::envelope::{
    DeclaredDetails, ErrorBody, ErrorDetails, ErrorEnvelope, VALIDATION_ERROR_CODE,
    VALIDATION_STATUS, ValidationDetail,
};

const JSON_CONTENT_TYPE: &str = "application/json";
const PLACEHOLDER: &str = "string";

/// One named example: a summary and the envelope it illustrates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleEntry {
    /// Short label; the error code.
    pub summary: String,
    /// Example response body.
    pub value: ErrorEnvelope,
}

/// Examples keyed by HTTP status, then by error code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleSet {
    by_status: BTreeMap<u16, BTreeMap<String, ExampleEntry>>,
}

impl ExampleSet {
    fn insert(&mut self, status: u16, code: impl Into<String>, entry: ExampleEntry) {
        self.by_status
            .entry(status)
            .or_default()
            .insert(code.into(), entry);
    }

    /// Documented statuses.
    pub fn statuses(&self) -> impl Iterator<Item = u16> + '_ {
        self.by_status.keys().copied()
    }

    /// Examples documented under `status`, keyed by error code.
    #[must_use]
    pub fn for_status(&self, status: u16) -> Option<&BTreeMap<String, ExampleEntry>> {
        self.by_status.get(&status)
    }

    /// Example recorded for `code` under `status`.
    #[must_use]
    pub fn example(&self, status: u16, code: &str) -> Option<&ExampleEntry> {
        self.for_status(status).and_then(|examples| examples.get(code))
    }

    /// Number of documented statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_status.len()
    }

    /// Whether no status is documented.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_status.is_empty()
    }

    /// Render in the OpenAPI responses shape:
    /// `{status: {content: {"application/json": {examples: {code: {summary, value}}}}}}`.
    ///
    /// # Errors
    /// Returns the serialiser error if an envelope cannot be rendered.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut responses = Map::new();
        for (status, examples) in &self.by_status {
            responses.insert(
                status.to_string(),
                json!({
                    "content": {
                        JSON_CONTENT_TYPE: { "examples": serde_json::to_value(examples)? }
                    }
                }),
            );
        }
        Ok(Value::Object(responses))
    }

    /// Render as utoipa responses keyed by status code.
    #[must_use]
    pub fn responses(&self) -> BTreeMap<u16, Response> {
        self.by_status
            .iter()
            .map(|(status, examples)| (*status, response_for(*status, examples)))
            .collect()
    }
}

fn response_for(status: u16, examples: &BTreeMap<String, ExampleEntry>) -> Response {
    let named = examples.iter().filter_map(|(code, entry)| {
        let value = serde_json::to_value(&entry.value).ok()?;
        let example = ExampleBuilder::new()
            .summary(entry.summary.clone())
            .value(Some(value))
            .build();
        Some((code.clone(), example))
    });
    let content = ContentBuilder::new()
        .schema(Some(Ref::from_schema_name("ErrorEnvelope")))
        .examples_from_iter(named)
        .build();
    let description = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Error");
    ResponseBuilder::new()
        .description(description)
        .content(JSON_CONTENT_TYPE, content)
        .build()
}

/// Example for a raised declarative error.
///
/// The details carry a placeholder `field` so readers see the full shape.
///
/// # Examples
/// ```
/// use users_api::domain::{DeclaredError, ErrorKind};
/// use users_api::inbound::http::examples::example_for;
///
/// let entry = example_for(&DeclaredError::from(ErrorKind::UserInactive));
/// assert_eq!(entry.summary, "USER_INACTIVE");
/// assert_eq!(entry.value.status, 400);
/// ```
#[must_use]
pub fn example_for(error: &DeclaredError) -> ExampleEntry {
    ExampleEntry {
        summary: error.error_code().to_owned(),
        value: ErrorEnvelope {
            status: error.status_code(),
            error: ErrorBody {
                code: error.error_code().to_owned(),
                details: ErrorDetails::Declared(DeclaredDetails {
                    field: Some(PLACEHOLDER.to_owned()),
                    message: error.message().to_owned(),
                }),
            },
        },
    }
}

/// Canonical request validation example.
#[must_use]
pub fn validation_example() -> ExampleEntry {
    ExampleEntry {
        summary: VALIDATION_ERROR_CODE.to_owned(),
        value: ErrorEnvelope {
            status: VALIDATION_STATUS,
            error: ErrorBody {
                code: VALIDATION_ERROR_CODE.to_owned(),
                details: ErrorDetails::Validation(vec![ValidationDetail {
                    location: PLACEHOLDER.to_owned(),
                    field: PLACEHOLDER.to_owned(),
                    field_full: Some(PLACEHOLDER.to_owned()),
                    message: PLACEHOLDER.to_owned(),
                }]),
            },
        },
    }
}

/// Build the example responses for an operation raising `errors`.
///
/// With `auth` set the authentication failures are documented too. The
/// result always holds the validation example under 422, next to any
/// declarative 422 examples.
///
/// # Examples
/// ```
/// use users_api::domain::ErrorKind;
/// use users_api::inbound::http::examples::generate_examples;
///
/// let set = generate_examples(&[ErrorKind::UserNotFound], true);
/// assert!(set.example(404, "USER_NOT_FOUND").is_some());
/// assert!(set.example(403, "UNAUTHORIZED").is_some());
/// assert!(set.example(422, "VALIDATION_ERROR").is_some());
/// ```
#[must_use]
pub fn generate_examples(errors: &[ErrorKind], auth: bool) -> ExampleSet {
    let auth_errors: &[ErrorKind] = if auth { &ErrorKind::AUTH } else { &[] };
    let mut set = ExampleSet::default();
    for kind in errors.iter().chain(auth_errors) {
        let error = DeclaredError::from(*kind);
        set.insert(error.status_code(), error.error_code(), example_for(&error));
    }
    set.insert(VALIDATION_STATUS, VALIDATION_ERROR_CODE, validation_example());
    set
}
