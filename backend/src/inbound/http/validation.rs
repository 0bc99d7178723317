//! Request validation failures and the payload reader that collects them.
//!
//! A failure is reported against a *locator*: the ordered path of segments
//! naming the failing input (for example `["address", "city"]`). Readers keep
//! going after the first failure so a single response lists every failing
//! field.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Message reported for an absent required field.
pub const FIELD_REQUIRED: &str = "Field required";

/// One segment of a field locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorSegment {
    /// Object key.
    Key(String),
    /// Array position.
    Index(usize),
}

impl fmt::Display for LocatorSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for LocatorSegment {
    fn from(value: &str) -> Self {
        Self::Key(value.to_owned())
    }
}

impl From<String> for LocatorSegment {
    fn from(value: String) -> Self {
        Self::Key(value)
    }
}

impl From<usize> for LocatorSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    locator: Vec<LocatorSegment>,
    message: String,
}

impl FieldViolation {
    /// Record `message` against the given locator.
    ///
    /// # Examples
    /// ```
    /// use users_api::inbound::http::validation::FieldViolation;
    ///
    /// let violation = FieldViolation::new(["address", "city"], "Field required");
    /// assert_eq!(violation.field(), "address");
    /// assert_eq!(violation.field_full().as_deref(), Some("city"));
    /// ```
    #[must_use]
    pub fn new<I, S>(locator: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LocatorSegment>,
    {
        Self {
            locator: locator.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Full locator.
    #[must_use]
    pub fn locator(&self) -> &[LocatorSegment] {
        &self.locator
    }

    /// First locator segment; empty when the locator is empty.
    #[must_use]
    pub fn field(&self) -> String {
        self.locator
            .first()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Remaining segments joined with dots, `None` for single-segment locators.
    #[must_use]
    pub fn field_full(&self) -> Option<String> {
        let rest = self.locator.get(1..).unwrap_or_default();
        if rest.is_empty() {
            return None;
        }
        Some(
            rest.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("."),
        )
    }

    /// Failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered set of field failures for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("request validation failed with {} error(s)", .violations.len())]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Wrap violations in report order.
    #[must_use]
    pub const fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Failure with a single violation.
    #[must_use]
    pub fn single<I, S>(locator: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LocatorSegment>,
    {
        Self::new(vec![FieldViolation::new(locator, message)])
    }

    /// Violations in report order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

/// Newtype wrapper for payload field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldName(&'static str);

impl FieldName {
    /// Declare a field name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Field name as written in the decoded payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Reads typed fields out of a decoded JSON object, collecting every failure.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use users_api::inbound::http::validation::{FieldName, PayloadReader};
///
/// const NAME: FieldName = FieldName::new("name");
/// const AGE: FieldName = FieldName::new("age");
///
/// let fields = json!({"age": "old"}).as_object().cloned().unwrap();
/// let mut reader = PayloadReader::new(fields);
/// let name = reader.required::<String>(NAME);
/// let age = reader.required::<u32>(AGE);
/// let failure = reader.into_result(name.zip(age)).unwrap_err();
/// assert_eq!(failure.violations().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct PayloadReader {
    fields: Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl PayloadReader {
    /// Start reading the given object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            violations: Vec::new(),
        }
    }

    /// Read a field that must be present.
    pub fn required<T: DeserializeOwned>(&mut self, field: FieldName) -> Option<T> {
        let Some(value) = self.fields.remove(field.as_str()) else {
            self.reject(field, FIELD_REQUIRED);
            return None;
        };
        self.decode(field, value)
    }

    /// Read a field that may be absent or `null`.
    pub fn optional<T: DeserializeOwned>(&mut self, field: FieldName) -> Option<T> {
        let value = self
            .fields
            .remove(field.as_str())
            .filter(|raw| !raw.is_null())?;
        self.decode(field, value)
    }

    /// Keep `result` when it is `Ok`, otherwise record its error against `field`.
    pub fn check<T, E: fmt::Display>(&mut self, field: FieldName, result: Result<T, E>) -> Option<T> {
        result.map_err(|err| self.reject(field, err.to_string())).ok()
    }

    /// Record a failure against `field`.
    pub fn reject(&mut self, field: FieldName, message: impl Into<String>) {
        self.violations
            .push(FieldViolation::new([field.as_str()], message));
    }

    /// Finish reading: `parsed` is returned only when no failure was recorded.
    ///
    /// # Errors
    /// Returns every recorded violation when any field failed.
    pub fn into_result<T>(self, parsed: Option<T>) -> Result<T, ValidationFailure> {
        match parsed {
            Some(value) if self.violations.is_empty() => Ok(value),
            _ => Err(ValidationFailure::new(self.violations)),
        }
    }

    fn decode<T: DeserializeOwned>(&mut self, field: FieldName, value: Value) -> Option<T> {
        serde_json::from_value(value)
            .map_err(|err| self.reject(field, format!("Input is invalid: {err}")))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const USERNAME: FieldName = FieldName::new("username");
    const NICKNAME: FieldName = FieldName::new("nickname");

    fn reader(value: Value) -> PayloadReader {
        match value {
            Value::Object(fields) => PayloadReader::new(fields),
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    #[case(vec![LocatorSegment::from("username")], "username", None)]
    #[case(
        vec![
            LocatorSegment::from("items"),
            LocatorSegment::from(0_usize),
            LocatorSegment::from("sku"),
        ],
        "items",
        Some("0.sku")
    )]
    #[case(Vec::new(), "", None)]
    fn locator_splits_into_field_and_field_full(
        #[case] locator: Vec<LocatorSegment>,
        #[case] field: &str,
        #[case] field_full: Option<&str>,
    ) {
        let violation = FieldViolation::new(locator, "bad");
        assert_eq!(violation.field(), field);
        assert_eq!(violation.field_full().as_deref(), field_full);
    }

    #[rstest]
    fn missing_required_field_is_reported() {
        let mut reader = reader(json!({}));
        let username = reader.required::<String>(USERNAME);
        let failure = reader.into_result(username).expect_err("missing field");
        assert_eq!(
            failure.violations(),
            &[FieldViolation::new(["username"], FIELD_REQUIRED)]
        );
    }

    #[rstest]
    fn wrong_type_is_reported_against_the_field() {
        let mut reader = reader(json!({"username": 5}));
        let username = reader.required::<String>(USERNAME);
        let failure = reader.into_result(username).expect_err("wrong type");
        let violation = failure.violations().first().expect("one violation");
        assert_eq!(violation.field(), "username");
        assert!(violation.message().starts_with("Input is invalid"));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"nickname": null}))]
    fn optional_fields_accept_absence_and_null(#[case] payload: Value) {
        let mut reader = reader(payload);
        let nickname = reader.optional::<String>(NICKNAME);
        assert!(nickname.is_none());
        assert!(reader.into_result(Some(())).is_ok());
    }

    #[rstest]
    fn every_failure_is_collected_in_order() {
        let mut reader = reader(json!({"nickname": 1}));
        let username = reader.required::<String>(USERNAME);
        let nickname = reader.optional::<String>(NICKNAME);
        let failure = reader
            .into_result(username.zip(nickname))
            .expect_err("two failures");
        let fields: Vec<_> = failure.violations().iter().map(FieldViolation::field).collect();
        assert_eq!(fields, ["username", "nickname"]);
    }

    #[rstest]
    fn check_records_domain_errors() {
        let mut reader = reader(json!({}));
        let checked: Option<u8> = reader.check(USERNAME, Err::<u8, _>("too long"));
        assert!(checked.is_none());
        let failure = reader.into_result(checked).expect_err("rejected");
        assert_eq!(failure.violations().first().map(FieldViolation::message), Some("too long"));
    }

    #[rstest]
    fn failure_display_counts_violations() {
        let failure = ValidationFailure::single(["body"], "bad");
        assert_eq!(failure.to_string(), "request validation failed with 1 error(s)");
    }
}
