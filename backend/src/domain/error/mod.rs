//! Declarative HTTP error taxonomy.
//!
//! Every failure a handler may deliberately raise is a variant of
//! [`ErrorKind`]. A variant fixes its status code, machine-readable code and
//! default message at definition time; a [`DeclaredError`] is one raised
//! instance, optionally overriding the message and naming the offending input
//! field.
//!
//! The taxonomy is transport agnostic: status codes are plain integers and the
//! HTTP adapter decides how to serialise them.

use std::fmt;

/// Closed set of declarative errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    /// The request carries no credentials.
    Unauthorized,
    /// The supplied credentials were rejected.
    InvalidCredentials,
    /// No user exists with the requested identifier.
    UserNotFound,
    /// The user exists but has been disabled.
    UserDisabled,
    /// The user exists but is not active yet.
    UserInactive,
}

impl ErrorKind {
    /// Every declared variant.
    pub const ALL: [Self; 5] = [
        Self::Unauthorized,
        Self::InvalidCredentials,
        Self::UserNotFound,
        Self::UserDisabled,
        Self::UserInactive,
    ];

    /// Variants implied by any endpoint that requires authentication.
    pub const AUTH: [Self; 2] = [Self::Unauthorized, Self::InvalidCredentials];

    /// HTTP status code reported for this variant.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Unauthorized => 403,
            Self::InvalidCredentials => 401,
            Self::UserNotFound => 404,
            Self::UserDisabled | Self::UserInactive => 400,
        }
    }

    /// Stable machine-readable code clients branch on.
    #[must_use]
    pub const fn error_code(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "LOGIN_BAD_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserDisabled => "USER_DISABLE",
            Self::UserInactive => "USER_INACTIVE",
        }
    }

    /// Message used when the raise site does not supply one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Unauthorized => "Credentials were not provided.",
            Self::InvalidCredentials => "Invalid credentials.",
            Self::UserNotFound => "NOT FOUND",
            Self::UserDisabled => "User have disabled status",
            Self::UserInactive => "User have inactive status",
        }
    }

    /// Whether the variant belongs to the authentication group.
    #[must_use]
    pub fn is_auth(self) -> bool {
        Self::AUTH.contains(&self)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_code())
    }
}

/// A raised declarative error.
///
/// ## Invariants
/// - `status_code` and `error_code` always come from the [`ErrorKind`].
/// - `message` is never empty; empty overrides fall back to the default.
///
/// # Examples
/// ```
/// use users_api::domain::{DeclaredError, ErrorKind};
///
/// let err = DeclaredError::from(ErrorKind::UserNotFound);
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.message(), "NOT FOUND");
/// assert!(err.field().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredError {
    kind: ErrorKind,
    message: String,
    field: Option<String>,
}

impl DeclaredError {
    /// Raise `kind`, overriding the message and/or field when supplied.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::{DeclaredError, ErrorKind};
    ///
    /// let err = DeclaredError::new(ErrorKind::UserDisabled, Some("X"), Some("Y"));
    /// assert_eq!(err.message(), "X");
    /// assert_eq!(err.field(), Some("Y"));
    /// ```
    #[must_use]
    pub fn new(
        kind: ErrorKind,
        message: Option<impl Into<String>>,
        field: Option<impl Into<String>>,
    ) -> Self {
        Self {
            kind,
            message: message
                .map(Into::into)
                .filter(|text: &String| !text.is_empty())
                .unwrap_or_else(|| kind.default_message().to_owned()),
            field: field.map(Into::into).filter(|name: &String| !name.is_empty()),
        }
    }

    /// Replace the message, keeping the current one when `message` is empty.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let text = message.into();
        if !text.is_empty() {
            self.message = text;
        }
        self
    }

    /// Name the input field the error refers to.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        let name = field.into();
        self.field = (!name.is_empty()).then_some(name);
        self
    }

    /// Variant this error was raised from.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status code fixed by the variant.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Machine-readable code fixed by the variant.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Offending input field, when one was named.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl From<ErrorKind> for DeclaredError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_owned(),
            field: None,
        }
    }
}

impl fmt::Display for DeclaredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message)
    }
}

impl std::error::Error for DeclaredError {}

#[cfg(test)]
mod tests;
