//! User data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Identifier is zero or negative.
    #[error("user id must be a positive integer")]
    InvalidId,
    /// Username is empty or whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeds [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Allowed maximum.
        max: usize,
    },
    /// Username contains characters outside `[\w.@+-]`.
    #[error("username may only contain letters, digits and @/./+/-/_ characters")]
    UsernameInvalidCharacters,
    /// First name exceeds [`FIRST_NAME_MAX`] characters.
    #[error("first name must be at most {max} characters")]
    FirstNameTooLong {
        /// Allowed maximum.
        max: usize,
    },
}

/// Stable numeric user identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::UserId;
    ///
    /// assert!(UserId::new(42).is_ok());
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub const fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 150;
/// Maximum allowed length for a first name.
pub const FIRST_NAME_MAX: usize = 150;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[\w.@+-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from owned input.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = username.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if raw.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&raw) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Given name; may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstName(String);

impl FirstName {
    /// Validate and construct a [`FirstName`] from owned input.
    pub fn new(first_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = first_name.into();
        if raw.chars().count() > FIRST_NAME_MAX {
            return Err(UserValidationError::FirstNameTooLong {
                max: FIRST_NAME_MAX,
            });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for FirstName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated fields for a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: Username,
    first_name: FirstName,
}

impl NewUser {
    /// Build a [`NewUser`] from validated components.
    #[must_use]
    pub const fn new(username: Username, first_name: FirstName) -> Self {
        Self {
            username,
            first_name,
        }
    }

    /// Requested login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Requested first name.
    #[must_use]
    pub const fn first_name(&self) -> &FirstName {
        &self.first_name
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            first_name: self.first_name,
        }
    }
}

/// Stored application user.
///
/// ## Invariants
/// - `id` is positive and assigned by the store.
/// - `username` is non-empty and unique within the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    first_name: FirstName,
}

impl User {
    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Given name.
    #[must_use]
    pub const fn first_name(&self) -> &FirstName {
        &self.first_name
    }
}
