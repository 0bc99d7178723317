//! Port abstraction for user persistence adapters and their errors.
//!
//! Handlers only see this trait; the in-memory adapter lives under
//! `outbound::persistence`.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Another user already holds the requested username.
        DuplicateUsername {
            /// Username that was requested.
            username: String,
        } => "username already taken: {username}",
        /// The backing store could not serve the request.
        Unavailable {
            /// Adapter-specific cause.
            message: String,
        } => "user repository unavailable: {message}",
    }
}

/// Driven port for loading and storing users.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier, returning `None` when absent.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user and return it with its assigned identifier.
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError>;
}
