//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User persistence port.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Construct state from the user repository port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_api::inbound::http::state::HttpState;
    /// use users_api::outbound::persistence::InMemoryUserRepository;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryUserRepository::new()));
    /// let _users = state.users.clone();
    /// ```
    #[must_use]
    pub const fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
