//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use users_api::domain::ports::UserRepository;
use users_api::inbound::http::schema::SchemaConfig;
use users_api::outbound::persistence::InMemoryUserRepository;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) schema: SchemaConfig,
    pub(crate) docs_enabled: bool,
    pub(crate) users: Arc<dyn UserRepository>,
}

impl ServerConfig {
    /// Construct a configuration serving an empty in-memory user store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            schema: SchemaConfig::default(),
            docs_enabled: true,
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }

    /// Set the schema boundary configuration.
    #[must_use]
    pub const fn with_schema(mut self, schema: SchemaConfig) -> Self {
        self.schema = schema;
        self
    }

    /// Serve or hide Swagger UI and the OpenAPI document.
    #[must_use]
    pub const fn with_docs(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }
}
