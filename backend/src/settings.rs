//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, configuration files, `USERS_API_*`
//! environment variables and command-line flags.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::schema::{AliasPolicy, SchemaConfig};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Configuration values controlling the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Serve Swagger UI and the OpenAPI document.
    pub docs_enabled: Option<bool>,
    /// Expose camelCase keys on the wire.
    pub camel_case: Option<bool>,
    /// Strip surrounding whitespace from incoming strings.
    pub strip_whitespace: Option<bool>,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether the documentation endpoints are served; on unless disabled.
    #[must_use]
    pub fn docs_enabled(&self) -> bool {
        self.docs_enabled.unwrap_or(true)
    }

    /// Whether wire keys are camelCase; on unless disabled.
    #[must_use]
    pub fn camel_case(&self) -> bool {
        self.camel_case.unwrap_or(true)
    }

    /// Whether incoming strings are stripped; on unless disabled.
    #[must_use]
    pub fn strip_whitespace(&self) -> bool {
        self.strip_whitespace.unwrap_or(true)
    }

    /// Schema boundary configuration derived from these settings.
    #[must_use]
    pub fn schema_config(&self) -> SchemaConfig {
        let alias = if self.camel_case() {
            AliasPolicy::CamelCase
        } else {
            AliasPolicy::Identity
        };
        SchemaConfig {
            alias,
            strip_whitespace: self.strip_whitespace(),
        }
    }
}
