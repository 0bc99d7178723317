//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the users endpoints from the inbound layer
//! - **Schemas**: [`UserSchema`], [`CreateUserSchema`] and the
//!   [`ErrorEnvelope`] family shared by every error response
//! - **Examples**: error responses generated from each operation's route
//!   declaration, merged in by [`ErrorExamplesAddon`]
//!
//! The generated specification is served by Swagger UI when docs are enabled
//! and exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::envelope::{
    DeclaredDetails, ErrorBody, ErrorDetails, ErrorEnvelope, ValidationDetail,
};
use crate::inbound::http::route_catalogue;
use crate::inbound::http::schemas::{CreateUserSchema, UserSchema};
use utoipa::{Modify, OpenApi};

/// Merge the example error responses of every declared route.
pub struct ErrorExamplesAddon;

impl Modify for ErrorExamplesAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        route_catalogue().apply(openapi);
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&ErrorExamplesAddon),
    info(
        title = "Users API",
        description = "User lookup and registration with uniform error envelopes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_user_by_id,
        crate::inbound::http::users::create_user,
    ),
    components(schemas(
        UserSchema,
        CreateUserSchema,
        ErrorEnvelope,
        ErrorBody,
        ErrorDetails,
        DeclaredDetails,
        ValidationDetail
    )),
    tags(
        (name = "users", description = "Operations related to users")
    )
)]
pub struct ApiDoc;
