//! Request and response schemas for the users resource.
//!
//! Domain types stay framework-agnostic; the types here carry the serde and
//! utoipa derives. Field names are snake_case in Rust and camelCase on the
//! wire, where [`crate::inbound::http::schema::SchemaConfig`] renames them.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::User;
use crate::inbound::http::schema::OutputSchema;

/// Component name of [`UserSchema`] in the OpenAPI document.
pub const USER_SCHEMA: &str = "User";

/// Representation of a stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(as = User, rename_all = "camelCase")]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Unique login name.
    #[schema(example = "joan")]
    pub username: String,
    /// Given name.
    #[schema(example = "Joan")]
    pub first_name: String,
}

impl OutputSchema for UserSchema {
    type Model = User;
    type Context = ();

    fn build(user: &User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().as_ref().to_owned(),
            first_name: user.first_name().as_ref().to_owned(),
        }
    }
}

/// OpenAPI schema for the `POST /api/users/` body.
///
/// The body is read field by field by
/// [`crate::inbound::http::users::CreateUserRequest`]; this type only
/// documents it. Both names of each field are accepted.
#[derive(ToSchema)]
#[schema(as = CreateUser, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateUserSchema {
    /// Unique login name: letters, digits and `@.+-_`, at most 150 characters.
    #[schema(example = "joan", min_length = 1, max_length = 150)]
    username: String,
    /// Given name, at most 150 characters.
    #[schema(example = "Joan", max_length = 150)]
    first_name: String,
}
