//! Users API handlers.
//!
//! ```text
//! GET /api/users/42/
//! POST /api/users/ {"username":"joan","firstName":"Joan"}
//! ```

use actix_web::http::StatusCode;
use actix_web::{get, post, web};
use tracing::info;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{DeclaredError, ErrorKind, FirstName, NewUser, UserId, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::route::RouteDeclaration;
use crate::inbound::http::schema::{InputSchema, OutputSchema, SchemaJson, SchemaPayload};
use crate::inbound::http::schemas::{USER_SCHEMA, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, PayloadReader, ValidationFailure};

/// Path of a single user in the OpenAPI document.
pub const USER_PATH: &str = "/api/users/{user_id}/";
/// Path of the users collection in the OpenAPI document.
pub const USERS_PATH: &str = "/api/users/";

/// Message reported when the requested username is already taken.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "A user with that username already exists.";

const FETCH_STATUS: StatusCode = StatusCode::OK;
const CREATE_STATUS: StatusCode = StatusCode::CREATED;

const USERNAME: FieldName = FieldName::new("username");
const FIRST_NAME: FieldName = FieldName::new("first_name");

/// Documented contract of every users operation.
#[must_use]
pub fn routes() -> [RouteDeclaration; 2] {
    [
        RouteDeclaration::get(USER_PATH)
            .status(FETCH_STATUS)
            .response(USER_SCHEMA)
            .errors(&[
                ErrorKind::UserNotFound,
                ErrorKind::UserDisabled,
                ErrorKind::UserInactive,
            ])
            .auth(true),
        RouteDeclaration::post(USERS_PATH)
            .status(CREATE_STATUS)
            .response(USER_SCHEMA)
            .auth(true),
    ]
}

/// Body of `POST /api/users/`.
///
/// Accepts `firstName` or `first_name`; surrounding whitespace is stripped
/// before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Requested login name.
    pub username: Username,
    /// Given name; may be empty.
    pub first_name: FirstName,
}

impl InputSchema for CreateUserRequest {
    fn from_payload(reader: &mut PayloadReader) -> Option<Self> {
        let username = reader
            .required::<String>(USERNAME)
            .and_then(|raw| reader.check(USERNAME, Username::new(raw)));
        let first_name = reader
            .required::<String>(FIRST_NAME)
            .and_then(|raw| reader.check(FIRST_NAME, FirstName::new(raw)));
        Some(Self {
            username: username?,
            first_name: first_name?,
        })
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self::new(request.username, request.first_name)
    }
}

fn map_persistence_error(err: UserPersistenceError) -> ApiError {
    match err {
        UserPersistenceError::DuplicateUsername { .. } => {
            ValidationFailure::single([USERNAME.as_str()], DUPLICATE_USERNAME_MESSAGE).into()
        }
        unavailable @ UserPersistenceError::Unavailable { .. } => {
            ApiError::internal(unavailable.to_string())
        }
    }
}

/// Fetch a single user.
///
/// Unknown and non-positive identifiers both answer `USER_NOT_FOUND`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::get_user_by_id;
///
/// let app = App::new().service(get_user_by_id);
/// ```
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/users/{user_id}/")]
pub async fn get_user_by_id(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<SchemaJson<UserSchema>> {
    let not_found = || DeclaredError::from(ErrorKind::UserNotFound);
    let id = UserId::new(path.into_inner()).map_err(|_| not_found())?;
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(map_persistence_error)?
        .ok_or_else(not_found)?;
    Ok(SchemaJson::with_status(
        FETCH_STATUS,
        UserSchema::from_model(&user),
    ))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users/",
    request_body = crate::inbound::http::schemas::CreateUserSchema,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users/")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: SchemaPayload<CreateUserRequest>,
) -> ApiResult<SchemaJson<UserSchema>> {
    let user = state
        .users
        .create(payload.into_inner().into())
        .await
        .map_err(map_persistence_error)?;
    info!(user_id = %user.id(), username = %user.username(), "user created");
    Ok(SchemaJson::with_status(
        CREATE_STATUS,
        UserSchema::from_model(&user),
    ))
}
