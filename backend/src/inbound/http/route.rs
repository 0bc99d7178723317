//! Route declarations: the documented contract of each operation.
//!
//! A declaration names the method and path of an operation, its success
//! status and response schema, the declarative errors it may raise and
//! whether it sits behind authentication. The catalogue of declarations is
//! merged into the OpenAPI document after utoipa has generated it.

use actix_web::http::StatusCode;
use tracing::warn;
use utoipa::openapi::path::{Operation, PathItem};
use utoipa::openapi::{ContentBuilder, OpenApi, Ref, RefOr, Response, ResponseBuilder};

use crate::domain::ErrorKind;
use crate::inbound::http::examples::{ExampleSet, generate_examples};

const JSON_CONTENT_TYPE: &str = "application/json";
const DEFAULT_SUCCESS: &str = "200";

/// HTTP method of a declared operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl RouteMethod {
    const fn operation_mut(self, item: &mut PathItem) -> Option<&mut Operation> {
        match self {
            Self::Get => item.get.as_mut(),
            Self::Post => item.post.as_mut(),
            Self::Put => item.put.as_mut(),
            Self::Patch => item.patch.as_mut(),
            Self::Delete => item.delete.as_mut(),
        }
    }
}

/// Extra OpenAPI data attached to one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiExtra {
    /// Status the success response is documented under.
    pub success_status: StatusCode,
    /// Component schema of the success response, by name.
    pub success_schema: Option<&'static str>,
    /// Example error responses.
    pub responses: ExampleSet,
}

impl OpenApiExtra {
    /// Merge into `operation`.
    ///
    /// The success response is filed under the declared status. Without a
    /// declared schema, a response generated under `200` moves there unless
    /// the status is already documented. Example responses replace whatever
    /// was declared for the same status.
    pub fn apply(&self, operation: &mut Operation) {
        let documented = &mut operation.responses.responses;
        let success_key = self.success_status.as_u16().to_string();
        let declared = self
            .success_schema
            .map(|schema| RefOr::T(success_response(self.success_status, schema)));
        let success = declared.or_else(|| {
            if documented.contains_key(&success_key) {
                None
            } else {
                documented.remove(DEFAULT_SUCCESS)
            }
        });
        if let Some(response) = success {
            documented.insert(success_key, response);
        }
        for (status, example) in self.responses.responses() {
            documented.insert(status.to_string(), RefOr::T(example));
        }
    }
}

fn success_response(status: StatusCode, schema: &str) -> Response {
    let content = ContentBuilder::new()
        .schema(Some(Ref::from_schema_name(schema)))
        .build();
    ResponseBuilder::new()
        .description(status.canonical_reason().unwrap_or("Success"))
        .content(JSON_CONTENT_TYPE, content)
        .build()
}

/// Documented contract of one operation.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use users_api::domain::ErrorKind;
/// use users_api::inbound::http::route::RouteDeclaration;
///
/// let route = RouteDeclaration::post("/api/users/")
///     .status(StatusCode::CREATED)
///     .response("User")
///     .errors(&[ErrorKind::UserDisabled])
///     .auth(true);
/// let extra = route.openapi_extra();
/// assert_eq!(extra.success_status, StatusCode::CREATED);
/// assert_eq!(extra.success_schema, Some("User"));
/// assert!(extra.responses.example(400, "USER_DISABLE").is_some());
/// assert!(extra.responses.example(401, "LOGIN_BAD_CREDENTIALS").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDeclaration {
    method: RouteMethod,
    path: &'static str,
    status: StatusCode,
    response: Option<&'static str>,
    errors: Vec<ErrorKind>,
    auth: bool,
}

impl RouteDeclaration {
    const fn new(method: RouteMethod, path: &'static str) -> Self {
        Self {
            method,
            path,
            status: StatusCode::OK,
            response: None,
            errors: Vec::new(),
            auth: false,
        }
    }

    /// Declare a `GET` operation.
    #[must_use]
    pub const fn get(path: &'static str) -> Self {
        Self::new(RouteMethod::Get, path)
    }

    /// Declare a `POST` operation.
    #[must_use]
    pub const fn post(path: &'static str) -> Self {
        Self::new(RouteMethod::Post, path)
    }

    /// Declare a `PUT` operation.
    #[must_use]
    pub const fn put(path: &'static str) -> Self {
        Self::new(RouteMethod::Put, path)
    }

    /// Declare a `PATCH` operation.
    #[must_use]
    pub const fn patch(path: &'static str) -> Self {
        Self::new(RouteMethod::Patch, path)
    }

    /// Declare a `DELETE` operation.
    #[must_use]
    pub const fn delete(path: &'static str) -> Self {
        Self::new(RouteMethod::Delete, path)
    }

    /// Success status; `200 OK` unless set.
    #[must_use]
    pub const fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Component schema returned on success, by name.
    #[must_use]
    pub const fn response(mut self, schema: &'static str) -> Self {
        self.response = Some(schema);
        self
    }

    /// Declarative errors the operation may raise.
    #[must_use]
    pub fn errors(mut self, errors: &[ErrorKind]) -> Self {
        self.errors = errors.to_vec();
        self
    }

    /// Whether the operation sits behind authentication.
    #[must_use]
    pub const fn auth(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }

    /// Declared HTTP method.
    #[must_use]
    pub const fn method(&self) -> RouteMethod {
        self.method
    }

    /// Path as it appears in the OpenAPI document.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Status of the success response.
    #[must_use]
    pub const fn success_status(&self) -> StatusCode {
        self.status
    }

    /// Name of the success response schema, if declared.
    #[must_use]
    pub const fn response_schema(&self) -> Option<&'static str> {
        self.response
    }

    /// Declarative errors in declaration order.
    #[must_use]
    pub fn declared_errors(&self) -> &[ErrorKind] {
        &self.errors
    }

    /// Whether authentication failures are documented.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.auth
    }

    /// Success and example responses for this operation.
    #[must_use]
    pub fn openapi_extra(&self) -> OpenApiExtra {
        OpenApiExtra {
            success_status: self.status,
            success_schema: self.response,
            responses: generate_examples(&self.errors, self.auth),
        }
    }
}

/// Every declared operation of the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteCatalogue {
    routes: Vec<RouteDeclaration>,
}

impl RouteCatalogue {
    /// Add declarations in order.
    #[must_use]
    pub fn with(mut self, routes: impl IntoIterator<Item = RouteDeclaration>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Declarations in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteDeclaration> {
        self.routes.iter()
    }

    /// Merge every declaration's responses into `openapi`.
    ///
    /// Declarations without a matching path and method are skipped.
    pub fn apply(&self, openapi: &mut OpenApi) {
        for route in &self.routes {
            let target = openapi
                .paths
                .paths
                .get_mut(route.path)
                .and_then(|item| route.method.operation_mut(item));
            let Some(operation) = target else {
                warn!(
                    path = route.path,
                    method = ?route.method,
                    "declared route missing from OpenAPI document"
                );
                continue;
            };
            route.openapi_extra().apply(operation);
        }
    }
}
