//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod envelope;
pub mod error;
pub mod examples;
pub mod route;
pub mod schema;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::{ApiError, ApiResult};

use self::route::RouteCatalogue;
use self::schema::SchemaConfig;
use self::state::HttpState;

/// Every documented operation, merged into the OpenAPI document.
#[must_use]
pub fn route_catalogue() -> RouteCatalogue {
    RouteCatalogue::default().with(users::routes())
}

/// Register state, extractor configuration and the `/api` scope.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use users_api::inbound::http::configure;
/// use users_api::inbound::http::schema::SchemaConfig;
/// use users_api::inbound::http::state::HttpState;
/// use users_api::outbound::persistence::InMemoryUserRepository;
///
/// let state = HttpState::new(Arc::new(InMemoryUserRepository::new()));
/// let _app = App::new().configure(configure(state, SchemaConfig::default()));
/// ```
#[must_use]
pub fn configure(state: HttpState, schema: SchemaConfig) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::Data::new(schema))
            .app_data(error::path_config())
            .service(
                web::scope("/api")
                    .service(users::get_user_by_id)
                    .service(users::create_user),
            );
    }
}
