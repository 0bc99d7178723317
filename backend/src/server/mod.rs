//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use users_api::ApiDoc;
use users_api::Trace;
use users_api::inbound::http::configure;
use users_api::inbound::http::schema::SchemaConfig;
use users_api::inbound::http::state::HttpState;

const DOCS_PATH: &str = "/docs/{_:.*}";
const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(Clone)]
struct AppDependencies {
    http_state: HttpState,
    schema: SchemaConfig,
    openapi: Option<utoipa::openapi::OpenApi>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        schema,
        openapi,
    } = deps;

    let app = App::new()
        .wrap(Trace)
        .configure(configure(http_state, schema));

    let Some(document) = openapi else {
        return app;
    };
    app.service(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, document))
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        schema,
        docs_enabled,
        users,
    } = config;
    let deps = AppDependencies {
        http_state: HttpState::new(users),
        schema,
        openapi: docs_enabled.then(ApiDoc::openapi),
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, docs_enabled, "server listening");
    Ok(server)
}
