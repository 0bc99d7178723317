//! Shared helpers for HTTP integration tests.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::Value;
use users_api::Trace;
use users_api::inbound::http::configure;
use users_api::inbound::http::schema::SchemaConfig;
use users_api::inbound::http::state::HttpState;
use users_api::outbound::persistence::InMemoryUserRepository;

/// The API over an empty in-memory store.
pub fn app(
    schema: SchemaConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(InMemoryUserRepository::new()));
    App::new().wrap(Trace).configure(configure(state, schema))
}

/// Send `request` and decode the JSON body; empty bodies decode to `null`.
pub async fn send<S, R, B>(app: &S, request: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let body = test::read_body(response).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}
