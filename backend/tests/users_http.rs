//! HTTP scenarios for the users resource over the in-memory store.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};
use support::{app, send};
use users_api::inbound::http::schema::{AliasPolicy, SchemaConfig};

fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri)
}

fn post_users(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/api/users/").set_json(body)
}

#[rstest]
#[actix_rt::test]
async fn missing_user_yields_not_found_envelope() {
    let app = test::init_service(app(SchemaConfig::default())).await;

    let (status, body) = send(&app, get("/api/users/42/").to_request()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"status": 404, "error": {"code": "USER_NOT_FOUND", "details": {"message": "NOT FOUND"}}})
    );
}

#[rstest]
#[actix_rt::test]
async fn created_user_can_be_fetched() {
    let app = test::init_service(app(SchemaConfig::default())).await;

    let (status, created) = send(
        &app,
        post_users(json!({"username": "joan", "firstName": "Joan"})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("numeric id");
    assert_eq!(created, json!({"id": id, "username": "joan", "firstName": "Joan"}));

    let (status, fetched) = send(&app, get(&format!("/api/users/{id}/")).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[rstest]
#[actix_rt::test]
async fn missing_username_fails_validation() {
    let app = test::init_service(app(SchemaConfig::default())).await;

    let (status, body) = send(&app, post_users(json!({"firstName": "Joan"})).to_request()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let details = body["error"]["details"].as_array().expect("details list");
    assert_eq!(details.len(), 1);
    assert_eq!(details.first().expect("one detail")["field"], "username");
}

#[rstest]
#[actix_rt::test]
async fn body_fields_are_reported_with_query_location() {
    let app = test::init_service(app(SchemaConfig::default())).await;

    let (_, body) = send(&app, post_users(json!({})).to_request()).await;

    let details = body["error"]["details"].as_array().expect("details list");
    assert_eq!(details.len(), 2);
    assert!(details.iter().all(|detail| detail["location"] == "query"));
}

#[rstest]
#[actix_rt::test]
async fn second_user_with_same_username_is_rejected() {
    let app = test::init_service(app(SchemaConfig::default())).await;
    let payload = json!({"username": "joan", "firstName": "Joan"});

    let (first, _) = send(&app, post_users(payload.clone()).to_request()).await;
    let (second, body) = send(&app, post_users(payload).to_request()).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "username");
}

#[rstest]
#[case("not json")]
#[case("[1, 2]")]
#[actix_rt::test]
async fn malformed_bodies_are_reported_against_body(#[case] raw: &str) {
    let app = test::init_service(app(SchemaConfig::default())).await;
    let request = test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(("content-type", "application/json"))
        .set_payload(raw.to_owned());

    let (status, body) = send(&app, request.to_request()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "body");
}

#[rstest]
#[actix_rt::test]
async fn identity_aliasing_keeps_field_names() {
    let schema = SchemaConfig {
        alias: AliasPolicy::Identity,
        strip_whitespace: true,
    };
    let app = test::init_service(app(schema)).await;

    let (status, body) = send(
        &app,
        post_users(json!({"username": "ada", "first_name": " Ada "})).to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["first_name"], "Ada");
    assert!(body.get("firstName").is_none());
}
