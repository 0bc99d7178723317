//! Error examples carried by the generated OpenAPI document.

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use users_api::ApiDoc;
use utoipa::OpenApi;

#[fixture]
fn document() -> Value {
    let json = ApiDoc::openapi().to_json().expect("document renders");
    serde_json::from_str(&json).expect("document parses")
}

fn examples<'a>(doc: &'a Value, path: &str, method: &str, status: &str) -> &'a Value {
    &doc["paths"][path][method]["responses"][status]["content"]["application/json"]["examples"]
}

#[rstest]
#[case("404", "USER_NOT_FOUND", "NOT FOUND")]
#[case("400", "USER_DISABLE", "User have disabled status")]
#[case("400", "USER_INACTIVE", "User have inactive status")]
#[case("403", "UNAUTHORIZED", "Credentials were not provided.")]
#[case("401", "LOGIN_BAD_CREDENTIALS", "Invalid credentials.")]
fn get_user_documents_declared_errors(
    document: Value,
    #[case] status: &str,
    #[case] code: &str,
    #[case] message: &str,
) {
    let example = &examples(&document, "/api/users/{user_id}/", "get", status)[code];
    assert_eq!(example["summary"], code);
    assert_eq!(example["value"]["status"].to_string(), status);
    assert_eq!(
        example["value"]["error"],
        json!({"code": code, "details": {"field": "string", "message": message}})
    );
}

#[rstest]
#[case("/api/users/{user_id}/", "get")]
#[case("/api/users/", "post")]
fn every_operation_documents_validation_failures(
    document: Value,
    #[case] path: &str,
    #[case] method: &str,
) {
    let example = &examples(&document, path, method, "422")["VALIDATION_ERROR"];
    assert_eq!(
        example["value"],
        json!({
            "status": 422,
            "error": {
                "code": "VALIDATION_ERROR",
                "details": [{"location": "string", "field": "string", "field_full": "string", "message": "string"}]
            }
        })
    );
}

#[rstest]
fn create_user_documents_only_auth_and_validation_errors(document: Value) {
    let responses = document["paths"]["/api/users/"]["post"]["responses"]
        .as_object()
        .expect("responses object");
    let mut statuses: Vec<&str> = responses.keys().map(String::as_str).collect();
    statuses.sort_unstable();
    assert_eq!(statuses, ["201", "401", "403", "422", "500"]);
}

#[rstest]
fn error_responses_reference_the_envelope_schema(document: Value) {
    let schema = &document["paths"]["/api/users/{user_id}/"]["get"]["responses"]["404"]["content"]
        ["application/json"]["schema"];
    assert_eq!(schema["$ref"], "#/components/schemas/ErrorEnvelope");
}

#[rstest]
#[case("/api/users/{user_id}/", "get", "200", "OK")]
#[case("/api/users/", "post", "201", "Created")]
fn success_responses_sit_under_the_declared_status(
    document: Value,
    #[case] path: &str,
    #[case] method: &str,
    #[case] status: &str,
    #[case] description: &str,
) {
    let response = &document["paths"][path][method]["responses"][status];
    assert_eq!(response["description"], description);
    assert_eq!(
        response["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/User"
    );
}
