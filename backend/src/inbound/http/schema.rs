//! Schema boundary: key aliasing, input decoding and output encoding.
//!
//! Handlers work with snake_case Rust types. The [`SchemaConfig`] registered
//! as application data decides how those types look on the wire: output keys
//! are renamed to the alias case on the way out, and incoming keys are
//! accepted under either the alias or the field name on the way in.
//!
//! ```text
//! UserSchema { first_name } --encode--> {"firstName": ...}
//! {"firstName": ...} or {"first_name": ...} --decode--> PayloadReader("first_name")
//! ```

use actix_web::body::BoxBody;
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, Responder, web};
use convert_case::{Boundary, Case, Casing};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::inbound::http::error::ApiError;
use crate::inbound::http::validation::{PayloadReader, ValidationFailure};

/// Naming convention applied to object keys at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasPolicy {
    /// Keys are left as the Rust field names.
    Identity,
    /// Keys are exposed in camelCase.
    #[default]
    CamelCase,
}

/// Serialisation settings applied by [`SchemaJson`] and [`SchemaPayload`].
///
/// Keys split into words at underscores and lower-to-upper transitions only,
/// so `address_line1` and `addressLine1` map onto each other. A digit opening
/// a word does not survive the trip: `line_1` encodes to `line1`.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use users_api::inbound::http::schema::SchemaConfig;
///
/// let config = SchemaConfig::default();
/// let decoded = config.decode(json!({"firstName": "  Joan "}));
/// assert_eq!(decoded, json!({"first_name": "Joan"}));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Key naming on the wire.
    pub alias: AliasPolicy,
    /// Strip surrounding whitespace from incoming strings.
    pub strip_whitespace: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            alias: AliasPolicy::CamelCase,
            strip_whitespace: true,
        }
    }
}

impl SchemaConfig {
    /// Serialise `body` and rename its keys to the alias case.
    ///
    /// # Errors
    /// Returns the serialiser error when `body` cannot be represented as JSON.
    pub fn encode<T: Serialize>(&self, body: &T) -> Result<Value, serde_json::Error> {
        let value = serde_json::to_value(body)?;
        Ok(match self.alias {
            AliasPolicy::Identity => value,
            AliasPolicy::CamelCase => rename_keys(value, KeyCase::Camel, false),
        })
    }

    /// Normalise an incoming payload so it can be read by field name.
    #[must_use]
    pub fn decode(&self, value: Value) -> Value {
        match self.alias {
            AliasPolicy::Identity if !self.strip_whitespace => value,
            AliasPolicy::Identity => strip_strings(value),
            AliasPolicy::CamelCase => rename_keys(value, KeyCase::Snake, self.strip_whitespace),
        }
    }

    fn from_app_data(req: &HttpRequest) -> Self {
        req.app_data::<web::Data<Self>>()
            .map_or_else(Self::default, |config| *config.get_ref())
    }
}

const WORD_BOUNDARIES: [Boundary; 3] = [
    Boundary::UNDERSCORE,
    Boundary::LOWER_UPPER,
    Boundary::ACRONYM,
];

#[derive(Debug, Clone, Copy)]
enum KeyCase {
    Camel,
    Snake,
}

impl KeyCase {
    fn apply(self, key: &str) -> String {
        let words = key.with_boundaries(&WORD_BOUNDARIES);
        match self {
            Self::Camel => words.to_case(Case::Camel),
            Self::Snake => words.to_case(Case::Snake),
        }
    }
}

fn rename_keys(value: Value, case: KeyCase, strip: bool) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (case.apply(&key), rename_keys(inner, case, strip)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|inner| rename_keys(inner, case, strip))
                .collect(),
        ),
        Value::String(text) if strip => Value::String(text.trim().to_owned()),
        other => other,
    }
}

fn strip_strings(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key, strip_strings(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_strings).collect()),
        Value::String(text) => Value::String(text.trim().to_owned()),
        other => other,
    }
}

/// Response representation built from a domain model.
///
/// `compute` and `adjust` are explicit post-construction transforms: the
/// first always runs after [`OutputSchema::build`], the second only when a
/// caller supplies a context.
pub trait OutputSchema: Serialize + Sized {
    /// Domain model the schema is built from.
    type Model;
    /// Caller-supplied data consumed by [`OutputSchema::adjust`].
    type Context;

    /// Copy the model's fields into the schema.
    fn build(model: &Self::Model) -> Self;

    /// Fill derived fields.
    #[must_use]
    fn compute(self) -> Self {
        self
    }

    /// Tailor the schema to the caller's context.
    #[must_use]
    fn adjust(self, _context: &Self::Context) -> Self {
        self
    }

    /// Build and compute.
    fn from_model(model: &Self::Model) -> Self {
        Self::build(model).compute()
    }

    /// Build, compute and adjust.
    fn from_model_adjusted(model: &Self::Model, context: &Self::Context) -> Self {
        Self::from_model(model).adjust(context)
    }

    /// Convert every model in order.
    fn from_list(models: &[Self::Model]) -> Vec<Self> {
        models.iter().map(Self::from_model).collect()
    }

    /// Convert and adjust every model in order.
    fn from_list_adjusted(models: &[Self::Model], context: &Self::Context) -> Vec<Self> {
        models
            .iter()
            .map(|model| Self::from_model_adjusted(model, context))
            .collect()
    }
}

/// Request body read field by field from a decoded payload.
pub trait InputSchema: Sized {
    /// Read every field, recording failures on `reader`.
    ///
    /// Implementations read all fields before combining them so each failing
    /// field is reported.
    fn from_payload(reader: &mut PayloadReader) -> Option<Self>;
}

/// Responder encoding its body through the registered [`SchemaConfig`].
#[derive(Debug)]
pub struct SchemaJson<T> {
    status: StatusCode,
    body: T,
}

impl<T> SchemaJson<T> {
    /// Respond with an explicit status.
    #[must_use]
    pub const fn with_status(status: StatusCode, body: T) -> Self {
        Self { status, body }
    }

    /// `200 OK` response.
    #[must_use]
    pub const fn ok(body: T) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    /// `201 Created` response.
    #[must_use]
    pub const fn created(body: T) -> Self {
        Self::with_status(StatusCode::CREATED, body)
    }

    /// Response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Unencoded body.
    #[must_use]
    pub const fn body(&self) -> &T {
        &self.body
    }
}

impl<T: Serialize> Responder for SchemaJson<T> {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        SchemaConfig::from_app_data(req)
            .encode(&self.body)
            .map_or_else(
                |err| {
                    error!(error = %err, "response body failed to serialise");
                    HttpResponse::InternalServerError().finish()
                },
                |value| HttpResponse::build(self.status).json(value),
            )
    }
}

/// Extractor decoding a JSON object body into an [`InputSchema`].
///
/// Malformed bodies and field failures are both reported as validation
/// failures.
#[derive(Debug)]
pub struct SchemaPayload<T>(pub T);

impl<T> SchemaPayload<T> {
    /// Unwrap the decoded body.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Locator used for failures that concern the body as a whole.
const BODY_LOCATOR: &str = "body";

impl<T: InputSchema + 'static> FromRequest for SchemaPayload<T> {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let config = SchemaConfig::from_app_data(req);
        let body = web::Json::<Value>::from_request(req, payload);
        Box::pin(async move {
            let web::Json(raw) = body
                .await
                .map_err(|err| ValidationFailure::single([BODY_LOCATOR], err.to_string()))?;
            let Value::Object(fields) = config.decode(raw) else {
                return Err(
                    ValidationFailure::single([BODY_LOCATOR], "Input should be a valid object")
                        .into(),
                );
            };
            let mut reader = PayloadReader::new(fields);
            let parsed = T::from_payload(&mut reader);
            Ok(Self(reader.into_result(parsed)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::validation::FieldName;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, Serialize)]
    struct Profile {
        display_name: String,
        badge_count: u32,
        tags: Vec<Tag>,
    }

    #[derive(Debug, Serialize)]
    struct Tag {
        tag_name: String,
    }

    #[derive(Debug, Serialize)]
    struct Greeting {
        user_name: String,
        greeting: String,
    }

    impl OutputSchema for Greeting {
        type Model = String;
        type Context = String;

        fn build(model: &String) -> Self {
            Self {
                user_name: model.clone(),
                greeting: String::new(),
            }
        }

        fn compute(mut self) -> Self {
            self.greeting = format!("hello {}", self.user_name);
            self
        }

        fn adjust(mut self, context: &String) -> Self {
            self.greeting = format!("{} {context}", self.greeting);
            self
        }
    }

    #[derive(Debug)]
    struct Signup {
        user_name: String,
    }

    const USER_NAME: FieldName = FieldName::new("user_name");

    impl InputSchema for Signup {
        fn from_payload(reader: &mut PayloadReader) -> Option<Self> {
            let user_name = reader.required::<String>(USER_NAME);
            Some(Self {
                user_name: user_name?,
            })
        }
    }

    fn profile() -> Profile {
        Profile {
            display_name: "Ada".to_owned(),
            badge_count: 2,
            tags: vec![Tag {
                tag_name: "x".to_owned(),
            }],
        }
    }

    #[rstest]
    fn camel_case_encoding_renames_nested_keys() {
        let value = SchemaConfig::default().encode(&profile()).expect("encodes");
        assert_eq!(
            value,
            json!({"displayName": "Ada", "badgeCount": 2, "tags": [{"tagName": "x"}]})
        );
    }

    #[rstest]
    fn identity_encoding_keeps_field_names() {
        let config = SchemaConfig {
            alias: AliasPolicy::Identity,
            strip_whitespace: false,
        };
        let value = config.encode(&profile()).expect("encodes");
        assert_eq!(value["display_name"], json!("Ada"));
    }

    #[rstest]
    #[case(json!({"firstName": " Joan "}))]
    #[case(json!({"first_name": "Joan"}))]
    fn decoding_accepts_alias_and_field_name(#[case] payload: Value) {
        let decoded = SchemaConfig::default().decode(payload);
        assert_eq!(decoded, json!({"first_name": "Joan"}));
    }

    #[derive(Debug, Serialize)]
    struct Address {
        address_line1: String,
        postcode_2fa: String,
    }

    #[rstest]
    fn keys_with_digits_survive_the_round_trip() {
        let config = SchemaConfig::default();
        let encoded = config
            .encode(&Address {
                address_line1: "1 Main St".to_owned(),
                postcode_2fa: "x".to_owned(),
            })
            .expect("encodes");
        assert_eq!(
            encoded,
            json!({"addressLine1": "1 Main St", "postcode2fa": "x"})
        );
        assert_eq!(
            config.decode(encoded),
            json!({"address_line1": "1 Main St", "postcode2fa": "x"})
        );
    }

    #[rstest]
    fn already_camel_keys_are_kept_on_encode() {
        let value = SchemaConfig::default()
            .encode(&json!({"firstName": "Joan", "userID": 1}))
            .expect("encodes");
        assert_eq!(value, json!({"firstName": "Joan", "userId": 1}));
    }

    #[rstest]
    fn decoding_can_keep_whitespace() {
        let config = SchemaConfig {
            alias: AliasPolicy::CamelCase,
            strip_whitespace: false,
        };
        assert_eq!(config.decode(json!({"a": " b "})), json!({"a": " b "}));
    }

    #[rstest]
    fn identity_decoding_still_strips_strings() {
        let config = SchemaConfig {
            alias: AliasPolicy::Identity,
            strip_whitespace: true,
        };
        assert_eq!(
            config.decode(json!({"firstName": [" b "]})),
            json!({"firstName": ["b"]})
        );
    }

    #[rstest]
    fn output_schema_runs_transforms_in_order() {
        let models = vec!["ada".to_owned(), "joan".to_owned()];
        let plain = Greeting::from_list(&models);
        assert_eq!(plain.first().map(|g| g.greeting.as_str()), Some("hello ada"));

        let adjusted = Greeting::from_list_adjusted(&models, &"!".to_owned());
        assert_eq!(
            adjusted.get(1).map(|g| g.greeting.as_str()),
            Some("hello joan !")
        );
    }

    async fn echo(payload: SchemaPayload<Signup>) -> SchemaJson<Greeting> {
        SchemaJson::created(Greeting::from_model(&payload.into_inner().user_name))
    }

    #[actix_web::test]
    async fn payload_and_responder_apply_config_at_the_boundary() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(SchemaConfig::default()))
                .route("/", web::post().to(echo)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/")
            .set_json(json!({"userName": "  ada "}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({"userName": "ada", "greeting": "hello ada"}));
    }

    #[actix_web::test]
    async fn non_object_bodies_are_validation_failures() {
        let app = actix_test::init_service(App::new().route("/", web::post().to(echo))).await;
        let request = actix_test::TestRequest::post()
            .uri("/")
            .set_json(json!(["not", "an", "object"]))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"]["details"][0]["field"], json!("body"));
    }
}
