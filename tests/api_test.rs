//! Integration tests for the API surface.
//!
//! These tests exercise response envelopes, error mapping and the
//! request/response contract without requiring a database connection.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use user_admin_api::config::{Config, MSG_NO_SELF_DELETE, MSG_USER_CREATED};
use user_admin_api::domain::{User, UserForm};
use user_admin_api::errors::{AppError, FieldErrors};
use user_admin_api::services::tokens::{issue_action_token, verify_action_token, TokenPurpose};
use user_admin_api::types::{ApiResponse, Created};

fn test_config() -> Config {
    std::env::set_var("JWT_SECRET", "test-secret-key-for-testing-only-32chars");
    Config::from_env()
}

fn sample_user(id: Uuid) -> User {
    User {
        id,
        first_name: "Jan".to_string(),
        name_prefix: Some("van".to_string()),
        last_name: "Dijk".to_string(),
        email: "j.van.dijk@hz.nl".to_string(),
        phone_number: None,
        address: "Edisonweg 4".to_string(),
        zip_code: "4382 NW".to_string(),
        city: "Vlissingen".to_string(),
        account_type: "employee".to_string(),
        activated: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

async fn response_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Response Envelope Tests
// =============================================================================

#[tokio::test]
async fn test_api_response_structure() {
    let response: ApiResponse<String> = ApiResponse::success("test data".to_string());
    assert!(response.success);
    assert_eq!(response.data.unwrap(), "test data");
    assert!(response.message.is_none());
}

#[tokio::test]
async fn test_api_response_carries_flash_message() {
    let response: ApiResponse<i32> = ApiResponse::with_message(42, MSG_USER_CREATED);
    assert!(response.success);
    assert_eq!(response.data.unwrap(), 42);
    assert_eq!(response.message.unwrap(), "Gebruiker toegevoegd!");
}

#[tokio::test]
async fn test_message_only_response() {
    let response: ApiResponse<()> = ApiResponse::message("Gebruiker verwijderd!");
    assert!(response.success);
    assert!(response.data.is_none());
    assert_eq!(response.message.unwrap(), "Gebruiker verwijderd!");
}

#[tokio::test]
async fn test_created_wrapper_returns_201() {
    let created = Created(ApiResponse::success("nieuw"));
    let (status, body) = response_json(created.into_response()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], "nieuw");
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_validation_error_serializes_field_errors() {
    let mut fields = FieldErrors::new();
    fields.add("email", "voer een geldig hz.nl e-mailadres in.");
    fields.add("zip_code", "voer een geldige postcode in.");

    let (status, body) = response_json(AppError::Validation(fields).into_response()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["fields"]["email"][0],
        "voer een geldig hz.nl e-mailadres in."
    );
    assert_eq!(
        body["error"]["fields"]["zip_code"][0],
        "voer een geldige postcode in."
    );
}

#[tokio::test]
async fn test_self_modification_maps_to_forbidden() {
    let err = AppError::self_modification(MSG_NO_SELF_DELETE);
    let (status, body) = response_json(err.into_response()).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "SELF_MODIFICATION_DENIED");
    assert_eq!(
        body["error"]["message"],
        "Het is niet toegestaan jezelf te verwijderen."
    );
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let (status, body) = response_json(AppError::NotFound.into_response()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_unauthorized_maps_to_401() {
    let (status, body) = response_json(AppError::Unauthorized.into_response()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let err = AppError::internal("connection pool exhausted");
    let (status, body) = response_json(err.into_response()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "An internal error occurred");
}

// =============================================================================
// Form Contract Tests
// =============================================================================

#[test]
fn test_user_form_requires_activated_flag() {
    // `activated` has no serde default, so omitting it is a deserialization
    // error rather than an implicit false
    let json = r#"{
        "first_name": "Jan",
        "last_name": "Jansen",
        "email": "j.jansen@hz.nl",
        "address": "Edisonweg 4",
        "zip_code": "4382 NW",
        "city": "Vlissingen",
        "account_type": "student"
    }"#;

    assert!(serde_json::from_str::<UserForm>(json).is_err());
}

#[test]
fn test_user_form_accepts_optional_fields_absent() {
    let json = r#"{
        "first_name": "Jan",
        "last_name": "Jansen",
        "email": "j.jansen@hz.nl",
        "address": "Edisonweg 4",
        "zip_code": "4382 NW",
        "city": "Vlissingen",
        "account_type": "student",
        "activated": true
    }"#;

    let form: UserForm = serde_json::from_str(json).unwrap();
    assert!(form.name_prefix.is_none());
    assert!(form.phone_number.is_none());
}

#[test]
fn test_full_name_includes_prefix() {
    let user = sample_user(Uuid::new_v4());
    assert_eq!(user.full_name(), "Jan van Dijk");
}

// =============================================================================
// Action Token Tests
// =============================================================================

#[tokio::test]
async fn test_action_token_round_trip() {
    let config = test_config();
    let user_id = Uuid::new_v4();

    let token = issue_action_token(&config, user_id, "j.jansen@hz.nl", TokenPurpose::SetPassword)
        .unwrap();
    let claims = verify_action_token(&config, &token, TokenPurpose::SetPassword).unwrap();

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "j.jansen@hz.nl");
}

#[tokio::test]
async fn test_action_token_purpose_is_enforced() {
    let config = test_config();

    let token = issue_action_token(
        &config,
        Uuid::new_v4(),
        "j.jansen@hz.nl",
        TokenPurpose::VerifyEmail,
    )
    .unwrap();

    let result = verify_action_token(&config, &token, TokenPurpose::SetPassword);
    assert!(result.is_err());
}
