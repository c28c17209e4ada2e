//! Router tests for behaviour decided before any database access:
//! public endpoints, authentication, capability checks and validation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use ridgeline_api::{AppState, create_router};
use ridgeline_core::mobile;
use ridgeline_core::notify::WebhookDispatcher;
use ridgeline_shared::config::MobileConfig;
use ridgeline_shared::{JwtConfig, JwtService};
use rstest::rstest;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "router-test-secret";

fn jwt() -> JwtService {
    JwtService::new(JwtConfig {
        secret: SECRET.to_string(),
        access_token_expires_minutes: 15,
    })
}

fn state() -> AppState {
    AppState {
        db: Arc::new(DatabaseConnection::default()),
        jwt_service: Arc::new(jwt()),
        webhooks: WebhookDispatcher::disabled(),
        match_tolerance: dec!(5),
        mobile: Arc::new(mobile::resolve(&MobileConfig::default())),
    }
}

fn token(role: &str) -> String {
    jwt()
        .issue(Uuid::new_v4(), "Router Test", role)
        .unwrap()
}

async fn send(
    method: Method,
    uri: &str,
    role: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token(role)));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = create_router(state()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_is_public() {
    let (status, body) = send(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let (status, body) = send(Method::GET, "/api/v1/health/ready", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}

#[tokio::test]
async fn test_mobile_config_is_public_with_defaults() {
    let (status, body) = send(Method::GET, "/api/v1/mobile/config", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["minimumVersions"]["ios"], mobile::DEFAULT_MIN_VERSION);
    assert_eq!(body["storeUrls"]["android"], mobile::DEFAULT_ANDROID_STORE_URL);
    assert_eq!(body["featureFlags"]["offlineMode"], true);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (status, body) = send(Method::GET, "/api/v1/me/access", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "MISSING_TOKEN");
}

#[tokio::test]
async fn test_bad_signature_is_unauthorized() {
    let foreign = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        access_token_expires_minutes: 15,
    })
    .issue(Uuid::new_v4(), "Mallory", "SUPER_ADMIN")
    .unwrap();

    let request = Request::builder()
        .uri("/api/v1/me/access")
        .header(header::AUTHORIZATION, format!("Bearer {foreign}"))
        .body(Body::empty())
        .unwrap();
    let response = create_router(state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_access_resolves_role() {
    let (status, body) = send(Method::GET, "/api/v1/me/access", Some("storekeeper"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group"], "OPERATIONAL");
    assert_eq!(body["capabilities"]["canReceiveGoods"], true);
    assert_eq!(body["capabilities"]["canProcessPayments"], false);
    let modules = body["visibleModules"].as_array().unwrap();
    assert!(modules.iter().any(|m| m == "INVENTORY"));
}

#[tokio::test]
async fn test_unknown_role_gets_base_access() {
    let (status, body) = send(Method::GET, "/api/v1/me/access", Some("INTERN"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group"], "UNKNOWN");
    assert_eq!(body["visibleModules"].as_array().unwrap().len(), 3);
    assert_eq!(body["capabilities"]["canReportIncidents"], true);
}

#[rstest]
#[case(Method::POST, "/api/v1/procurement/invoices/{id}/match", "EMPLOYEE", "canProcessPayments")]
#[case(Method::GET, "/api/v1/procurement/metrics", "STOREKEEPER", "canViewFinancials")]
#[case(Method::POST, "/api/v1/documents/{id}/ocr", "EMPLOYEE", "canManageDocuments")]
#[case(Method::POST, "/api/v1/safety/incidents/{id}/close", "EMPLOYEE", "canInvestigateIncidents")]
#[tokio::test]
async fn test_missing_capability_is_forbidden(
    #[case] method: Method,
    #[case] path: &str,
    #[case] role: &str,
    #[case] capability: &str,
) {
    let uri = path.replace("{id}", &Uuid::new_v4().to_string());
    let (status, body) = send(method, &uri, Some(role), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "MISSING_CAPABILITY");
    assert!(body["message"].as_str().unwrap().contains(capability));
}

#[tokio::test]
async fn test_tolerance_out_of_range_is_validation_error() {
    let uri = format!("/api/v1/procurement/invoices/{}/match", Uuid::new_v4());
    let (status, body) = send(
        Method::POST,
        &uri,
        Some("ACCOUNTANT"),
        Some(serde_json::json!({ "tolerancePercent": 150 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], "tolerancePercent");
}

#[tokio::test]
async fn test_short_rejection_reason_is_validation_error() {
    let uri = format!("/api/v1/approvals/expenses/{}/reject", Uuid::new_v4());
    let (status, body) = send(
        Method::POST,
        &uri,
        Some("ACCOUNTANT"),
        Some(serde_json::json!({ "reason": "no" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "reason");
    assert_eq!(body["details"][0]["code"], "min_length");
}

#[tokio::test]
async fn test_unknown_approval_kind_is_not_found() {
    let uri = format!("/api/v1/approvals/timesheets/{}/approve", Uuid::new_v4());
    let (status, body) = send(Method::POST, &uri, Some("SUPER_ADMIN"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "UNKNOWN_APPROVAL_KIND");
}

#[rstest]
#[case("/api/v1/tasks?pageSize=500", "pageSize")]
#[case("/api/v1/tasks?page=0", "page")]
#[case("/api/v1/tasks?status=SLEEPING", "status")]
#[case("/api/v1/approvals?type=TIMESHEET", "type")]
#[tokio::test]
async fn test_invalid_list_params(#[case] uri: &str, #[case] field: &str) {
    let (status, body) = send(Method::GET, uri, Some("EMPLOYEE"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], field);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/tasks")
        .header(header::AUTHORIZATION, format!("Bearer {}", token("EMPLOYEE")))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = create_router(state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
