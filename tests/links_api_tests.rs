//! Links JSON API tests
//!
//! Full app wiring: bearer identity, envelope format, status mapping, health.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use snaplink::api::JwtService;
use snaplink::api::services::links::ErrorCode;
use snaplink::api::services::{AppStartTime, ShortUrlBase};
use snaplink::runtime::modes::build_app;
use snaplink::services::LinkService;
use snaplink::storage::SeaOrmStorage;
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

const SECRET: &str = "links_api_test_secret_0123456789";

struct TestEnv {
    storage: Arc<SeaOrmStorage>,
    service: Arc<LinkService>,
    _temp: TempDir,
}

async fn create_test_env() -> TestEnv {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp.path().join("links_api.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::connect(&db_url)
            .await
            .expect("Failed to create storage"),
    );
    let service = Arc::new(LinkService::new(storage.clone()));
    TestEnv {
        storage,
        service,
        _temp: temp,
    }
}

fn bearer(user: &str) -> (&'static str, String) {
    let token = JwtService::new(SECRET, 5).issue_token(user).unwrap();
    ("Authorization", format!("Bearer {}", token))
}

macro_rules! test_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.storage.clone()))
                .app_data(web::Data::new($env.service.clone()))
                .app_data(web::Data::new(JwtService::new(SECRET, 5)))
                .app_data(web::Data::new(ShortUrlBase::new("https://sl.test/")))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(build_app),
        )
        .await
    };
}

async fn body_json(resp: actix_web::dev::ServiceResponse) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response is not JSON")
}

// =============================================================================
// Create
// =============================================================================

#[actix_rt::test]
async fn test_create_link_returns_short_url() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(bearer("alice"))
        .set_json(json!({ "original_url": "https://example.com/a", "custom_code": "promo" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body_json(resp).await;
    assert_eq!(json["code"], ErrorCode::Success as i32);
    assert_eq!(json["data"]["short_code"], "promo");
    assert_eq!(json["data"]["short_url"], "https://sl.test/r/promo");

    let stored = env.storage.find_by_code("promo").await.unwrap().unwrap();
    assert_eq!(stored.owner_id.as_deref(), Some("alice"));
    assert_eq!(json["data"]["link_id"], stored.id);
}

#[actix_rt::test]
async fn test_anonymous_create_is_allowed() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/links")
        .set_json(json!({ "original_url": "https://example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body_json(resp).await;
    assert_eq!(json["data"]["short_code"].as_str().unwrap().len(), 6);
}

#[actix_rt::test]
async fn test_create_error_mapping() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let cases = [
        (
            json!({ "original_url": "not a url" }),
            StatusCode::BAD_REQUEST,
            ErrorCode::LinkInvalidUrl,
        ),
        (
            json!({ "original_url": "https://x.io", "custom_code": "a".repeat(33) }),
            StatusCode::BAD_REQUEST,
            ErrorCode::LinkCodeTooLong,
        ),
        (
            json!({ "original_url": "https://x.io", "custom_code": "no way" }),
            StatusCode::BAD_REQUEST,
            ErrorCode::LinkInvalidCode,
        ),
    ];

    for (body, status, code) in cases {
        let req = TestRequest::post()
            .uri("/api/links")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status, "body: {}", body);

        let json = body_json(resp).await;
        assert_eq!(json["code"], code as i32, "body: {}", body);
        assert!(json["data"].is_null());
    }

    assert_eq!(env.storage.count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_duplicate_code_is_conflict() {
    let env = create_test_env().await;
    let app = test_app!(env);

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = TestRequest::post()
            .uri("/api/links")
            .set_json(json!({ "original_url": "https://x.io", "custom_code": "dup" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_rt::test]
async fn test_malformed_json_uses_envelope() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["code"], ErrorCode::BadRequest as i32);
}

#[actix_rt::test]
async fn test_invalid_token_is_unauthorized() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let forged = JwtService::new("some_other_secret_abcdefghijkl", 5)
        .issue_token("alice")
        .unwrap();
    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .set_json(json!({ "original_url": "https://x.io" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(resp).await;
    assert_eq!(json["code"], ErrorCode::Unauthorized as i32);
    assert_eq!(env.storage.count().await.unwrap(), 0);
}

// =============================================================================
// Read
// =============================================================================

#[actix_rt::test]
async fn test_list_my_links() {
    let env = create_test_env().await;
    let app = test_app!(env);

    for (user, code) in [("alice", "a1"), ("alice", "a2"), ("bob", "b1")] {
        let req = TestRequest::post()
            .uri("/api/links")
            .insert_header(bearer(user))
            .set_json(json!({ "original_url": "https://x.io", "custom_code": code }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    let req = TestRequest::get()
        .uri("/api/links")
        .insert_header(bearer("alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let codes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["short_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["a2", "a1"]);
    assert_eq!(json["data"][0]["short_url"], "https://sl.test/r/a2");
    assert_eq!(json["data"][0]["clicks"], 0);

    let req = TestRequest::get().uri("/api/links").to_request();
    let json = body_json(test::call_service(&app, req).await).await;
    assert_eq!(json["data"], json!([]));
}

#[actix_rt::test]
async fn test_get_by_code_is_public() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(bearer("alice"))
        .set_json(json!({ "original_url": "https://x.io/page", "custom_code": "pub" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::get().uri("/api/links/code/pub").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["original_url"], "https://x.io/page");

    let req = TestRequest::get().uri("/api/links/code/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["code"], ErrorCode::LinkNotFound as i32);
}

#[actix_rt::test]
async fn test_get_by_id_is_owner_only() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(bearer("alice"))
        .set_json(json!({ "original_url": "https://x.io", "custom_code": "private" }))
        .to_request();
    let json = body_json(test::call_service(&app, req).await).await;
    let id = json["data"]["link_id"].as_str().unwrap().to_string();

    let req = TestRequest::get()
        .uri(&format!("/api/links/{}", id))
        .insert_header(bearer("alice"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&format!("/api/links/{}", id))
        .insert_header(bearer("bob"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

// =============================================================================
// Update / delete
// =============================================================================

#[actix_rt::test]
async fn test_update_and_delete_flow() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(bearer("alice"))
        .set_json(json!({ "original_url": "https://old.io", "custom_code": "edit-me" }))
        .to_request();
    let json = body_json(test::call_service(&app, req).await).await;
    let id = json["data"]["link_id"].as_str().unwrap().to_string();
    let uri = format!("/api/links/{}", id);

    // 非所有者
    let req = TestRequest::put()
        .uri(&uri)
        .insert_header(bearer("bob"))
        .set_json(json!({ "original_url": "https://evil.io" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["code"], ErrorCode::Forbidden as i32);

    let req = TestRequest::put()
        .uri(&uri)
        .insert_header(bearer("alice"))
        .set_json(json!({ "original_url": "https://new.io", "custom_code": "edited" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["short_code"], "edited");
    assert_eq!(json["data"]["short_url"], "https://sl.test/r/edited");

    let stored = env.storage.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://new.io");

    let req = TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer("alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["data"].is_null());

    let req = TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer("alice"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

// =============================================================================
// End to end
// =============================================================================

#[actix_rt::test]
async fn test_create_then_redirect_counts_click() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/links")
        .set_json(json!({ "original_url": "https://dest.io/x" }))
        .to_request();
    let json = body_json(test::call_service(&app, req).await).await;
    let code = json["data"]["short_code"].as_str().unwrap().to_string();

    let req = TestRequest::get()
        .uri(&format!("/r/{}", code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "https://dest.io/x");

    let req = TestRequest::get()
        .uri(&format!("/api/links/code/{}", code))
        .to_request();
    let json = body_json(test::call_service(&app, req).await).await;
    assert_eq!(json["data"]["clicks"], 1);
}

#[actix_rt::test]
async fn test_health_reports_storage() {
    let env = create_test_env().await;
    let app = test_app!(env);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["data"]["status"], "healthy");
    assert_eq!(json["data"]["storage"]["backend"], "sqlite");
    assert_eq!(json["data"]["storage"]["links_count"], 0);
}
