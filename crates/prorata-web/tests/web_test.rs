use axum::http::StatusCode;
use axum_test::TestServer;
use prorata_calculator::{ProrationResult, Quarter, YearMonth};
use prorata_web::{ProrataConfig, app};
use serde_json::{Value, json};

fn test_server() -> TestServer {
    TestServer::new(app(ProrataConfig::default()).unwrap()).unwrap()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn index_renders_form_with_defaults() {
    let server = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let body = response.text();
    assert!(body.contains(r#"name="area""#));
    assert!(body.contains(r#"value="1410""#));
    assert!(body.contains(r#"value="2025""#));
    assert!(body.contains(r#"<option value="1" selected>January</option>"#));
    assert!(body.contains("December"));
}

#[tokio::test]
async fn form_submission_renders_result_panels() {
    let server = test_server();
    let response = server
        .post("/calculate")
        .form(&[("area", "1410"), ("move_in_month", "1"), ("move_in_year", "2025")])
        .await;
    response.assert_status_ok();

    let body = response.text();
    assert!(body.contains("March 2026"));
    assert!(body.contains("Q1 (Jan–Mar) 2026"));
    assert!(body.contains("₹16,708.50"));
    assert!(body.contains("₹2,185.50"));
    assert!(body.contains("₹14,523.00"));
    assert!(body.contains("Total maintenance paid in January 2025: ₹84,600.00"));
    assert!(body.contains("Covers 11 month(s) from April 2025"));
}

#[tokio::test]
async fn invalid_form_submission_redisplays_form() {
    let server = test_server();
    let response = server
        .post("/calculate")
        .form(&[("area", "50"), ("move_in_month", "3"), ("move_in_year", "2025")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.text();
    assert!(body.contains("Invalid area"));
    assert!(body.contains(r#"<option value="3" selected>March</option>"#));
}

#[tokio::test]
async fn api_returns_structured_result() {
    let server = test_server();
    let response = server
        .post("/api/v1/proration")
        .json(&json!({ "area": 1000.0, "move_in_month": 5, "move_in_year": 2025 }))
        .await;
    response.assert_status_ok();

    let result: ProrationResult = response.json();
    assert_eq!(result.used_months, 0);
    assert_eq!(result.months_covered, 15);
    assert_eq!(result.next_due, YearMonth::new(2026, 7).unwrap());
    assert_eq!(result.quarter, Quarter::Q3);
    assert!((result.remaining_balance - 750.0).abs() < 1e-6);
    assert!((result.quarter_payable - 11_100.0).abs() < 1e-6);
}

#[tokio::test]
async fn api_reports_invalid_field() {
    let server = test_server();
    let response = server
        .post("/api/v1/proration")
        .json(&json!({ "area": 1410.0, "move_in_month": 13, "move_in_year": 2025 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["field"], "move_in_month");
    assert!(body["error"].as_str().unwrap().contains("between 1 and 12"));
}

#[tokio::test]
async fn configured_changeover_drives_the_api() {
    let config = ProrataConfig::from_toml_str(
        r#"
[rates]
old_rate = 6.0
new_rate = 4.0

[changeover]
month = 10
year = 2026
"#,
    )
    .unwrap();
    let server = TestServer::new(app(config).unwrap()).unwrap();

    let response = server
        .post("/api/v1/proration")
        .json(&json!({ "area": 1000.0, "move_in_month": 7, "move_in_year": 2026 }))
        .await;
    response.assert_status_ok();

    let result: ProrationResult = response.json();
    assert_eq!(result.used_months, 3);
    assert_eq!(result.months_covered, 13);
    assert_eq!(result.next_due, YearMonth::new(2027, 11).unwrap());
}

#[test]
fn invalid_configuration_is_rejected_at_startup() {
    let config = ProrataConfig::from_toml_str("[rates]\nnew_rate = -1.0\n").unwrap();
    assert!(app(config).is_err());
}

#[tokio::test]
async fn empty_form_field_redisplays_form_naming_it() {
    let server = test_server();
    let response = server
        .post("/calculate")
        .form(&[("area", ""), ("move_in_month", "6"), ("move_in_year", "2025")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.text();
    assert!(body.contains("Invalid area: a value is required"));
    assert!(body.contains(r#"name="area""#));
    assert!(body.contains(r#"<option value="6" selected>June</option>"#));
}

#[tokio::test]
async fn non_numeric_form_field_is_reported() {
    let server = test_server();
    let response = server
        .post("/calculate")
        .form(&[("area", "1410"), ("move_in_month", "1"), ("move_in_year", "soon")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.text();
    assert!(body.contains("Invalid move_in_year"));
    assert!(body.contains(r#"value="soon""#));
}

#[tokio::test]
async fn form_endpoint_rejects_other_content_types_with_the_form() {
    let server = test_server();
    let response = server
        .post("/calculate")
        .json(&json!({ "area": 1410.0, "move_in_month": 1, "move_in_year": 2025 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body = response.text();
    assert!(body.contains("Malformed request"));
    assert!(body.contains(r#"name="area""#));
}

#[tokio::test]
async fn api_reports_non_numeric_field() {
    let server = test_server();
    let response = server
        .post("/api/v1/proration")
        .json(&json!({ "area": "abc", "move_in_month": 1, "move_in_year": 2025 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["field"], "area");
    assert!(body["error"].as_str().unwrap().contains("expected a number"));
}

#[tokio::test]
async fn api_reports_missing_field() {
    let server = test_server();
    let response = server
        .post("/api/v1/proration")
        .json(&json!({ "area": 1410.0, "move_in_month": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["field"], "move_in_year");
}

#[tokio::test]
async fn api_rejects_non_json_body_as_json_error() {
    let server = test_server();
    let response = server.post("/api/v1/proration").text("area=1410").await;
    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body: Value = response.json();
    assert!(body["field"].is_null());
    assert!(body["error"].as_str().unwrap().starts_with("Malformed request"));
}

#[tokio::test]
async fn api_rejects_oversized_area() {
    let server = TestServer::new(
        app(ProrataConfig::from_toml_str("[bounds]\nmax_area = 1.7976931348623157e308\n").unwrap()).unwrap(),
    )
    .unwrap();
    let response = server
        .post("/api/v1/proration")
        .json(&json!({ "area": 1e308, "move_in_month": 1, "move_in_year": 2025 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["field"], "area");
}
