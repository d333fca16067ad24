mod common;

use cmcs_backend::api::build_routes;
use common::setup_json_app_data;
use poem::http::StatusCode;
use poem::test::TestClient;
use serde_json::json;

#[tokio::test]
async fn test_approve_claim_answers_with_action_result() {
    let (_dir, app_data) = setup_json_app_data();
    let client = TestClient::new(build_routes(app_data.clone(), "http://localhost/api"));

    let resp = client
        .post("/api/Approval/ApproveClaim")
        .body_json(&json!({ "claimId": 1, "comments": "ok" }))
        .send()
        .await;

    resp.assert_status_is_ok();
    let body = resp.json().await;
    let body = body.value().object();
    body.get("success").assert_bool(true);
    body.get("message")
        .assert_string("Claim #1 has been approved successfully!");

    let claim = app_data.claims.get(1).await.unwrap();
    assert_eq!(claim.status_notes.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_decision_on_missing_claim_is_not_an_http_error() {
    let (_dir, app_data) = setup_json_app_data();
    let client = TestClient::new(build_routes(app_data, "http://localhost/api"));

    let resp = client
        .post("/api/Approval/RejectClaim")
        .body_json(&json!({ "claimId": 404 }))
        .send()
        .await;

    resp.assert_status_is_ok();
    let body = resp.json().await;
    let body = body.value().object();
    body.get("success").assert_bool(false);
    body.get("message").assert_string("Claim #404 not found.");
}

#[tokio::test]
async fn test_missing_claim_redirects_to_listing() {
    let (_dir, app_data) = setup_json_app_data();
    let client = TestClient::new(build_routes(app_data, "http://localhost/api"));

    let resp = client.get("/api/Claim/99").send().await;

    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header("Location", "/api/Claim");
    resp.assert_header("X-Flash-Error", "Claim #99 not found.");
}

#[tokio::test]
async fn test_invalid_claim_returns_field_error() {
    let (_dir, app_data) = setup_json_app_data();
    let client = TestClient::new(build_routes(app_data.clone(), "http://localhost/api"));

    let resp = client
        .post("/api/Claim/Create")
        .body_json(&json!({
            "claimDate": "2024-01-05",
            "hoursWorked": "0",
            "hourlyRate": "450",
            "userId": 1
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = resp.json().await;
    let body = body.value().object();
    body.get("error").assert_string("validation_failed");
    body.get("field").assert_string("hoursWorked");
    assert_eq!(app_data.claims.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_create_claim_sets_location() {
    let (_dir, app_data) = setup_json_app_data();
    let client = TestClient::new(build_routes(app_data, "http://localhost/api"));

    let resp = client
        .post("/api/Claim/Create")
        .body_json(&json!({
            "claimDate": "2024-01-05",
            "hoursWorked": "40",
            "hourlyRate": "450",
            "userId": 1
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::CREATED);
    resp.assert_header("Location", "/api/Claim/5");
    let body = resp.json().await;
    body.value().object().get("status").assert_string("Pending");
}

#[tokio::test]
async fn test_tracking_update_reports_progress() {
    let (_dir, app_data) = setup_json_app_data();
    let client = TestClient::new(build_routes(app_data, "http://localhost/api"));

    let resp = client
        .post("/api/Tracking/UpdateStatus")
        .body_json(&json!({ "claimId": 4, "newStatus": "Processing" }))
        .send()
        .await;

    resp.assert_status_is_ok();
    let body = resp.json().await;
    let body = body.value().object();
    body.get("success").assert_bool(true);
    body.get("message").assert_string("Claim status updated to Processing");
    body.get("statusProgress").assert_i64(90);
}

#[tokio::test]
async fn test_export_report_is_an_attachment() {
    let (_dir, app_data) = setup_json_app_data();
    let client = TestClient::new(build_routes(app_data, "http://localhost/api"));

    let resp = client
        .get("/api/HR/ExportReport")
        .query("status", &"Approved")
        .send()
        .await;

    resp.assert_status_is_ok();
    let disposition = resp
        .0
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("ClaimsReport_"));

    let bytes = resp.0.into_body().into_bytes().await.unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["claimId"], 2);
}
