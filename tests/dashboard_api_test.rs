// Integration tests for the dashboard HTTP endpoints.
//
// Requests are driven through the full application router with
// tower::ServiceExt::oneshot, so routing, extraction, error mapping and CORS
// all take part.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use greenpulse::{
    api::{create_app, WsAppState},
    config::RealtimeConfig,
    session::SessionManager,
    telemetry::RandomSampleSource,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn make_app() -> Router {
    let state = Arc::new(WsAppState {
        sessions: Arc::new(SessionManager::new(Arc::new(RandomSampleSource))),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        realtime: RealtimeConfig::default(),
    });
    create_app(state)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = make_app().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post(uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    let resp = make_app().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// ── category metrics ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_every_category_serves_a_document() {
    for slug in [
        "emissions",
        "transportation",
        "waste",
        "materials",
        "production",
        "water",
        "digital",
    ] {
        let (status, body) = get(&format!("/api/{}", slug)).await;
        assert_eq!(status, StatusCode::OK, "GET /api/{}", slug);
        assert!(body.is_object(), "GET /api/{} should return an object", slug);
    }
}

#[tokio::test]
async fn test_emissions_document_has_six_month_series() {
    let (_, body) = get("/api/emissions").await;
    assert_eq!(body["labels"].as_array().unwrap().len(), 6);
    assert_eq!(
        body["energy"]["electricity"],
        json!([120, 130, 110, 100, 90, 95])
    );
}

#[tokio::test]
async fn test_category_post_echoes_payload() {
    let payload = json!({"value": 42, "unit": "kWh", "date": "2024-03-01"});
    let (status, body) = post("/api/waste", payload.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data received successfully");
    assert_eq!(body["data"], payload);
}

#[tokio::test]
async fn test_category_post_rejects_malformed_json() {
    let (status, body) = post("/api/water", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid JSON"));
}

#[tokio::test]
async fn test_unknown_category_is_404() {
    let req = Request::builder()
        .uri("/api/unicorns")
        .body(Body::empty())
        .unwrap();
    let resp = make_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── insights and report ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_insights() {
    let (status, body) = get("/api/insights").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sustainability_index"], 75);
    assert_eq!(body["current_insights"].as_array().unwrap().len(), 3);
    assert_eq!(body["alerts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_report_json() {
    let (status, body) = get("/api/report").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
}

#[tokio::test]
async fn test_report_csv_is_attachment() {
    let req = Request::builder()
        .uri("/api/report/csv")
        .body(Body::empty())
        .unwrap();
    let resp = make_app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert!(resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .starts_with("attachment"));

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(
        text.lines().next(),
        Some("Category,Subcategory,Metric,Value,Unit,Trend,Percentage")
    );
    assert!(text.lines().count() > 1);
}

// ── suggestions ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_suggestions_filter_by_text() {
    let (status, body) = post(
        "/api/suggestions",
        json!({"text": "waste", "category": "waste"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    for s in suggestions {
        assert!(s.as_str().unwrap().to_lowercase().contains("waste"));
    }
}

#[tokio::test]
async fn test_suggestions_missing_fields() {
    let (status, body) = post("/api/suggestions", json!({"text": "gas"}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

// ── voice transcript ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_transcript_processed() {
    let (status, body) = post(
        "/api/process-transcript",
        json!({
            "transcript": "we used 100 kilos of packaging",
            "category": "materials",
            "language": "en",
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["category"], "materials");
    assert_eq!(body["data"]["processedData"]["value"], 100);
    assert_eq!(body["data"]["processedData"]["unit"], "kg");
    assert_eq!(
        body["data"]["processedData"]["notes"],
        "we used 100 kilos of packaging"
    );
}

#[tokio::test]
async fn test_transcript_empty_is_rejected() {
    let (status, body) = post(
        "/api/process-transcript",
        json!({"transcript": "", "category": "energy"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

// ── CSV upload ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_reduces_rows() {
    let csv = "date,category,subcategory,value\n\
               2024-01,energy,electricity,120\n\
               2024-01,energy,gas,80\n\
               2024-02,waste,general,oops\n";
    let (status, body) = post("/api/upload?category=energy&language=en", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["category"], "energy");
    assert_eq!(body["data"]["fileSize"], csv.len());
    assert_eq!(body["data"]["summary"]["rows"], 2);
    assert_eq!(body["data"]["summary"]["skippedRows"], 1);
    assert_eq!(
        body["data"]["summary"]["data"]["2024-01"]["energy"]["electricity"],
        120.0
    );
}

#[tokio::test]
async fn test_upload_empty_body() {
    let (status, body) = post("/api/upload", Body::empty()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn test_upload_missing_columns() {
    let (status, body) = post("/api/upload", "date,value\n2024-01,3\n").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("category"));
    assert!(error.contains("subcategory"));
}

// ── CORS ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_cors_allows_dashboard_origin() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/emissions")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let resp = make_app().oneshot(req).await.unwrap();

    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_cors_omits_header_for_foreign_origin() {
    let req = Request::builder()
        .uri("/api/emissions")
        .header(header::ORIGIN, "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let resp = make_app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
