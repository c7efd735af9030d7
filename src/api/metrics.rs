use crate::api::error::AppError;
use crate::dashboard::{insights, report_csv, report_document, report_sections, Category};
use axum::{
    body::Bytes,
    http::header,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Create metrics router: one GET/POST pair per category plus insights and report
pub fn create_metrics_router() -> Router {
    let mut router = Router::new()
        .route("/api/insights", get(get_insights))
        .route("/api/report", get(get_report))
        .route("/api/report/csv", get(get_report_csv));

    for category in Category::ALL {
        router = router.route(
            &format!("/api/{}", category.slug()),
            get(move || get_category(category))
                .post(move |body: Bytes| accept_category_data(category, body)),
        );
    }

    router
}

/// GET /api/<category> - fixed metrics document
async fn get_category(category: Category) -> Json<Value> {
    debug!(category = category.slug(), "Serving category metrics");
    Json(category.document())
}

/// POST /api/<category> - accept a data point and echo it back.
/// Nothing is stored.
async fn accept_category_data(category: Category, body: Bytes) -> Result<Json<Value>, AppError> {
    let data: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;

    info!(category = category.slug(), "Data received");

    Ok(Json(json!({
        "message": "Data received successfully",
        "data": data,
    })))
}

/// GET /api/insights
async fn get_insights() -> Json<Value> {
    Json(insights())
}

/// GET /api/report - consolidated report across all categories
async fn get_report() -> Json<Value> {
    Json(report_document())
}

/// GET /api/report/csv - report flattened to one row per metric
async fn get_report_csv() -> impl IntoResponse {
    let csv = report_csv(&report_sections());
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"carbon-footprint-report.csv\"",
            ),
        ],
        csv,
    )
}
