use crate::api::error::AppError;
use crate::dashboard::input::{SuggestionResponse, TranscriptResponse};
use crate::dashboard::{
    process_transcript, reduce_csv, suggest, CsvSummary, SuggestionRequest, TranscriptRequest,
    UploadError,
};
use axum::{
    body::Bytes,
    extract::Query,
    response::Json,
    routing::post,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Create data-entry router (suggestions, voice transcript, CSV upload)
pub fn create_input_router() -> Router {
    Router::new()
        .route("/api/suggestions", post(post_suggestions))
        .route("/api/process-transcript", post(post_transcript))
        .route("/api/upload", post(post_upload))
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
}

/// POST /api/suggestions
async fn post_suggestions(body: Bytes) -> Result<Json<SuggestionResponse>, AppError> {
    let request: SuggestionRequest = parse_body(&body)?;
    Ok(Json(suggest(&request)?))
}

/// POST /api/process-transcript
async fn post_transcript(body: Bytes) -> Result<Json<TranscriptResponse>, AppError> {
    let request: TranscriptRequest = parse_body(&body)?;
    Ok(Json(process_transcript(request)?))
}

/// Query parameters for CSV upload
#[derive(Deserialize)]
pub struct UploadParams {
    pub category: Option<String>,
    pub language: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadData {
    category: Option<String>,
    language: Option<String>,
    file_size: usize,
    processed_at: String,
    summary: CsvSummary,
}

#[derive(Serialize)]
struct UploadResponse {
    success: bool,
    data: UploadData,
}

/// POST /api/upload?category=..&language=.. - reduce an uploaded CSV by date,
/// category and subcategory
async fn post_upload(
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<UploadResponse>, AppError> {
    if body.is_empty() {
        return Err(UploadError::Empty.into());
    }

    let text = std::str::from_utf8(&body)
        .map_err(|_| AppError::BadRequest("CSV upload must be UTF-8 text".to_string()))?;
    let summary = reduce_csv(text)?;

    info!(
        bytes = body.len(),
        rows = summary.rows,
        skipped = summary.skipped_rows,
        "CSV upload reduced"
    );

    Ok(Json(UploadResponse {
        success: true,
        data: UploadData {
            category: params.category,
            language: params.language,
            file_size: body.len(),
            processed_at: Utc::now().to_rfc3339(),
            summary,
        },
    }))
}
