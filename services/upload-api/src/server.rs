//! HTTP surface for the upload API.
//!
//! Endpoints:
//! - `POST /energy/upload` - multipart CSV upload, returns alerts and
//!   threshold violations
//! - `GET /health` - health check

use axum::{
    extract::{Extension, Multipart},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use ingestion::{UploadBatch, UploadFile};
use usage_common::{ExceededEntry, IngestionReport, UsageError};

use crate::state::AppState;

/// Wire shape of a successful upload, matching the legacy JSON contract.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub alerts: Vec<String>,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "exceededThresholds")]
    pub exceeded_thresholds: Vec<ExceededEntry>,
}

impl From<IngestionReport> for UploadResponse {
    fn from(report: IngestionReport) -> Self {
        Self {
            status: "success",
            alerts: report.alerts.iter().map(ToString::to_string).collect(),
            user_id: report.user_id,
            exceeded_thresholds: report.exceeded_thresholds,
        }
    }
}

/// Error wrapper giving [`UsageError`] an HTTP rendering.
pub struct ApiError(UsageError);

impl From<UsageError> for ApiError {
    fn from(err: UsageError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

/// POST /energy/upload - process a batch of usage files.
async fn upload_handler(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files = Vec::new();
    let mut threshold = state.default_threshold;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("files") => {
                let filename = field
                    .file_name()
                    .unwrap_or("uploaded.csv")
                    .to_string();
                let content = field.bytes().await.map_err(bad_multipart)?;
                files.push(UploadFile::new(filename, content));
            }
            Some("threshold") => {
                let raw = field.text().await.map_err(bad_multipart)?;
                threshold = raw.trim().parse().map_err(|_| {
                    UsageError::InvalidParameter {
                        param: "threshold".to_string(),
                        message: format!("'{}' is not a number", raw),
                    }
                })?;
            }
            _ => {}
        }
    }

    info!(files = files.len(), threshold, "Received upload batch");

    let batch = UploadBatch { files, threshold };
    let report = state.pipeline.run(&batch).await?;

    Ok(Json(UploadResponse::from(report)))
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError(UsageError::InvalidParameter {
        param: "body".to_string(),
        message: format!("malformed multipart request: {}", err),
    })
}

/// GET /health - health check.
async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "upload-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/energy/upload", post(upload_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
