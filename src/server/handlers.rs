// Request handlers for the HTTP service.
//
// Errors are returned as `{"detail": "..."}` bodies. Unreadable documents map to 400,
// malformed forms to 422 and everything else to 500.

use crate::error::ResumeMatcherError;
use crate::input::{extract_document, FileType, RawDocument};
use crate::processing::AnalysisResult;
use crate::server::AppState;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

impl From<ResumeMatcherError> for ApiError {
    fn from(err: ResumeMatcherError) -> Self {
        if err.is_extraction_failure() {
            warn!("Rejecting upload: {}", err);
            ApiError::new(StatusCode::BAD_REQUEST, err.to_string())
        } else {
            error!("Request failed: {}", err);
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractTextResponse {
    pub filename: String,
    pub text: String,
}

struct Upload {
    file_name: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    file: Option<Upload>,
    job_description: Option<String>,
}

/// GET / — liveness check.
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Backend is running" }))
}

/// POST /extract-text — multipart `file`; returns the normalized text.
pub async fn extract_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, ApiError> {
    let form = read_form(multipart).await?;
    let upload = form
        .file
        .ok_or_else(|| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Missing form field: file"))?;

    info!("Extracting text from upload '{}' ({} bytes)", upload.file_name, upload.bytes.len());

    let filename = upload.file_name.clone();
    let text = with_persisted_upload(&state, upload, |document| {
        extract_document(&document).map(|text| text.into_string())
    })
    .await?;

    Ok(Json(ExtractTextResponse { filename, text }))
}

/// POST /analyze — multipart `file` and `job_description`.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    let form = read_form(multipart).await?;
    let upload = form
        .file
        .ok_or_else(|| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Missing form field: file"))?;
    let job_description = form.job_description.ok_or_else(|| {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Missing form field: job_description")
    })?;

    info!("Analyzing upload '{}' ({} bytes)", upload.file_name, upload.bytes.len());

    let engine = state.engine.clone();
    let result = with_persisted_upload(&state, upload, move |document| {
        engine.analyze(&document, &job_description)
    })
    .await?;

    Ok(Json(result))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::new(StatusCode::BAD_REQUEST, format!("Failed to read upload: {}", e))
                })?;
                form.file = Some(Upload { file_name, bytes });
            }
            Some("job_description") => {
                let text = field.text().await.map_err(|e| {
                    ApiError::new(StatusCode::BAD_REQUEST, format!("Failed to read job_description: {}", e))
                })?;
                form.job_description = Some(text);
            }
            other => warn!("Ignoring unexpected form field: {:?}", other),
        }
    }

    Ok(form)
}

/// Persist the upload to a temporary file, run `work` over its contents on the blocking
/// pool, and remove the file on every exit path.
async fn with_persisted_upload<T, F>(state: &AppState, upload: Upload, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(RawDocument<'_>) -> crate::Result<T> + Send + 'static,
{
    let upload_dir = state.config.upload_dir.clone();

    let outcome = tokio::task::spawn_blocking(move || {
        let temp_file = persist_upload(upload_dir.as_deref(), &upload)?;
        let bytes = std::fs::read(temp_file.path())?;
        let format = FileType::detect(Some(&upload.file_name), &bytes);

        // temp_file drops at the end of this scope, removing it from disk
        work(RawDocument::new(&bytes, format))
    })
    .await
    .map_err(|e| {
        error!("Extraction task failed: {}", e);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Extraction task failed")
    })?;

    outcome.map_err(ApiError::from)
}

fn persist_upload(upload_dir: Option<&Path>, upload: &Upload) -> crate::Result<NamedTempFile> {
    let suffix = Path::new(&upload.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    let mut builder = tempfile::Builder::new();
    builder.prefix("upload-").suffix(&suffix);

    let mut temp_file = match upload_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            builder.tempfile_in(dir)?
        }
        None => builder.tempfile()?,
    };

    temp_file.write_all(&upload.bytes)?;
    temp_file.flush()?;
    Ok(temp_file)
}
