//! API request handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::archive::ARCHIVE_CONTENT_TYPE;
use crate::error::RosterError;
use crate::pipeline;

pub const ROSTER_COUNT_HEADER: &str = "x-roster-count";
pub const SKIPPED_ROWS_HEADER: &str = "x-skipped-rows";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

const UPLOAD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Daily Class Roster Generator</title>
<style>
  body { font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }
  #status { margin-top: 1rem; }
  .ok { color: #2e7d32; } .fail { color: #c62828; }
</style>
</head>
<body>
<h1>Daily Class Roster Generator</h1>
<p>Upload the booking export for tomorrow's classes. One roster per class
is generated, ready to upload to Connecteam.</p>
<form id="upload">
  <input type="file" name="file" accept=".xlsx" required>
  <button type="submit">Generate rosters</button>
</form>
<div id="status"></div>
<script>
document.getElementById('upload').addEventListener('submit', async (event) => {
  event.preventDefault();
  const status = document.getElementById('status');
  status.textContent = 'Working...';
  status.className = '';
  const response = await fetch('/api/v1/rosters', { method: 'POST', body: new FormData(event.target) });
  if (response.status === 204) { status.textContent = ''; return; }
  if (!response.ok) {
    const body = await response.json().catch(() => ({}));
    status.textContent = body.error || ('Request failed: ' + response.status);
    status.className = 'fail';
    return;
  }
  const blob = await response.blob();
  const link = document.createElement('a');
  link.href = URL.createObjectURL(blob);
  link.textContent = 'Download All Rosters (ZIP)';
  link.download = 'Rosters.zip';
  status.innerHTML = '';
  const done = document.createElement('p');
  done.textContent = 'Rosters generated! (' + response.headers.get('x-roster-count') + ')';
  done.className = 'ok';
  status.append(done, link);
});
</script>
</body>
</html>
"#;

/// GET / - Upload page
pub async fn upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub sheet: String,
    pub static_block: bool,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        sheet: state.roster.sheet.clone(),
        static_block: state.roster.include_static_block,
    }))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::err(message))).into_response()
}

/// Input problems are the uploader's to fix; the rest are server faults
fn status_for(error: &RosterError) -> StatusCode {
    match error {
        RosterError::Workbook(_)
        | RosterError::MissingSheet { .. }
        | RosterError::MissingColumn { .. }
        | RosterError::InvalidStartTime { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The `file` part of the upload; `None` when no file was chosen
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, String> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {}", e))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| format!("Read error: {}", e))?;
            upload = Some(bytes.to_vec());
        }
    }
    Ok(upload.filter(|bytes| !bytes.is_empty()))
}

/// POST /api/v1/rosters - Booking export in, roster archive out
pub async fn generate_rosters(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let bytes = match read_upload(&mut multipart).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return StatusCode::NO_CONTENT.into_response(),
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    info!(bytes = bytes.len(), "booking export uploaded");

    let config = Arc::clone(&state.roster);
    let result =
        tokio::task::spawn_blocking(move || pipeline::generate(&bytes, &config)).await;

    let outcome = match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            warn!(error = %e, "roster generation failed");
            return error_response(status_for(&e), e.to_string());
        }
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Roster generation panicked: {}", e),
            );
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", state.roster.archive_name),
        )
        .header(ROSTER_COUNT_HEADER, outcome.archive.entries.len())
        .header(SKIPPED_ROWS_HEADER, outcome.skipped.len())
        .body(Body::from(outcome.archive.bytes))
        .unwrap_or_else(|e| {
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to build response: {}", e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_ok() {
        let response = ApiResponse::ok("data");
        assert!(response.success);
        assert_eq!(response.data, Some("data"));
        assert!(response.error.is_none());
        assert!(Uuid::parse_str(&response.request_id).is_ok());
    }

    #[test]
    fn test_api_response_err_serialization() {
        let response = ApiResponse::<()>::err("boom");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_status_for_input_errors() {
        let err = RosterError::MissingColumn {
            field: "start".to_string(),
            candidates: "'Start'".to_string(),
        };
        assert_eq!(status_for(&err), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            status_for(&RosterError::Workbook("bad".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_status_for_server_errors() {
        assert_eq!(
            status_for(&RosterError::Template("gone".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upload_page_has_file_control() {
        assert!(UPLOAD_PAGE.contains(r#"type="file" name="file""#));
        assert!(UPLOAD_PAGE.contains("/api/v1/rosters"));
    }
}
