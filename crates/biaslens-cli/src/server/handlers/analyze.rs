//! Analysis and report handlers.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use biaslens::report::render_pdf;
use biaslens::{AnalysisResult, SourceMetadata};
use serde::Serialize;

use super::upload::Upload;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for the analyze endpoint.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub source: SourceMetadata,
}

/// Analyze an uploaded dataset.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let upload = Upload::from_multipart(multipart).await?;
    let (result, source) = run_analysis(&state, upload).await?;

    Ok(Json(AnalyzeResponse {
        status: "success",
        result,
        source,
    }))
}

/// Analyze an uploaded dataset and return the PDF report.
pub async fn report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = Upload::from_multipart(multipart).await?;
    let (result, _) = run_analysis(&state, upload).await?;

    let disposition = format!(
        "attachment; filename=\"biaslens_report_{}.pdf\"",
        file_safe(&result.sensitive_attribute)
    );
    let pdf = render_pdf(&result);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// Run the analysis on the blocking pool; a text generator may block for
/// up to its timeout.
async fn run_analysis(
    state: &AppState,
    upload: Upload,
) -> Result<(AnalysisResult, SourceMetadata), ApiError> {
    let lens = state.lens.clone();
    tracing::info!(
        file = %upload.file_name,
        bytes = upload.contents.len(),
        sensitive = %upload.sensitive,
        "analysis requested"
    );

    let outcome = tokio::task::spawn_blocking(move || {
        lens.analyze_bytes(&upload.file_name, &upload.contents, &upload.sensitive)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))?;

    Ok(outcome?)
}

fn file_safe(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "attribute".to_string()
    } else {
        cleaned
    }
}
