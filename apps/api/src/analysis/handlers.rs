//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::AnalysisType;
use crate::errors::AppError;
use crate::pdf;
use crate::report;
use crate::state::AppState;

/// Inline warning shown when no resume was attached.
pub const NO_FILE_WARNING: &str = "Please upload your resume (PDF format)";
/// Inline warning shown when the job description is blank.
pub const EMPTY_JD_WARNING: &str = "Please enter the job description";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_type: AnalysisType,
    pub label: String,
    pub analysis: String,
    pub resume_filename: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub analysis_type: AnalysisType,
    pub analysis: String,
    pub job_description: String,
    pub resume_filename: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart fields: `resume` (PDF file), `jd_text`, `analysis_type`.
/// Rasterises the first page of the upload, sends it with the instruction
/// prompt and the job description to the model, and returns the reply
/// verbatim. Each request is an independent, isolated run.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut analysis_type_raw: Option<String> = None;
    let mut jd_text = String::new();
    let mut resume: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        // `name()` borrows the field, which the consuming reads below need.
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "analysis_type" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
                analysis_type_raw = Some(value);
            }
            "jd_text" => {
                jd_text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
            }
            "resume" => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
                resume = Some((filename, bytes));
            }
            _ => {}
        }
    }

    // The upload check comes first: a missing file always surfaces the upload
    // warning, regardless of the job-description content.
    let (resume_filename, pdf_bytes) = match resume {
        Some((_, bytes)) if bytes.is_empty() => {
            return Err(AppError::Validation(NO_FILE_WARNING.to_string()))
        }
        Some(found) => found,
        None => return Err(AppError::Validation(NO_FILE_WARNING.to_string())),
    };
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_JD_WARNING.to_string()));
    }
    let analysis_type: AnalysisType = analysis_type_raw
        .ok_or_else(|| AppError::Validation("analysis_type is required".to_string()))?
        .parse()?;

    info!(
        analysis_type = %analysis_type,
        file = %resume_filename,
        pdf_bytes = pdf_bytes.len(),
        "Starting resume analysis"
    );

    let image = pdf::first_page_image(pdf_bytes).await?;

    let analysis = state
        .llm
        .analyze(analysis_type.prompt(), &image, &jd_text)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    info!(analysis_type = %analysis_type, chars = analysis.len(), "Analysis complete");

    Ok(Json(AnalyzeResponse {
        analysis_type,
        label: analysis_type.label().to_string(),
        analysis,
        resume_filename,
    }))
}

/// POST /api/v1/report
///
/// Renders the analysis into a short paginated PDF and offers it as a
/// download named `<slug>_<timestamp>.pdf`. The document is built in memory
/// and discarded after the response.
pub async fn handle_report(Json(request): Json<ReportRequest>) -> Result<Response, AppError> {
    if request.analysis.trim().is_empty() {
        return Err(AppError::Validation(
            "analysis cannot be empty".to_string(),
        ));
    }

    let generated_at = Local::now();
    let document = report::build_report(
        request.analysis_type,
        &request.analysis,
        &request.job_description,
        &request.resume_filename,
        generated_at,
    )?;
    let filename = report::report_filename(request.analysis_type, generated_at);

    info!(
        analysis_type = %request.analysis_type,
        filename = %filename,
        bytes = document.len(),
        "Report generated"
    );

    let disposition = format!("attachment; filename=\"{filename}\"");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}
