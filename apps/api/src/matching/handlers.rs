//! Axum route handlers for the Matching API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::matching::catalog::{RoleSpec, RoleSummary};
use crate::matching::engine::AnalysisResult;
use crate::matching::legacy::StoredAnalysis;
use crate::matching::request::{run_analysis, AnalysisRequest};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<Vec<RoleSummary>> {
    Json(state.catalog.list())
}

/// GET /api/v1/roles/:key
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RoleSpec>, AppError> {
    let spec = state.catalog.lookup(&key)?;
    Ok(Json(spec.clone()))
}

/// POST /api/v1/analyze
///
/// Scores pasted resume text against a catalog role or a custom job description.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    analyze_logged(&state, &request).map(Json)
}

/// POST /api/v1/analyze/pdf
///
/// Multipart variant: `resume` carries a PDF whose extracted text replaces `resume_text`.
/// Remaining fields (`job_role`, `custom_jd`, `is_custom`) mirror the JSON request.
pub async fn handle_analyze_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut request = AnalysisRequest::default();
    let mut pdf_bytes = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => pdf_bytes = Some(field.bytes().await?),
            "job_role" => request.job_role = field.text().await?,
            "custom_jd" => request.custom_jd = field.text().await?,
            "is_custom" => request.is_custom = parse_flag(&field.text().await?),
            _ => {}
        }
    }

    let pdf_bytes = pdf_bytes
        .ok_or_else(|| AppError::Validation(format!("multipart field '{RESUME_FIELD}' is required")))?;
    info!("Extracting text from uploaded PDF ({} bytes)", pdf_bytes.len());

    let raw_text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf_bytes))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("PDF extraction aborted: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;

    request.resume_text = normalize_whitespace(&raw_text);
    analyze_logged(&state, &request).map(Json)
}

/// POST /api/v1/analyses/normalize
///
/// Upgrades a previously stored result (bare-name skills, `level` weights) to the current shape.
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(stored): Json<StoredAnalysis>,
) -> Json<AnalysisResult> {
    Json(stored.normalize(&state.catalog))
}

fn analyze_logged(state: &AppState, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
    let result = run_analysis(&state.catalog, request, state.config.min_resume_chars)
        .inspect_err(|e| warn!("Analysis rejected: {e}"))?;

    info!(
        job_title = %result.job_title,
        score = result.score,
        verdict = ?result.verdict,
        matched = result.matched.len(),
        missing = result.missing.len(),
        critical_gaps = result.critical_gaps().count(),
        "Resume analyzed"
    );
    Ok(result)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "on" | "yes")
}

/// Collapses runs of whitespace (PDF line breaks, column gaps) into single spaces.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
