//! Request resolution: validates caller input and picks the `RoleSpec` to match against.

use std::borrow::Cow;

use serde::Deserialize;

use crate::matching::catalog::RoleCatalog;
use crate::matching::custom::derive_custom_role;
use crate::matching::engine::{AnalysisResult, RoleMatcher};
use crate::matching::MatchError;

/// Caller input: resume text plus either a catalog role key or a custom JD.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_role: String,
    #[serde(default)]
    pub custom_jd: String,
    #[serde(default)]
    pub is_custom: bool,
}

/// Rejects resume text shorter than `min_resume_chars` after trimming.
pub fn validate_resume_text(resume_text: &str, min_resume_chars: usize) -> Result<(), MatchError> {
    let length = resume_text.trim().chars().count();
    if length == 0 {
        return Err(MatchError::InvalidInput(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if length < min_resume_chars {
        return Err(MatchError::InvalidInput(format!(
            "resume_text must be at least {min_resume_chars} characters (got {length})"
        )));
    }
    Ok(())
}

pub const NO_KEYWORDS_MESSAGE: &str = "No technical keywords detected in your job description.";

/// Borrows the catalog's precompiled matcher, or compiles a custom one when `is_custom` is set.
/// A custom description with no vocabulary hits is rejected rather than scored 0.
pub fn resolve_matcher<'a>(
    catalog: &'a RoleCatalog,
    request: &AnalysisRequest,
) -> Result<Cow<'a, RoleMatcher>, MatchError> {
    if request.is_custom {
        if request.custom_jd.trim().is_empty() {
            return Err(MatchError::InvalidInput(
                "custom_jd cannot be empty when is_custom is set".to_string(),
            ));
        }
        let role = derive_custom_role(&request.custom_jd);
        if role.is_empty() {
            return Err(MatchError::InvalidInput(NO_KEYWORDS_MESSAGE.to_string()));
        }
        return RoleMatcher::compile(&role).map(Cow::Owned);
    }

    let role_key = request.job_role.trim();
    if role_key.is_empty() {
        return Err(MatchError::InvalidInput(
            "job_role is required unless is_custom is set".to_string(),
        ));
    }

    catalog.matcher(role_key).map(Cow::Borrowed)
}

/// Validates, resolves, and analyzes in one step. No partial result on failure.
pub fn run_analysis(
    catalog: &RoleCatalog,
    request: &AnalysisRequest,
    min_resume_chars: usize,
) -> Result<AnalysisResult, MatchError> {
    validate_resume_text(&request.resume_text, min_resume_chars)?;
    let matcher = resolve_matcher(catalog, request)?;
    Ok(matcher.analyze(&request.resume_text))
}
