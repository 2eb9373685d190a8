use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ResumeId;

/// The only document type the service accepts.
pub const PDF_MIME: &str = "application/pdf";

/// Lightweight summary of one stored submission, as returned by `GET /resumes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: ResumeId,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Order-preserving, possibly empty.
    #[serde(default)]
    pub core_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpskillSuggestion {
    pub skill: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmAnalysis {
    pub resume_rating: f64,
    pub improvement_areas: String,
    #[serde(default)]
    pub upskill_suggestions: Vec<UpskillSuggestion>,
}

impl LlmAnalysis {
    /// The service rates resumes on a fixed 0..=10 scale.
    pub const RATING_SCALE_MAX: f64 = 10.0;
}

/// Raw wire shape of an analysis body. Either half may be absent in a
/// malformed response; [`AnalysisResponse::into_validated`] is the only way
/// to obtain field access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<ExtractedData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_analysis: Option<LlmAnalysis>,
}

/// A validated analysis: `extracted_data` and `llm_analysis` are both present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub extracted_data: ExtractedData,
    pub llm_analysis: LlmAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("analysis data incomplete")]
pub struct MalformedAnalysis;

impl AnalysisResponse {
    pub fn into_validated(self) -> Result<AnalysisResult, MalformedAnalysis> {
        match (self.extracted_data, self.llm_analysis) {
            (Some(extracted_data), Some(llm_analysis)) => Ok(AnalysisResult {
                filename: self.filename,
                extracted_data,
                llm_analysis,
            }),
            _ => Err(MalformedAnalysis),
        }
    }
}

impl From<AnalysisResult> for AnalysisResponse {
    fn from(value: AnalysisResult) -> Self {
        Self {
            filename: value.filename,
            extracted_data: Some(value.extracted_data),
            llm_analysis: Some(value.llm_analysis),
        }
    }
}

/// Structured error body the service attaches to 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
