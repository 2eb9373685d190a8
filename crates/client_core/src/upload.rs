use shared::protocol::{AnalysisResult, PDF_MIME};
use tracing::{debug, info};

use crate::{error::ServiceError, gateway::ResumeGateway};

pub const INVALID_FILE_TYPE: &str = "Please select a valid PDF file.";
pub const MISSING_FILE_AT_SUBMIT: &str = "Please select a PDF file to upload.";

/// A file the user has picked or dropped, not yet accepted for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum UploadOutcome {
    #[default]
    None,
    Succeeded(AnalysisResult),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    Submitting,
    Succeeded,
    Failed,
}

/// Owns the submission lifecycle: acquire a candidate file, validate it,
/// submit it, present the analysis or an error. Picker and drag-and-drop
/// acquisition both funnel through [`UploadController::select_file`], so the
/// two input paths enforce identical constraints.
#[derive(Debug, Default)]
pub struct UploadController {
    file: Option<CandidateFile>,
    outcome: UploadOutcome,
    error: Option<String>,
    submitting: bool,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        if self.submitting {
            return UploadPhase::Submitting;
        }
        match &self.outcome {
            UploadOutcome::Succeeded(_) => UploadPhase::Succeeded,
            UploadOutcome::Failed(_) => UploadPhase::Failed,
            UploadOutcome::None if self.file.is_some() => UploadPhase::FileSelected,
            UploadOutcome::None => UploadPhase::Idle,
        }
    }

    pub fn selected_file(&self) -> Option<&CandidateFile> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.outcome {
            UploadOutcome::Succeeded(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match &self.outcome {
            UploadOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Validation error from the most recent select/submit attempt.
    pub fn validation_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The inline banner text: a validation error or a failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().or(self.failure_message())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Both acceptance and rejection discard the previous attempt's outcome:
    /// the controller reports the new selection's state, never a stale one.
    pub fn select_file(&mut self, candidate: CandidateFile) {
        if candidate.mime_type != PDF_MIME {
            debug!(
                filename = %candidate.filename,
                mime_type = %candidate.mime_type,
                "rejected non-pdf candidate"
            );
            self.file = None;
            self.outcome = UploadOutcome::None;
            self.error = Some(INVALID_FILE_TYPE.to_string());
            return;
        }
        self.error = None;
        self.outcome = UploadOutcome::None;
        self.file = Some(candidate);
    }

    pub fn remove_file(&mut self) {
        self.file = None;
        self.error = None;
    }

    /// Back to a state indistinguishable from initial `Idle`. The only way to
    /// start another submission after a completed analysis.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validates and enters `Submitting`, handing back the file to send.
    /// `None` means no request may be issued: no file (validation error set),
    /// a submission already in flight, or a completed analysis awaiting reset.
    pub fn begin_submit(&mut self) -> Option<CandidateFile> {
        if self.submitting || matches!(self.outcome, UploadOutcome::Succeeded(_)) {
            return None;
        }
        let Some(file) = self.file.clone() else {
            self.error = Some(MISSING_FILE_AT_SUBMIT.to_string());
            return None;
        };
        // Clear stale data so nothing from a previous attempt shows during
        // this one.
        self.error = None;
        self.outcome = UploadOutcome::None;
        self.submitting = true;
        Some(file)
    }

    /// The selected file is kept on failure so the same submission can be
    /// retried without re-picking.
    pub fn complete_submit(&mut self, result: Result<AnalysisResult, ServiceError>) {
        self.submitting = false;
        match result {
            Ok(analysis) => {
                info!(filename = %analysis.filename, "resume analysis succeeded");
                self.outcome = UploadOutcome::Succeeded(analysis);
            }
            Err(err) => {
                self.outcome = UploadOutcome::Failed(err.to_string());
            }
        }
    }

    pub async fn submit(&mut self, gateway: &dyn ResumeGateway) {
        let Some(file) = self.begin_submit() else {
            return;
        };
        let result = gateway.submit(&file.filename, file.bytes).await;
        self.complete_submit(result);
    }
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
