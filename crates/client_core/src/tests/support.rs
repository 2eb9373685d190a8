//! Programmable gateway and prompt doubles shared by the controller tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use shared::{
    domain::ResumeId,
    protocol::{
        AnalysisResult, ExtractedData, LlmAnalysis, ResumeRecord, UpskillSuggestion,
    },
};

use crate::{error::ServiceError, gateway::ResumeGateway, history::DeletePrompt};

pub fn sample_analysis(filename: &str) -> AnalysisResult {
    AnalysisResult {
        filename: filename.to_string(),
        extracted_data: ExtractedData {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: None,
            location: Some("Berlin".to_string()),
            core_skills: vec!["Go".to_string(), "Rust".to_string()],
        },
        llm_analysis: LlmAnalysis {
            resume_rating: 8.0,
            improvement_areas: "Quantify achievements.".to_string(),
            upskill_suggestions: vec![UpskillSuggestion {
                skill: "Kubernetes".to_string(),
                reason: "Listed employers run containerized stacks.".to_string(),
            }],
        },
    }
}

pub fn sample_record(id: i64, filename: &str) -> ResumeRecord {
    ResumeRecord {
        id: ResumeId(id),
        filename: filename.to_string(),
        name: Some("Jane Doe".to_string()),
        uploaded_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

type SubmitResult = Result<AnalysisResult, ServiceError>;
type ListResult = Result<Vec<ResumeRecord>, ServiceError>;
type DeleteResult = Result<(), ServiceError>;

/// Every operation returns the configured result (or a benign default) and
/// bumps a call counter, so tests can assert exactly how many network calls
/// a workflow issued.
#[derive(Default)]
pub struct StubGateway {
    submit_result: Mutex<Option<SubmitResult>>,
    list_result: Mutex<Option<ListResult>>,
    fetch_result: Mutex<Option<SubmitResult>>,
    delete_result: Mutex<Option<DeleteResult>>,
    pub submit_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_submit(&self, result: SubmitResult) {
        *self.submit_result.lock().expect("submit_result lock") = Some(result);
    }

    pub fn set_list(&self, result: ListResult) {
        *self.list_result.lock().expect("list_result lock") = Some(result);
    }

    pub fn set_fetch(&self, result: SubmitResult) {
        *self.fetch_result.lock().expect("fetch_result lock") = Some(result);
    }

    pub fn set_delete(&self, result: DeleteResult) {
        *self.delete_result.lock().expect("delete_result lock") = Some(result);
    }

    pub fn total_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
            + self.list_calls.load(Ordering::SeqCst)
            + self.fetch_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResumeGateway for StubGateway {
    async fn submit(&self, filename: &str, _file_bytes: Vec<u8>) -> SubmitResult {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_result
            .lock()
            .expect("submit_result lock")
            .clone()
            .unwrap_or_else(|| Ok(sample_analysis(filename)))
    }

    async fn list(&self) -> ListResult {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_result
            .lock()
            .expect("list_result lock")
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_one(&self, _id: ResumeId) -> SubmitResult {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_result
            .lock()
            .expect("fetch_result lock")
            .clone()
            .unwrap_or_else(|| Ok(sample_analysis("resume.pdf")))
    }

    async fn delete(&self, _id: ResumeId) -> DeleteResult {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.delete_result
            .lock()
            .expect("delete_result lock")
            .clone()
            .unwrap_or(Ok(()))
    }
}

/// Deterministic confirmation stub recording every description it was shown.
pub struct StubPrompt {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl StubPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DeletePrompt for StubPrompt {
    async fn confirm(&self, description: &str) -> bool {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(description.to_string());
        self.answer
    }
}
