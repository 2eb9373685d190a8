use async_trait::async_trait;
use shared::{
    domain::ResumeId,
    protocol::{AnalysisResult, ResumeRecord},
};
use tracing::{info, warn};

use crate::{
    detail::{DetailResolver, DetailState, DetailTicket},
    error::ServiceError,
    gateway::ResumeGateway,
};

pub const HISTORY_LOAD_FAILURE: &str = "Failed to fetch submission history.";
pub const DELETE_FAILURE: &str = "Failed to delete resume. Please try again.";

/// Yes/no decision point that must answer before a delete request is issued.
/// Injected so the embedding can supply a real dialog and tests a
/// deterministic stub.
#[async_trait]
pub trait DeletePrompt: Send + Sync {
    async fn confirm(&self, description: &str) -> bool;
}

/// For embeddings that gather the confirmation themselves (e.g. a UI modal)
/// before handing the delete to the controller.
pub struct PreConfirmed;

#[async_trait]
impl DeletePrompt for PreConfirmed {
    async fn confirm(&self, _description: &str) -> bool {
        true
    }
}

/// Tags one list fetch. Completions carrying a stale sequence number are
/// silently discarded, which is the only defense against a superseded load
/// overwriting newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
}

/// Owns the submission list (server order, deletions applied by identity,
/// never re-sorted) and the nested detail resolver.
#[derive(Debug, Default)]
pub struct HistoryController {
    records: Vec<ResumeRecord>,
    loading: bool,
    error: Option<String>,
    load_seq: u64,
    detail: DetailResolver,
}

impl HistoryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ResumeRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error banner text. When records from an earlier successful load are
    /// still known, the embedding shows this alongside the table rather than
    /// replacing it.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn detail_state(&self) -> &DetailState {
        self.detail.state()
    }

    pub fn selection(&self) -> Option<ResumeId> {
        self.detail.selection()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.loading = true;
        LoadTicket { seq: self.load_seq }
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ResumeRecord>, ServiceError>,
    ) {
        if ticket.seq != self.load_seq {
            // Superseded load (or one that predates a confirmed deletion);
            // its result must not cause a visible transition.
            return;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                info!(count = records.len(), "submission history loaded");
                self.records = records;
                self.error = None;
            }
            Err(err) => {
                warn!("history load failed: {err}");
                self.error = Some(HISTORY_LOAD_FAILURE.to_string());
            }
        }
    }

    /// Fetches the full record sequence. Re-run on every activation of the
    /// history view; nothing is cached across activations.
    pub async fn load(&mut self, gateway: &dyn ResumeGateway) {
        let ticket = self.begin_load();
        let result = gateway.list().await;
        self.complete_load(ticket, result);
    }

    /// Local removal after the server confirmed the delete. Also supersedes
    /// any in-flight load issued before the deletion, so a late-arriving list
    /// can never resurrect the record.
    pub fn apply_confirmed_delete(&mut self, id: ResumeId) {
        self.load_seq += 1;
        self.loading = false;
        self.records.retain(|record| record.id != id);
        if self.detail.selection() == Some(id) {
            self.detail.clear();
        }
    }

    pub async fn delete(
        &mut self,
        gateway: &dyn ResumeGateway,
        prompt: &dyn DeletePrompt,
        id: ResumeId,
    ) {
        let description = match self.records.iter().find(|record| record.id == id) {
            Some(record) => format!(
                "Are you sure you want to delete the resume \"{}\"?",
                record.filename
            ),
            None => format!("Are you sure you want to delete resume {id}?"),
        };
        if !prompt.confirm(&description).await {
            return;
        }
        match gateway.delete(id).await {
            Ok(()) => {
                info!(%id, "resume deleted");
                self.apply_confirmed_delete(id);
            }
            Err(err) => {
                // Local state untouched; the record stays visible and
                // selectable.
                warn!(%id, "delete failed: {err}");
                self.error = Some(DELETE_FAILURE.to_string());
            }
        }
    }

    pub fn begin_detail(&mut self, id: ResumeId) -> Option<DetailTicket> {
        self.detail.select(id)
    }

    pub fn complete_detail(
        &mut self,
        ticket: DetailTicket,
        result: Result<AnalysisResult, ServiceError>,
    ) {
        self.detail.complete(ticket, result);
    }

    pub async fn select_for_detail(&mut self, gateway: &dyn ResumeGateway, id: ResumeId) {
        if let Some(ticket) = self.detail.select(id) {
            let result = gateway.fetch_one(ticket.id()).await;
            self.detail.complete(ticket, result);
        }
    }

    pub fn clear_detail(&mut self) {
        self.detail.clear();
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
