use shared::{domain::ResumeId, protocol::AnalysisResult};

use crate::error::ServiceError;

pub const DETAIL_FETCH_FAILURE: &str = "Could not load the resume details. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Unselected,
    Resolving(ResumeId),
    Resolved(ResumeId, AnalysisResult),
    ResolveError(ResumeId, String),
}

/// Pairs a resolution request with the generation it was issued under, so a
/// completion can be matched against the selection that is current when it
/// lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    id: ResumeId,
    generation: u64,
}

impl DetailTicket {
    pub fn id(&self) -> ResumeId {
        self.id
    }
}

/// Cancelable fetch-on-select flow keyed by the inspected record's id.
/// Changing the selection bumps the generation, which makes any in-flight
/// completion for the old key inert: a stale response never overwrites the
/// state of a newer selection.
#[derive(Debug, Default)]
pub struct DetailResolver {
    state: DetailState,
    generation: u64,
}

impl DetailResolver {
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn selection(&self) -> Option<ResumeId> {
        match &self.state {
            DetailState::Unselected => None,
            DetailState::Resolving(id)
            | DetailState::Resolved(id, _)
            | DetailState::ResolveError(id, _) => Some(*id),
        }
    }

    /// `None` means nothing to fetch: the id is already resolved or a fetch
    /// for it is in flight. A re-selection after a resolve error retries.
    pub fn select(&mut self, id: ResumeId) -> Option<DetailTicket> {
        match &self.state {
            DetailState::Resolved(current, _) if *current == id => return None,
            DetailState::Resolving(current) if *current == id => return None,
            _ => {}
        }
        self.generation += 1;
        self.state = DetailState::Resolving(id);
        Some(DetailTicket {
            id,
            generation: self.generation,
        })
    }

    pub fn complete(
        &mut self,
        ticket: DetailTicket,
        result: Result<AnalysisResult, ServiceError>,
    ) {
        if ticket.generation != self.generation {
            // Superseded selection; the response is intentionally dropped.
            return;
        }
        self.state = match result {
            Ok(analysis) => DetailState::Resolved(ticket.id, analysis),
            Err(err) => DetailState::ResolveError(ticket.id, resolve_failure_message(&err)),
        };
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = DetailState::Unselected;
    }
}

fn resolve_failure_message(err: &ServiceError) -> String {
    match err {
        // Incomplete data is a display-level condition worth naming; anything
        // else gets the retryable fetch message.
        ServiceError::MalformedAnalysis => err.to_string(),
        _ => DETAIL_FETCH_FAILURE.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/detail_tests.rs"]
mod tests;
