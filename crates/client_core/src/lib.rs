//! Client-side workflow core for the resume analyzer service: a typed HTTP
//! gateway plus the upload and history controllers that keep view state
//! consistent with the remote service.

pub mod config;
pub mod detail;
pub mod error;
pub mod gateway;
pub mod history;
pub mod upload;
pub mod workspace;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

pub use config::{load_settings, Settings};
pub use detail::{DetailResolver, DetailState, DetailTicket};
pub use error::ServiceError;
pub use gateway::{HttpResumeGateway, ResumeGateway};
pub use history::{DeletePrompt, HistoryController, LoadTicket, PreConfirmed};
pub use upload::{CandidateFile, UploadController, UploadPhase};
pub use workspace::{Workspace, WorkspaceView};
