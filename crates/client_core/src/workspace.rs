use crate::{gateway::ResumeGateway, history::HistoryController, upload::UploadController};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkspaceView {
    #[default]
    Upload,
    History,
}

/// Top-level view switch. Exactly one controller is active at a time; the two
/// are independent state machines sharing nothing but the gateway.
#[derive(Debug, Default)]
pub struct Workspace {
    view: WorkspaceView,
    pub upload: UploadController,
    pub history: HistoryController,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> WorkspaceView {
        self.view
    }

    /// Switches the active view. Returns true when the history view was
    /// (re)activated and needs a fresh load; the list is never cached across
    /// activations. Switching away aborts nothing: stale completions are
    /// dropped by sequence checks, not teardown.
    pub fn set_active_view(&mut self, view: WorkspaceView) -> bool {
        let activated_history =
            view == WorkspaceView::History && self.view != WorkspaceView::History;
        self.view = view;
        activated_history
    }

    pub async fn activate(&mut self, gateway: &dyn ResumeGateway, view: WorkspaceView) {
        if self.set_active_view(view) {
            self.history.load(gateway).await;
        }
    }
}

#[cfg(test)]
#[path = "tests/workspace_tests.rs"]
mod tests;
