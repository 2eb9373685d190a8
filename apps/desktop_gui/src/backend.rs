//! Bridge between the UI command queue and the backend worker that owns the
//! workflow controllers. The UI never touches the controllers directly; it
//! sends commands and renders the snapshots that come back.

use std::{path::PathBuf, thread};

use client_core::{
    load_settings, CandidateFile, DetailState, HttpResumeGateway, PreConfirmed, ResumeGateway,
    Workspace, WorkspaceView,
};
use crossbeam_channel::{Receiver, Sender};
use shared::{
    domain::ResumeId,
    protocol::{AnalysisResult, ResumeRecord},
};
use tracing::{error, info};

pub enum BackendCommand {
    SelectFile { path: PathBuf },
    RemoveFile,
    Submit,
    ResetUpload,
    ActivateView(WorkspaceView),
    SelectDetail(ResumeId),
    ClearDetail,
    /// The UI confirm dialog already answered yes; see `DeletePrompt`.
    DeleteConfirmed { id: ResumeId },
}

#[derive(Debug, Clone, Default)]
pub struct UploadSnapshot {
    pub selected_filename: Option<String>,
    pub submitting: bool,
    pub error: Option<String>,
    pub result: Option<AnalysisResult>,
}

#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot {
    pub records: Vec<ResumeRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub detail: DetailState,
}

pub enum UiEvent {
    Info(String),
    UploadState(UploadSnapshot),
    HistoryState(HistorySnapshot),
    BackendFailure(String),
}

fn upload_snapshot(workspace: &Workspace) -> UploadSnapshot {
    UploadSnapshot {
        selected_filename: workspace
            .upload
            .selected_file()
            .map(|file| file.filename.clone()),
        submitting: workspace.upload.is_submitting(),
        error: workspace.upload.error().map(str::to_string),
        result: workspace.upload.result().cloned(),
    }
}

fn history_snapshot(workspace: &Workspace) -> HistorySnapshot {
    HistorySnapshot {
        records: workspace.history.records().to_vec(),
        loading: workspace.history.is_loading(),
        error: workspace.history.error().map(str::to_string),
        detail: workspace.history.detail_state().clone(),
    }
}

fn read_candidate(path: &PathBuf) -> Result<CandidateFile, String> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes =
        std::fs::read(path).map_err(|err| format!("could not read {}: {err}", path.display()))?;
    Ok(CandidateFile {
        filename,
        mime_type,
        bytes,
    })
}

pub fn spawn_backend_thread(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailure(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let settings = load_settings();
            info!(base_url = %settings.api_base_url, "backend worker starting");
            let gateway = match HttpResumeGateway::new(&settings) {
                Ok(gateway) => gateway,
                Err(err) => {
                    error!("failed to build http client: {err}");
                    let _ = ui_tx.try_send(UiEvent::BackendFailure(format!(
                        "backend worker startup failure: {err}"
                    )));
                    return;
                }
            };

            let mut workspace = Workspace::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SelectFile { path } => match read_candidate(&path) {
                        Ok(candidate) => workspace.upload.select_file(candidate),
                        Err(message) => {
                            let _ = ui_tx.try_send(UiEvent::BackendFailure(message));
                        }
                    },
                    BackendCommand::RemoveFile => workspace.upload.remove_file(),
                    BackendCommand::Submit => {
                        // Push the in-flight state before awaiting so the UI
                        // can show the spinner.
                        if let Some(file) = workspace.upload.begin_submit() {
                            let _ = ui_tx.try_send(UiEvent::UploadState(upload_snapshot(&workspace)));
                            let result = gateway.submit(&file.filename, file.bytes).await;
                            workspace.upload.complete_submit(result);
                        }
                    }
                    BackendCommand::ResetUpload => workspace.upload.reset(),
                    BackendCommand::ActivateView(view) => {
                        if workspace.set_active_view(view) {
                            let _ =
                                ui_tx.try_send(UiEvent::HistoryState(history_snapshot(&workspace)));
                            workspace.history.load(&gateway).await;
                        }
                    }
                    BackendCommand::SelectDetail(id) => {
                        if let Some(ticket) = workspace.history.begin_detail(id) {
                            let _ =
                                ui_tx.try_send(UiEvent::HistoryState(history_snapshot(&workspace)));
                            let result = gateway.fetch_one(ticket.id()).await;
                            workspace.history.complete_detail(ticket, result);
                        }
                    }
                    BackendCommand::ClearDetail => workspace.history.clear_detail(),
                    BackendCommand::DeleteConfirmed { id } => {
                        workspace.history.delete(&gateway, &PreConfirmed, id).await;
                    }
                }

                let _ = ui_tx.try_send(UiEvent::UploadState(upload_snapshot(&workspace)));
                let _ = ui_tx.try_send(UiEvent::HistoryState(history_snapshot(&workspace)));
            }
        });
    });
}
