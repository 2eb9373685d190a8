use std::{path::PathBuf, time::Duration};

mod backend;

use backend::{spawn_backend_thread, BackendCommand, HistorySnapshot, UiEvent, UploadSnapshot};
use client_core::{DetailState, WorkspaceView};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use eframe::egui;
use shared::{
    domain::ResumeId,
    protocol::{AnalysisResult, LlmAnalysis},
};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    spawn_backend_thread(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Smart Resume Analyzer")
            .with_inner_size([1080.0, 760.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Smart Resume Analyzer",
        options,
        Box::new(|_cc| Ok(Box::new(AnalyzerApp::new(cmd_tx, ui_rx)))),
    )
}

struct AnalyzerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    active_tab: WorkspaceView,
    upload: UploadSnapshot,
    history: HistorySnapshot,
    pending_delete: Option<(ResumeId, String)>,
    status: String,
}

impl AnalyzerApp {
    fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            active_tab: WorkspaceView::Upload,
            upload: UploadSnapshot::default(),
            history: HistorySnapshot::default(),
            pending_delete: None,
            status: String::new(),
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.status = "Command queue is full; please retry".to_string();
            }
            Err(TrySendError::Disconnected(_)) => {
                self.status =
                    "Backend worker disconnected; restart the application".to_string();
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::UploadState(snapshot) => self.upload = snapshot,
                UiEvent::HistoryState(snapshot) => self.history = snapshot,
                UiEvent::BackendFailure(message) => self.status = message,
            }
        }
    }

    fn nav_bar(&mut self, ui: &mut egui::Ui) {
        let mut switched: Option<WorkspaceView> = None;
        ui.horizontal(|ui| {
            ui.heading("Smart Resume Analyzer");
            ui.separator();
            if ui
                .selectable_label(self.active_tab == WorkspaceView::Upload, "Upload Resume")
                .clicked()
            {
                switched = Some(WorkspaceView::Upload);
            }
            if ui
                .selectable_label(self.active_tab == WorkspaceView::History, "View History")
                .clicked()
            {
                switched = Some(WorkspaceView::History);
            }
        });
        if let Some(view) = switched {
            self.active_tab = view;
            self.dispatch(BackendCommand::ActivateView(view));
        }
    }

    fn upload_tab(&mut self, ui: &mut egui::Ui) {
        let mut pending: Vec<BackendCommand> = Vec::new();

        if let Some(result) = self.upload.result.clone() {
            ui.horizontal(|ui| {
                ui.heading("Analysis Complete");
                if ui.button("Upload Another Resume").clicked() {
                    pending.push(BackendCommand::ResetUpload);
                }
            });
            ui.separator();
            show_analysis(ui, &result);
        } else {
            ui.heading("Upload Your Resume");
            ui.label("Drag and drop or select a PDF file to get an instant AI-powered analysis.");
            ui.add_space(8.0);

            egui::Frame::group(ui.style()).show(ui, |ui| {
                match self.upload.selected_filename.clone() {
                    Some(filename) => {
                        ui.horizontal(|ui| {
                            ui.strong(filename);
                            if ui.small_button("✖").on_hover_text("Remove file").clicked() {
                                pending.push(BackendCommand::RemoveFile);
                            }
                        });
                        let analyze = ui.add_enabled(
                            !self.upload.submitting,
                            egui::Button::new(if self.upload.submitting {
                                "Analyzing..."
                            } else {
                                "Analyze Resume"
                            }),
                        );
                        if analyze.clicked() {
                            pending.push(BackendCommand::Submit);
                        }
                    }
                    None => {
                        if ui.button("Select PDF").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("PDF documents", &["pdf"])
                                .pick_file()
                            {
                                pending.push(BackendCommand::SelectFile { path });
                            }
                        }
                        ui.label("or drag and drop it here");
                    }
                }
            });

            if self.upload.submitting {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Analyzing...");
                });
            }
        }

        if let Some(error) = &self.upload.error {
            ui.add_space(6.0);
            ui.colored_label(egui::Color32::LIGHT_RED, error);
        }

        for cmd in pending {
            self.dispatch(cmd);
        }
    }

    fn history_tab(&mut self, ui: &mut egui::Ui) {
        let mut pending: Vec<BackendCommand> = Vec::new();

        ui.heading("Submission History");
        if let Some(error) = &self.history.error {
            ui.colored_label(egui::Color32::LIGHT_RED, error);
        }

        if self.history.loading && self.history.records.is_empty() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading submission history...");
            });
        } else if self.history.records.is_empty() {
            ui.label("You have not analyzed any resumes yet.");
        } else {
            egui::Grid::new("history_table")
                .num_columns(4)
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Filename");
                    ui.strong("Name");
                    ui.strong("Uploaded At");
                    ui.strong("Actions");
                    ui.end_row();

                    for record in &self.history.records {
                        ui.label(&record.filename);
                        ui.label(record.name.as_deref().unwrap_or("N/A"));
                        ui.label(record.uploaded_at.format("%Y-%m-%d %H:%M").to_string());
                        ui.horizontal(|ui| {
                            if ui.button("View Details").clicked() {
                                pending.push(BackendCommand::SelectDetail(record.id));
                            }
                            if ui.button("🗑 Delete").clicked() {
                                self.pending_delete =
                                    Some((record.id, record.filename.clone()));
                            }
                        });
                        ui.end_row();
                    }
                });
        }

        for cmd in pending {
            self.dispatch(cmd);
        }
    }

    fn detail_window(&mut self, ctx: &egui::Context) {
        if self.history.detail == DetailState::Unselected {
            return;
        }
        let detail = self.history.detail.clone();
        let mut close = false;

        egui::Window::new("Resume Details")
            .collapsible(false)
            .resizable(true)
            .show(ctx, |ui| {
                if ui.button("Close").clicked() {
                    close = true;
                }
                ui.separator();
                match &detail {
                    DetailState::Unselected => {}
                    DetailState::Resolving(_) => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading...");
                        });
                    }
                    DetailState::Resolved(_, analysis) => show_analysis(ui, analysis),
                    DetailState::ResolveError(_, message) => {
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                }
            });

        if close {
            self.dispatch(BackendCommand::ClearDetail);
        }
    }

    fn confirm_delete_window(&mut self, ctx: &egui::Context) {
        let Some((id, filename)) = self.pending_delete.clone() else {
            return;
        };
        let mut decision: Option<bool> = None;

        egui::Window::new("Confirm Deletion")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Are you sure you want to delete the resume \"{filename}\"?"
                ));
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        decision = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(false);
                    }
                });
            });

        match decision {
            Some(true) => {
                self.pending_delete = None;
                self.dispatch(BackendCommand::DeleteConfirmed { id });
            }
            Some(false) => self.pending_delete = None,
            None => {}
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.active_tab != WorkspaceView::Upload {
            return;
        }
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        // Dropped files run through the same validation as picked ones.
        for path in dropped {
            self.dispatch(BackendCommand::SelectFile { path });
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            self.nav_bar(ui);
        });

        if !self.status.is_empty() {
            let status = self.status.clone();
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.label(status);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.active_tab {
            WorkspaceView::Upload => self.upload_tab(ui),
            WorkspaceView::History => self.history_tab(ui),
        });

        self.detail_window(ctx);
        self.confirm_delete_window(ctx);

        // Poll the backend event queue even while idle.
        ctx.request_repaint_after(Duration::from_millis(150));
    }
}

fn show_analysis(ui: &mut egui::Ui, analysis: &AnalysisResult) {
    let display_name = analysis
        .extracted_data
        .name
        .as_deref()
        .unwrap_or(&analysis.filename);
    ui.heading(format!("Analysis for {display_name}"));

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.strong("Resume Rating:");
        ui.label(format!(
            "{:.0}/{:.0}",
            analysis.llm_analysis.resume_rating,
            LlmAnalysis::RATING_SCALE_MAX
        ));
    });

    ui.add_space(6.0);
    egui::Grid::new("contact_details")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            if let Some(email) = &analysis.extracted_data.email {
                ui.strong("Email");
                ui.label(email);
                ui.end_row();
            }
            if let Some(phone) = &analysis.extracted_data.phone {
                ui.strong("Phone");
                ui.label(phone);
                ui.end_row();
            }
            if let Some(location) = &analysis.extracted_data.location {
                ui.strong("Location");
                ui.label(location);
                ui.end_row();
            }
        });

    if !analysis.extracted_data.core_skills.is_empty() {
        ui.add_space(6.0);
        ui.strong("Core Skills");
        ui.horizontal_wrapped(|ui| {
            for skill in &analysis.extracted_data.core_skills {
                ui.label(egui::RichText::new(skill).code());
            }
        });
    }

    ui.add_space(6.0);
    ui.strong("Improvement Areas");
    ui.label(&analysis.llm_analysis.improvement_areas);

    if !analysis.llm_analysis.upskill_suggestions.is_empty() {
        ui.add_space(6.0);
        ui.strong("Upskill Suggestions");
        for suggestion in &analysis.llm_analysis.upskill_suggestions {
            ui.label(format!("• {}: {}", suggestion.skill, suggestion.reason));
        }
    }
}
