use std::path::PathBuf;

use eframe::egui;
use rfd::FileDialog;

use super::{
    modal::{
        Modal,
        ModalConfig,
    },
    theme::Theme,
};
use crate::core::{
    availability::ServerStatus,
    Directory,
    QuizError,
};

#[derive(Default)]
pub struct FileBrowserData {
    directory: Directory,
    files: Vec<String>,
    busy: bool,
    status: Option<String>,
    notice: Option<String>,
}

pub enum FileModalAction {
    Refresh(Directory),
    Select { filename: String, directory: Directory },
    Upload(PathBuf),
}

/// Lists the decks stored on the backend and lets the user pick or upload one.
pub struct FileModal {
    modal: Modal<FileBrowserData>,
}

fn listing_error_message(error: &QuizError) -> String {
    match error {
        QuizError::NetworkUnavailable { .. } => {
            "Server is currently offline. Please try again in a few minutes.".to_string()
        }
        e if e.is_connectivity() => {
            "Server is starting up. Please wait a moment and try again...".to_string()
        }
        _ => "Unable to fetch files. Please try again.".to_string(),
    }
}

impl FileModal {
    pub fn new() -> Self {
        let config = ModalConfig {
            fixed_size: Some(egui::Vec2::new(500.0, 380.0)),
            ..Default::default()
        };

        Self {
            modal: Modal::new_with_data("File Management", FileBrowserData::default())
                .with_config(config),
        }
    }

    /// Opens on `directory` and returns the listing that needs fetching.
    pub fn open_dialog(&mut self, directory: Directory) -> FileModalAction {
        let data = self.modal.data_mut();
        data.directory = directory;
        data.notice = None;
        self.modal.open();
        self.begin_refresh(directory)
    }

    fn begin_refresh(&mut self, directory: Directory) -> FileModalAction {
        let data = self.modal.data_mut();
        data.directory = directory;
        data.files.clear();
        data.busy = true;
        data.status = None;
        FileModalAction::Refresh(directory)
    }

    pub fn directory(&self) -> Directory {
        self.modal.data().directory
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn close_dialog(&mut self) {
        self.modal.close();
        self.clear_messages();
    }

    fn clear_messages(&mut self) {
        let data = self.modal.data_mut();
        data.status = None;
        data.notice = None;
    }

    pub fn set_files(&mut self, directory: Directory, result: Result<Vec<String>, QuizError>) {
        let data = self.modal.data_mut();
        if directory != data.directory {
            return;
        }

        data.busy = false;
        match result {
            Ok(files) => {
                data.files = files;
                data.status = None;
            }
            Err(e) => {
                log::warn!("Error fetching files from {}: {}", directory.as_str(), e);
                data.status = Some(listing_error_message(&e));
            }
        }
    }

    pub fn set_uploading(&mut self, file_name: &str) {
        let data = self.modal.data_mut();
        data.busy = true;
        data.notice = None;
        data.status = Some(format!("Uploading {}...", file_name));
    }

    /// Re-lists the uploads folder after a successful upload.
    pub fn upload_finished(&mut self, file_name: &str, result: &Result<(), QuizError>) -> Option<FileModalAction> {
        match result {
            Ok(()) => {
                let action = self.begin_refresh(Directory::Uploads);
                self.modal.data_mut().notice = Some(format!("{} uploaded successfully", file_name));
                Some(action)
            }
            Err(e) => {
                let data = self.modal.data_mut();
                data.busy = false;
                data.status = Some(if e.is_connectivity() {
                    "Server is starting up. Please try again in a moment.".to_string()
                } else {
                    "File upload failed".to_string()
                });
                None
            }
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        let data = self.modal.data_mut();
        data.busy = false;
        data.status = Some(message.into());
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        theme: &Theme,
        server_status: &ServerStatus,
    ) -> Option<FileModalAction> {
        let mut action = None;

        let closed = self.modal.show(ctx, |ui, data| {
            let server_message = server_status.message().filter(|_| data.busy);
            if let Some(message) = server_message.as_ref().or(data.status.as_ref()) {
                ui.colored_label(theme.danger(ui.ctx()), message);
                ui.add_space(6.0);
            }

            if let Some(notice) = &data.notice {
                ui.colored_label(theme.success(ui.ctx()), notice);
                ui.add_space(6.0);
            }

            if data.busy {
                ui.vertical_centered(|ui| ui.add(egui::Spinner::new()));
            } else {
                if ui.button("Upload CSV…").clicked() {
                    if let Some(path) = FileDialog::new().add_filter("CSV files", &["csv"]).pick_file() {
                        action = Some(FileModalAction::Upload(path));
                    }
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    for directory in Directory::ALL {
                        let selected = data.directory == directory;
                        if ui.selectable_label(selected, directory.label()).clicked() && !selected {
                            action = Some(FileModalAction::Refresh(directory));
                        }
                    }
                });

                ui.separator();
                egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    if data.files.is_empty() && data.status.is_none() {
                        ui.label(egui::RichText::new("No decks in this folder").color(theme.muted(ui.ctx())));
                    }

                    for file in &data.files {
                        ui.horizontal(|ui| {
                            ui.label(file);
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.button("Select").clicked() {
                                    action = Some(FileModalAction::Select {
                                        filename: file.clone(),
                                        directory: data.directory,
                                    });
                                }
                            });
                        });
                    }
                });
            }

            ui.add_space(10.0);
            ui.button("Close").clicked()
        });

        if let Some(how) = closed {
            log::debug!("File browser closed ({:?})", how);
            self.clear_messages();
        }

        if let Some(FileModalAction::Refresh(directory)) = action {
            return Some(self.begin_refresh(directory));
        }

        action
    }
}

impl Default for FileModal {
    fn default() -> Self {
        Self::new()
    }
}
