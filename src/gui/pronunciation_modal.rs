use eframe::egui;

use super::theme::Theme;
use crate::{
    api::Pronunciation,
    core::{
        availability::ServerStatus,
        QuizError,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum PronunciationState {
    Closed,
    Waiting { scientific_name: String },
    Ready { scientific_name: String, text: String },
    Failed { scientific_name: String, message: String },
}

impl PronunciationState {
    fn scientific_name(&self) -> Option<&str> {
        match self {
            PronunciationState::Closed => None,
            PronunciationState::Waiting { scientific_name }
            | PronunciationState::Ready { scientific_name, .. }
            | PronunciationState::Failed { scientific_name, .. } => Some(scientific_name),
        }
    }
}

pub struct PronunciationModal {
    state: PronunciationState,
}

impl PronunciationModal {
    pub fn new() -> Self {
        Self { state: PronunciationState::Closed }
    }

    pub fn state(&self) -> &PronunciationState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != PronunciationState::Closed
    }

    pub fn begin(&mut self, scientific_name: impl Into<String>) {
        self.state = PronunciationState::Waiting { scientific_name: scientific_name.into() };
    }

    pub fn close(&mut self) {
        self.state = PronunciationState::Closed;
    }

    /// Applies a response, ignoring it if the dialog has moved on to another
    /// name or was closed in the meantime.
    pub fn finish(&mut self, scientific_name: &str, result: Result<Pronunciation, QuizError>) -> bool {
        if self.state.scientific_name() != Some(scientific_name) {
            log::debug!("Ignoring pronunciation for {}", scientific_name);
            return false;
        }

        let scientific_name = scientific_name.to_string();
        self.state = match result {
            Ok(pronunciation) => {
                PronunciationState::Ready { scientific_name, text: pronunciation.display_text() }
            }
            Err(e) => {
                log::warn!("Error fetching pronunciation for {}: {}", scientific_name, e);
                let message = match e {
                    QuizError::NetworkUnavailable { .. } => {
                        "Server is currently offline. Please try again in a few minutes."
                    }
                    _ => "Failed to fetch pronunciation. Please try again.",
                };
                PronunciationState::Failed { scientific_name, message: message.to_string() }
            }
        };
        true
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme, server_status: &ServerStatus) {
        let Some(name) = self.state.scientific_name().map(str::to_string) else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("pronunciation_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.label(theme.heading(ui.ctx(), "Pronunciation"));
            ui.label(egui::RichText::new(&name).italics());
            ui.add_space(10.0);

            match &self.state {
                PronunciationState::Waiting { .. } => {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        let message = server_status
                            .message()
                            .filter(|_| server_status.is_busy())
                            .unwrap_or_else(|| "Fetching pronunciation...".to_string());
                        ui.label(message);
                    });
                }
                PronunciationState::Ready { text, .. } => {
                    egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut text.as_str())
                                .desired_width(f32::INFINITY)
                                .code_editor(),
                        );
                    });
                }
                PronunciationState::Failed { message, .. } => {
                    ui.colored_label(theme.danger(ui.ctx()), message);
                }
                PronunciationState::Closed => {}
            }

            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.close();
        }
    }
}

impl Default for PronunciationModal {
    fn default() -> Self {
        Self::new()
    }
}
