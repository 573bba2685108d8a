use eframe::egui;

use super::theme::Theme;
use crate::{
    core::{
        availability::ProbePolicy,
        Directory,
    },
    settings::{
        Settings,
        API_URL_ENV,
    },
};

pub struct SettingsModal {
    open: bool,
    temp: Settings,
    original: Settings,
    error: Option<String>,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, temp: Settings::default(), original: Settings::default(), error: None }
    }

    pub fn open_settings(&mut self, current: Settings) {
        self.temp = current.clone();
        self.original = current;
        self.error = None;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dirty(&self) -> bool {
        self.temp != self.original
    }

    /// Returns the edited settings once they pass validation and are saved.
    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) -> Option<Settings> {
        if !self.open {
            return None;
        }

        let mut result = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(440.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            self.ui_server(ui);
            ui.add_space(8.0);
            self.ui_quiz(ui);
            ui.add_space(10.0);

            if let Some(error) = &self.error {
                ui.colored_label(theme.danger(ui.ctx()), format!("⚠ {}", error));
                ui.add_space(5.0);
            }

            ui.separator();

            let is_dirty = self.is_dirty();
            ui.horizontal(|ui| {
                if is_dirty {
                    ui.colored_label(theme.warning(ui.ctx()), "⚠");
                    ui.label("Settings have been modified");
                } else {
                    ui.label("");
                }
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                let save_clicked =
                    ui.add_enabled(is_dirty, egui::Button::new("Save Settings")).clicked();
                let cancel_clicked = ui.button("Cancel").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Restore Default").clicked();
                });

                if save_clicked {
                    if let Some(saved) = self.try_save() {
                        result = Some(saved);
                        ui.close();
                    }
                } else if cancel_clicked {
                    self.temp = self.original.clone();
                    ui.close();
                } else if reset_clicked {
                    self.restore_defaults();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }

    fn try_save(&mut self) -> Option<Settings> {
        self.temp.api_base_url = self.temp.api_base_url.trim().to_string();
        match self.temp.validate() {
            Ok(()) => {
                self.error = None;
                self.original = self.temp.clone();
                Some(self.temp.clone())
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    fn restore_defaults(&mut self) {
        let env_url = self.temp.api_url_override().map(str::to_string);
        self.temp = Settings::default().with_env_override(env_url);
        self.error = None;
    }

    fn ui_server(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Server").strong());

        if let Some(url) = self.temp.api_url_override() {
            ui.label(
                egui::RichText::new(format!("{} is set; this run uses {}", API_URL_ENV, url))
                    .small()
                    .italics(),
            );
        }

        egui::Grid::new("server_settings_grid").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
            ui.label("API URL:");
            ui.add(egui::TextEdit::singleline(&mut self.temp.api_base_url).desired_width(260.0));
            ui.end_row();

            ui.label("Availability checks:");
            ui.add(egui::DragValue::new(&mut self.temp.availability.max_attempts).range(1..=20));
            ui.end_row();

            ui.label("Delay between checks:");
            ui.add(
                egui::DragValue::new(&mut self.temp.availability.delay_secs)
                    .range(1..=60)
                    .suffix(" s"),
            );
            ui.end_row();

            ui.label("Keep-alive interval:");
            ui.add(
                egui::DragValue::new(&mut self.temp.keep_alive_minutes)
                    .range(1..=120)
                    .suffix(" min"),
            );
            ui.end_row();

            ui.label("Check server before:");
            ui.horizontal(|ui| {
                ui.radio_value(&mut self.temp.probe_policy, ProbePolicy::Always, "every request");
                ui.radio_value(
                    &mut self.temp.probe_policy,
                    ProbePolicy::Opportunistic,
                    "file listing only",
                );
            });
            ui.end_row();
        });
    }

    fn ui_quiz(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Quiz").strong());

        egui::Grid::new("quiz_settings_grid").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
            ui.label("Guesses per card:");
            ui.add(egui::DragValue::new(&mut self.temp.max_incorrect_attempts).range(1..=10));
            ui.end_row();

            ui.label("Default folder:");
            egui::ComboBox::from_id_salt("default_directory")
                .selected_text(self.temp.default_directory.label())
                .show_ui(ui, |ui| {
                    for directory in Directory::ALL {
                        ui.selectable_value(
                            &mut self.temp.default_directory,
                            directory,
                            directory.label(),
                        );
                    }
                });
            ui.end_row();
        });
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_starts_clean() {
        let mut modal = SettingsModal::new();
        let settings = Settings { keep_alive_minutes: 20, ..Settings::default() };
        modal.open_settings(settings);

        assert!(modal.is_open());
        assert!(!modal.is_dirty());

        modal.temp.max_incorrect_attempts = 5;
        assert!(modal.is_dirty());
    }

    #[test]
    fn test_save_rejects_url_without_host() {
        let mut modal = SettingsModal::new();
        modal.open_settings(Settings::default());
        modal.temp.api_base_url = " http:// ".to_string();

        assert!(modal.try_save().is_none());
        assert!(modal.error.is_some());
        assert_eq!(modal.original, Settings::default());

        modal.temp.api_base_url = " https://api.example.org ".to_string();
        let saved = modal.try_save().unwrap();
        assert_eq!(saved.api_base_url, "https://api.example.org");
        assert!(modal.error.is_none());
    }

    #[test]
    fn test_restore_defaults_keeps_env_url() {
        let current = Settings { keep_alive_minutes: 20, ..Settings::default() }
            .with_env_override(Some("https://prod.example.org".into()));
        let mut modal = SettingsModal::new();
        modal.open_settings(current);

        modal.restore_defaults();
        assert_eq!(modal.temp.keep_alive_minutes, Settings::default().keep_alive_minutes);
        assert_eq!(modal.temp.api_url(), "https://prod.example.org");
    }
}
