use eframe::egui::{
    self,
    containers,
};

use super::theme::Theme;
use crate::core::availability::ServerStatus;

pub enum TopBarAction {
    ManageFiles,
    OpenSettings,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        theme: &Theme,
        deck_name: &str,
        server_status: &ServerStatus,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.button("Manage Files").clicked() {
                        action = Some(TopBarAction::ManageFiles);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                if ui.button("Settings").clicked() {
                    action = Some(TopBarAction::OpenSettings);
                }

                ui.separator();
                ui.label(theme.heading(ctx, deck_name));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_server_indicator(ui, theme, server_status);
                });
            });
        });

        action
    }

    fn show_server_indicator(ui: &mut egui::Ui, theme: &Theme, status: &ServerStatus) {
        let ctx = ui.ctx().clone();
        let (color, tooltip) = match status {
            ServerStatus::Available => (theme.success(&ctx), "Server is available".to_string()),
            ServerStatus::Unknown => (theme.muted(&ctx), "Server not checked yet".to_string()),
            ServerStatus::Failed { .. } => {
                (theme.danger(&ctx), status.message().unwrap_or_default())
            }
            ServerStatus::Checking | ServerStatus::WarmingUp { .. } => {
                (theme.warning(&ctx), status.message().unwrap_or_default())
            }
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Server").on_hover_text(&tooltip);
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(&tooltip);
        });
    }
}
