use eframe::egui;

use crate::{
    core::availability::ServerStatus,
    gui::theme::Theme,
};

/// Dimmed full-window overlay with a spinner, shown while a deck is loading.
pub struct MessageOverlay {
    message: Option<String>,
}

impl MessageOverlay {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn is_active(&self) -> bool {
        self.message.is_some()
    }

    pub fn show(&self, ctx: &egui::Context, theme: &Theme, server_status: &ServerStatus) {
        let Some(message) = &self.message else {
            return;
        };

        egui::Area::new(egui::Id::new("message_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ui.ctx().screen_rect();
                ui.allocate_space(screen_rect.size());
                ui.painter().rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(120));
            });

        egui::Window::new("message_box")
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .fixed_size(egui::Vec2::new(260.0, 110.0))
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label(message);

                    // While the backend is cold-starting, say why this is slow
                    if let Some(status) = server_status.message().filter(|_| server_status.is_busy())
                    {
                        ui.add_space(4.0);
                        ui.label(egui::RichText::new(status).small().color(theme.warning(ctx)));
                    }
                });
            });
    }
}

impl Default for MessageOverlay {
    fn default() -> Self {
        Self::new()
    }
}
