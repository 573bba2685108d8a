use eframe::egui;

use super::modal::{
    Modal,
    ModalConfig,
};
use crate::core::Card;

#[derive(Default)]
pub struct LargeImage {
    uri: String,
    attribution: String,
    observation_url: Option<String>,
}

/// Full-size view of the current card's photo with its iNaturalist credit.
pub struct ImageModal {
    modal: Modal<LargeImage>,
}

impl ImageModal {
    pub fn new() -> Self {
        let config = ModalConfig {
            resizable: true,
            min_size: Some(egui::Vec2::new(420.0, 360.0)),
            ..Default::default()
        };

        Self { modal: Modal::new_with_data("Observation", LargeImage::default()).with_config(config) }
    }

    /// `uri` is the already proxied image address.
    pub fn open_for(&mut self, card: &Card, uri: String) {
        *self.modal.data_mut() = LargeImage {
            uri,
            attribution: card.attribution(),
            observation_url: card.observation_url.clone(),
        };
        self.modal.open();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn close(&mut self) {
        self.modal.close();
        self.forget();
    }

    fn forget(&mut self) {
        *self.modal.data_mut() = LargeImage::default();
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let max_size = ctx.screen_rect().size() * 0.75;

        let closed = self.modal.show(ctx, |ui, image| {
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::Image::new(image.uri.as_str())
                        .max_size(max_size)
                        .maintain_aspect_ratio(true)
                        .show_loading_spinner(true),
                );
            });

            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(&image.attribution).small());
                match &image.observation_url {
                    Some(url) => {
                        ui.hyperlink_to(egui::RichText::new("View on iNaturalist").small(), url);
                    }
                    None => {
                        ui.label(egui::RichText::new("link unavailable").small().weak());
                    }
                }
            });

            ui.add_space(8.0);
            ui.button("Close").clicked()
        });

        if let Some(how) = closed {
            log::debug!("Large image closed ({:?})", how);
            self.forget();
        }
    }
}

impl Default for ImageModal {
    fn default() -> Self {
        Self::new()
    }
}
