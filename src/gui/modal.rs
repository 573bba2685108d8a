use eframe::egui;

/// A window over a dimmed backdrop that owns some per-dialog state `T`.
pub struct Modal<T> {
    open: bool,
    title: String,
    data: T,
    config: ModalConfig,
}

#[derive(Clone)]
pub struct ModalConfig {
    pub resizable: bool,
    pub fixed_size: Option<egui::Vec2>,
    pub min_size: Option<egui::Vec2>,
    pub show_overlay: bool,
    pub close_on_outside_click: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            resizable: false,
            fixed_size: None,
            min_size: Some(egui::Vec2::new(300.0, 160.0)),
            show_overlay: true,
            close_on_outside_click: true,
        }
    }
}

/// How a modal was closed on the frame it closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClose {
    Dismissed,
    OutsideClick,
}

impl<T> Modal<T> {
    pub fn new_with_data(title: impl Into<String>, data: T) -> Self {
        Self { open: false, title: title.into(), data, config: ModalConfig::default() }
    }

    pub fn with_config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Draws the modal if open. `content` returns true to close it; a click on
    /// the backdrop also closes it when configured.
    #[must_use]
    pub fn show<F>(&mut self, ctx: &egui::Context, content: F) -> Option<ModalClose>
    where
        F: FnOnce(&mut egui::Ui, &mut T) -> bool,
    {
        if !self.open {
            return None;
        }

        let mut close_requested = false;
        let close_from_outside_click = self.config.show_overlay && self.show_overlay(ctx);

        let mut window = egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(self.config.resizable)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO);

        if let Some(size) = self.config.fixed_size {
            window = window.fixed_size(size);
        }

        if let Some(min_size) = self.config.min_size {
            window = window.min_size(min_size);
        }

        window.show(ctx, |ui| {
            close_requested = content(ui, &mut self.data);
        });

        let closed = if close_requested {
            Some(ModalClose::Dismissed)
        } else if close_from_outside_click && self.config.close_on_outside_click {
            Some(ModalClose::OutsideClick)
        } else {
            None
        };

        if closed.is_some() {
            self.open = false;
        }
        closed
    }

    fn show_overlay(&self, ctx: &egui::Context) -> bool {
        let area_response = egui::Area::new(egui::Id::new("modal_overlay"))
            .order(egui::Order::Background)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                let (_rect, response) =
                    ui.allocate_exact_size(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(100));
                response.clicked()
            });

        area_response.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame<T>(ctx: &egui::Context, modal: &mut Modal<T>, close: bool) -> Option<ModalClose> {
        let mut closed = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            closed = modal.show(ctx, |_, _| close);
        });
        closed
    }

    #[test]
    fn test_show_reports_dismissal() {
        let ctx = egui::Context::default();
        let mut modal = Modal::new_with_data("Test", 0u32);

        assert_eq!(frame(&ctx, &mut modal, true), None);

        modal.open();
        assert_eq!(frame(&ctx, &mut modal, false), None);
        assert!(modal.is_open());

        assert_eq!(frame(&ctx, &mut modal, true), Some(ModalClose::Dismissed));
        assert!(!modal.is_open());
    }
}
