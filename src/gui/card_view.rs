use eframe::egui;

use super::theme::Theme;
use crate::core::{
    game::{
        Feedback,
        NameReveal,
    },
    QuizSession,
};

pub const NO_CARDS_MESSAGE: &str = "No cards available. Please load a file.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Submit,
    SelectHint(String),
    ToggleHints,
    Pronounce,
    NextCard,
    RestartDeck,
    OpenLargeImage,
}

/// Central quiz panel: photo, answer box, controls, feedback and hints.
pub struct CardView;

impl CardView {
    /// `image_uri` is the proxied address of the current card's photo.
    pub fn show(
        ui: &mut egui::Ui,
        theme: &Theme,
        session: &mut QuizSession,
        image_uri: Option<&str>,
    ) -> Option<CardAction> {
        let mut action = None;

        if session.current_card().is_none() {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.label(egui::RichText::new(NO_CARDS_MESSAGE).size(18.0).color(theme.muted(ui.ctx())));
            });
            return None;
        }

        ui.vertical_centered(|ui| {
            if let Some(uri) = image_uri {
                let image = egui::Image::new(uri)
                    .max_height((ui.available_height() * 0.55).max(200.0))
                    .maintain_aspect_ratio(true)
                    .show_loading_spinner(true)
                    .sense(egui::Sense::click());

                if ui.add(image).on_hover_text("Click to enlarge").clicked() {
                    action = Some(CardAction::OpenLargeImage);
                }
            } else {
                // Sample decks carry no photos; quiz on the common name instead
                let prompt = session
                    .current_card()
                    .and_then(|card| card.common_name.as_deref())
                    .unwrap_or("No photo for this card");
                ui.add_space(40.0);
                ui.label(egui::RichText::new(prompt).size(28.0).strong());
                ui.label(egui::RichText::new("Name the species").color(theme.muted(ui.ctx())));
                ui.add_space(40.0);
            }

            ui.add_space(10.0);

            let response = ui.add(
                egui::TextEdit::singleline(session.game_mut().answer_mut())
                    .hint_text("Enter scientific name")
                    .desired_width(320.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = Some(CardAction::Submit);
                response.request_focus();
            }

            ui.add_space(6.0);
            if let Some(clicked) = Self::controls(ui, session) {
                action = Some(clicked);
            }

            ui.add_space(10.0);
            Self::feedback(ui, theme, session.game().feedback());

            if session.hints_visible() {
                ui.add_space(10.0);
                if let Some(hint) = Self::hints(ui, session.hints()) {
                    action = Some(CardAction::SelectHint(hint));
                }
            }
        });

        action
    }

    fn controls(ui: &mut egui::Ui, session: &QuizSession) -> Option<CardAction> {
        let mut action = None;
        let hints_label = if session.hints_visible() { "Hide Hints" } else { "Hints" };

        ui.horizontal(|ui| {
            // Keep the button row centred under the answer box
            let width = 5.0 * 96.0;
            ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));

            if ui.button("Submit").clicked() {
                action = Some(CardAction::Submit);
            }
            if ui.button(hints_label).clicked() {
                action = Some(CardAction::ToggleHints);
            }
            if ui
                .add_enabled(session.game().pronounce_enabled(), egui::Button::new("Pronounce"))
                .clicked()
            {
                action = Some(CardAction::Pronounce);
            }
            if ui.button("Next Card").clicked() {
                action = Some(CardAction::NextCard);
            }
            if ui.button("Restart Deck").clicked() {
                action = Some(CardAction::RestartDeck);
            }
        });

        action
    }

    fn feedback(ui: &mut egui::Ui, theme: &Theme, feedback: &Feedback) {
        let color = match feedback {
            Feedback::None => return,
            Feedback::Correct(_) => theme.success(ui.ctx()),
            Feedback::TryAgain => theme.warning(ui.ctx()),
            Feedback::NoCard | Feedback::Revealed(_) => theme.danger(ui.ctx()),
        };

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label(egui::RichText::new(feedback.prefix()).color(color).strong());
            if let Some(reveal) = feedback.reveal() {
                Self::reveal(ui, reveal);
            }
        });
    }

    fn reveal(ui: &mut egui::Ui, reveal: &NameReveal) {
        let name = |ui: &mut egui::Ui, text: &str| match &reveal.taxa_url {
            Some(url) => {
                ui.hyperlink_to(egui::RichText::new(text).italics(), url);
            }
            None => {
                ui.label(egui::RichText::new(text).italics());
            }
        };

        name(ui, &reveal.scientific_name);
        if let Some(common) = &reveal.common_name {
            ui.label("(");
            name(ui, common);
            ui.label(")");
        }
    }

    fn hints(ui: &mut egui::Ui, hints: &[String]) -> Option<String> {
        let mut selected = None;

        egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for hint in hints {
                    if ui.button(egui::RichText::new(hint).italics()).clicked() {
                        selected = Some(hint.clone());
                    }
                }
            });
        });

        selected
    }
}
