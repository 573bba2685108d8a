use eframe::egui;
use taxacards::{
    gui::FlashcardApp,
    settings::Settings,
};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("taxacards=info"))
        .init();

    let settings = Settings::load();
    log::info!("Starting with backend {}", settings.api_url());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TaxaCards")
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TaxaCards",
        options,
        Box::new(|cc| Ok(Box::new(FlashcardApp::new(cc, settings)?))),
    )
}
