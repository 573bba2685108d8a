mod modals;

use std::{
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use eframe::egui;
use modals::Modals;

use super::{
    card_view::{
        CardAction,
        CardView,
    },
    file_modal::FileModalAction,
    message_overlay::MessageOverlay,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    api::{
        FlashcardApi,
        HttpApi,
    },
    core::{
        availability::{
            AvailabilityMonitor,
            ServerStatus,
        },
        default_deck::{
            default_deck,
            DEFAULT_DECK_NAME,
        },
        loader::{
            DeckLoader,
            LoadOutcome,
        },
        tasks::{
            TaskManager,
            TaskResult,
        },
        Directory,
        QuizError,
        QuizSession,
    },
    settings::Settings,
};

pub struct FlashcardApp {
    // Quiz state
    session: QuizSession,
    loader: DeckLoader,

    // Configuration
    settings: Settings,

    // UI State
    server_status: ServerStatus,
    theme: Theme,
    message_overlay: MessageOverlay,
    modals: Modals,

    // Backend
    task_manager: TaskManager,
    last_keep_alive: Instant,
}

impl FlashcardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Result<Self, QuizError> {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let api = Arc::new(HttpApi::new(settings.api_url())?);
        let mut app = Self::with_api(api, settings)?;
        app.task_manager.set_repaint_context(cc.egui_ctx.clone());

        let theme = Theme::default();
        set_theme(&cc.egui_ctx, &theme);
        app.theme = theme;

        Ok(app)
    }

    /// Builds the app around `api` with the bundled deck loaded and a first
    /// keep-alive ping in flight.
    pub fn with_api(api: Arc<dyn FlashcardApi>, settings: Settings) -> Result<Self, QuizError> {
        let task_manager = TaskManager::new(api)?;
        let mut session = QuizSession::new(settings.max_incorrect_attempts);

        match default_deck().and_then(|cards| session.replace_deck(&cards, DEFAULT_DECK_NAME)) {
            Ok(()) => log::info!(
                "Loaded bundled deck {} ({} cards)",
                DEFAULT_DECK_NAME,
                session.repository().len()
            ),
            Err(e) => log::error!("Failed to load bundled deck: {}", e),
        }

        task_manager.keep_alive();

        Ok(Self {
            session,
            loader: DeckLoader::new(),
            settings,
            server_status: ServerStatus::Unknown,
            theme: Theme::default(),
            message_overlay: MessageOverlay::new(),
            modals: Modals::default(),
            task_manager,
            last_keep_alive: Instant::now(),
        })
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn server_status(&self) -> &ServerStatus {
        &self.server_status
    }

    fn keep_alive_interval(&self) -> Duration {
        Duration::from_secs(self.settings.keep_alive_minutes.max(1) * 60)
    }

    fn monitor_for(&self, gated: bool) -> Option<AvailabilityMonitor> {
        gated.then(|| AvailabilityMonitor::new(self.settings.availability))
    }

    fn schedule_keep_alive(&mut self, ctx: &egui::Context) {
        let interval = self.keep_alive_interval();
        let elapsed = self.last_keep_alive.elapsed();

        if elapsed >= interval {
            log::debug!("Sending keep-alive ping");
            self.task_manager.keep_alive();
            self.last_keep_alive = Instant::now();
            ctx.request_repaint_after(interval);
        } else {
            ctx.request_repaint_after(interval - elapsed);
        }
    }
}

impl eframe::App for FlashcardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        self.schedule_keep_alive(ctx);

        if let Some(action) =
            TopBar::show(ctx, &self.theme, self.session.deck_name(), &self.server_status)
        {
            match action {
                TopBarAction::ManageFiles => {
                    let action = self.modals.file.open_dialog(self.settings.default_directory);
                    self.handle_file_action(action);
                }
                TopBarAction::OpenSettings => {
                    self.modals.settings.open_settings(self.settings.clone());
                }
            }
        }

        let image_uri = self
            .session
            .current_card()
            .and_then(|card| card.image_url.as_deref())
            .map(|url| self.task_manager.api().image_url(url));

        let card_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                CardView::show(ui, &self.theme, &mut self.session, image_uri.as_deref())
            })
            .inner;

        if let Some(action) = card_action {
            self.handle_card_action(action, image_uri);
        }

        if let Some(action) = self.modals.file.show(ctx, &self.theme, &self.server_status) {
            self.handle_file_action(action);
        }

        self.modals.image.show(ctx);
        self.modals.pronunciation.show(ctx, &self.theme, &self.server_status);

        if let Some(settings) = self.modals.settings.show(ctx, &self.theme) {
            self.apply_settings(settings);
        }

        self.message_overlay.show(ctx, &self.theme, &self.server_status);
        self.modals.error.show(ctx);
    }
}

impl FlashcardApp {
    fn handle_card_action(&mut self, action: CardAction, image_uri: Option<String>) {
        match action {
            CardAction::Submit => {
                let grade = self.session.submit();
                log::debug!("Answer graded {:?}: {}", grade, self.session.game().feedback().text());
            }
            CardAction::SelectHint(hint) => {
                let grade = self.session.select_hint(&hint);
                log::debug!(
                    "Hint {} graded {:?}: {}",
                    hint,
                    grade,
                    self.session.game().feedback().text()
                );
            }
            CardAction::ToggleHints => self.session.toggle_hints(),
            CardAction::Pronounce => {
                let Some(card) = self.session.current_card() else {
                    return;
                };
                let name = card.scientific_name.clone();
                self.modals.pronunciation.begin(name.as_str());

                let monitor = self.monitor_for(self.settings.probe_policy.gates_pronunciation());
                self.task_manager.fetch_pronunciation(name, monitor);
            }
            CardAction::NextCard => {
                if let Err(e) = self.session.next_card() {
                    log::warn!("Cannot advance: {}", e);
                }
            }
            CardAction::RestartDeck => self.session.restart_deck(),
            CardAction::OpenLargeImage => {
                if let (Some(card), Some(uri)) = (self.session.current_card(), image_uri) {
                    self.modals.image.open_for(card, uri);
                }
            }
        }
    }

    fn handle_file_action(&mut self, action: FileModalAction) {
        match action {
            FileModalAction::Refresh(directory) => {
                // Listing is the one call that always waits for the server
                let monitor = self.monitor_for(true);
                self.task_manager.list_files(directory, monitor);
            }
            FileModalAction::Select { filename, directory } => {
                self.load_deck(filename, directory);
            }
            FileModalAction::Upload(path) => {
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("upload.csv")
                    .to_string();
                self.modals.file.set_uploading(&file_name);
                self.task_manager.upload_csv(path, Directory::Uploads);
            }
        }
    }

    fn load_deck(&mut self, filename: String, directory: Directory) {
        self.message_overlay.set_message(format!("Loading {}...", filename));
        let request = self.loader.begin(filename, directory);
        let monitor = self.monitor_for(self.settings.probe_policy.gates_deck_load());
        self.task_manager.load_deck(request, monitor);
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::ServerStatus { deck_load, status } => {
                if let Some(generation) = deck_load.filter(|g| !self.loader.is_current_generation(*g)) {
                    log::debug!("Ignoring {:?} from superseded deck load #{}", status, generation);
                    return;
                }
                self.server_status = status;
            }
            TaskResult::KeepAlive(result) => {
                if result.is_ok() && !self.server_status.is_busy() {
                    self.server_status = ServerStatus::Available;
                }
            }
            TaskResult::FileList { directory, result } => {
                self.modals.file.set_files(directory, result);
            }
            TaskResult::Upload { file_name, result } => {
                match &result {
                    Ok(()) => log::info!("Uploaded {}", file_name),
                    Err(e) => log::error!("Error uploading {}: {}", file_name, e),
                }
                if let Some(action) = self.modals.file.upload_finished(&file_name, &result) {
                    self.handle_file_action(action);
                }
            }
            TaskResult::DeckLoaded(load) => match self.loader.apply(&mut self.session, load) {
                LoadOutcome::Applied { name, cards } => {
                    log::info!("Loaded deck {} ({} cards)", name, cards);
                    self.message_overlay.clear_message();
                    self.modals.file.close_dialog();
                    self.modals.image.close();
                    self.modals.pronunciation.close();
                }
                LoadOutcome::Stale => {}
                LoadOutcome::Failed(e) => {
                    self.message_overlay.clear_message();
                    let message = match &e {
                        QuizError::EmptyDeck => "The selected file has no cards.",
                        QuizError::NetworkUnavailable { .. } => {
                            "Server is currently offline. Please try again in a few minutes."
                        }
                        _ => "Failed to load the selected file.",
                    };
                    self.modals.file.set_message(message);
                    self.modals.error.show_quiz_error("Deck not loaded", message, &e);
                }
            },
            TaskResult::Pronunciation { scientific_name, result } => {
                self.modals.pronunciation.finish(&scientific_name, result);
            }
        }
    }

    fn apply_settings(&mut self, settings: Settings) {
        if settings.api_url() != self.settings.api_url() {
            match HttpApi::new(settings.api_url()) {
                Ok(api) => {
                    log::info!("Switching backend to {}", api.base_url());
                    self.task_manager.set_api(Arc::new(api));
                    self.server_status = ServerStatus::Unknown;
                    self.task_manager.keep_alive();
                    self.last_keep_alive = Instant::now();
                }
                Err(e) => {
                    self.modals.error.show_quiz_error(
                        "Invalid API URL",
                        "The backend address could not be used.",
                        &e,
                    );
                    return;
                }
            }
        }

        self.session.game_mut().set_max_attempts(settings.max_incorrect_attempts);
        self.settings = settings;

        if let Err(e) = self.settings.save() {
            self.modals.error.show_quiz_error("Settings not saved", "Could not write settings.", &e);
        }
    }
}
