use super::{
    availability::{
        AvailabilityMonitor,
        ServerStatus,
    },
    deck_name_from_source,
    Card,
    Directory,
    QuizError,
    QuizSession,
};
use crate::api::FlashcardApi;

/// One deck-load request, tagged with the generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRequest {
    pub generation: u64,
    pub filename: String,
    pub directory: Directory,
}

#[derive(Debug, Clone)]
pub struct LoadedDeck {
    pub name: String,
    pub cards: Vec<Card>,
}

#[derive(Debug)]
pub struct DeckLoadResult {
    pub request: DeckRequest,
    pub result: Result<LoadedDeck, QuizError>,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Applied { name: String, cards: usize },
    /// A newer request was issued after this one; its result was dropped.
    Stale,
    Failed(QuizError),
}

/// Hands out request generations and applies results to the session,
/// ignoring any that a newer request has superseded.
#[derive(Debug, Default)]
pub struct DeckLoader {
    generation: u64,
}

impl DeckLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, filename: impl Into<String>, directory: Directory) -> DeckRequest {
        self.generation += 1;
        DeckRequest { generation: self.generation, filename: filename.into(), directory }
    }

    pub fn is_current(&self, request: &DeckRequest) -> bool {
        self.is_current_generation(request.generation)
    }

    pub fn is_current_generation(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Replaces the session's deck if the result is current and usable.
    /// A failed or stale load leaves the session exactly as it was.
    pub fn apply(&self, session: &mut QuizSession, load: DeckLoadResult) -> LoadOutcome {
        if !self.is_current(&load.request) {
            log::info!(
                "Dropping stale deck load #{} ({}), latest is #{}",
                load.request.generation,
                load.request.filename,
                self.generation
            );
            return LoadOutcome::Stale;
        }

        let deck = match load.result {
            Ok(deck) => deck,
            Err(e) => return LoadOutcome::Failed(e),
        };

        match session.replace_deck(&deck.cards, deck.name.clone()) {
            Ok(()) => {
                log::info!("Loaded deck '{}' with {} cards", deck.name, deck.cards.len());
                LoadOutcome::Applied { name: deck.name, cards: deck.cards.len() }
            }
            Err(e) => LoadOutcome::Failed(e),
        }
    }
}

/// Fetches and validates a deck. Runs off the UI thread; touches no session state.
pub async fn fetch_deck(
    api: &dyn FlashcardApi,
    monitor: Option<AvailabilityMonitor>,
    request: DeckRequest,
    on_status: impl FnMut(ServerStatus) + Send,
) -> DeckLoadResult {
    let result = fetch_cards(api, monitor, &request, on_status).await;
    DeckLoadResult { request, result }
}

async fn fetch_cards(
    api: &dyn FlashcardApi,
    monitor: Option<AvailabilityMonitor>,
    request: &DeckRequest,
    on_status: impl FnMut(ServerStatus) + Send,
) -> Result<LoadedDeck, QuizError> {
    if let Some(monitor) = monitor {
        monitor.ensure_available(api, on_status).await?;
    }

    let cards = api.load_cards(&request.filename, request.directory).await?;
    if cards.is_empty() {
        return Err(QuizError::EmptyDeck);
    }

    Ok(LoadedDeck { name: deck_name_from_source(&request.filename), cards })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(names: &[&str], deck: &str) -> Result<LoadedDeck, QuizError> {
        Ok(LoadedDeck {
            name: deck.to_string(),
            cards: names.iter().map(|n| Card::new(*n, "https://example.org/x.jpg")).collect(),
        })
    }

    #[test]
    fn test_generations_increase() {
        let mut loader = DeckLoader::new();
        let first = loader.begin("a.csv", Directory::MmaForays);
        let second = loader.begin("b.csv", Directory::Uploads);

        assert!(second.generation > first.generation);
        assert!(!loader.is_current(&first));
        assert!(loader.is_current(&second));
    }

    #[test]
    fn test_slow_first_response_cannot_overwrite_newer_deck() {
        let mut loader = DeckLoader::new();
        let mut session = QuizSession::new(3);

        let slow = loader.begin("slow.csv", Directory::MmaForays);
        let fast = loader.begin("fast.csv", Directory::MmaForays);

        let outcome = loader.apply(
            &mut session,
            DeckLoadResult { request: fast, result: loaded(&["Fast one"], "fast") },
        );
        assert!(matches!(outcome, LoadOutcome::Applied { cards: 1, .. }));

        let outcome = loader.apply(
            &mut session,
            DeckLoadResult { request: slow, result: loaded(&["Slow one"], "slow") },
        );
        assert!(matches!(outcome, LoadOutcome::Stale));
        assert_eq!(session.deck_name(), "fast");
        assert_eq!(session.hints(), ["Fast one"]);
    }

    #[test]
    fn test_failed_load_preserves_session() {
        let mut loader = DeckLoader::new();
        let mut session = QuizSession::new(3);
        session
            .replace_deck(&[Card::new("Boletus edulis", "https://example.org/b.jpg")], "current")
            .unwrap();
        session.submit_answer("wrong");

        let request = loader.begin("broken.csv", Directory::Uploads);
        let outcome = loader.apply(
            &mut session,
            DeckLoadResult {
                request,
                result: Err(QuizError::MalformedResponse("expected a list".to_string())),
            },
        );

        assert!(matches!(outcome, LoadOutcome::Failed(QuizError::MalformedResponse(_))));
        assert_eq!(session.deck_name(), "current");
        assert_eq!(session.game().attempts(), 1);
    }
}
