use super::{
    compute_hints,
    game::{
        GameState,
        Grade,
    },
    Card,
    CardRepository,
    QuizError,
};

/// Deck, hint list and answer state for the card on screen.
///
/// Every method that changes which card is shown also resets the answer
/// state and hides the hints, so nothing from one card leaks into the next.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    repository: CardRepository,
    hints: Vec<String>,
    game: GameState,
    hints_visible: bool,
}

impl QuizSession {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            repository: CardRepository::new(),
            hints: Vec::new(),
            game: GameState::new(max_attempts),
            hints_visible: false,
        }
    }

    /// Swaps in a new deck. On error nothing changes.
    pub fn replace_deck(&mut self, cards: &[Card], name: impl Into<String>) -> Result<(), QuizError> {
        self.repository.replace_deck(cards, name)?;
        self.hints = compute_hints(self.repository.cards());
        self.start_card();
        Ok(())
    }

    pub fn next_card(&mut self) -> Result<usize, QuizError> {
        let index = self.repository.advance()?;
        self.start_card();
        Ok(index)
    }

    pub fn restart_deck(&mut self) {
        self.repository.restart();
        self.hints = compute_hints(self.repository.cards());
        self.start_card();
    }

    fn start_card(&mut self) {
        self.game.reset();
        self.hints_visible = false;
    }

    /// Grades whatever is in the answer box.
    pub fn submit(&mut self) -> Grade {
        self.game.submit(self.repository.current_card())
    }

    pub fn submit_answer(&mut self, candidate: &str) -> Grade {
        self.game.submit_answer(self.repository.current_card(), candidate)
    }

    pub fn select_hint(&mut self, hint: &str) -> Grade {
        self.game.select_hint(self.repository.current_card(), hint)
    }

    pub fn toggle_hints(&mut self) {
        self.hints_visible = !self.hints_visible;
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.repository.current_card()
    }

    pub fn deck_name(&self) -> &str {
        self.repository.name()
    }

    pub fn repository(&self) -> &CardRepository {
        &self.repository
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn hints_visible(&self) -> bool {
        self.hints_visible
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }
}
