use super::{
    shuffle::{
        shuffle,
        shuffle_in_place,
    },
    Card,
    QuizError,
};

/// The deck currently in play. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default)]
pub struct CardRepository {
    cards: Vec<Card>,
    index: usize,
    name: String,
}

impl CardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a freshly shuffled copy of `cards`. An empty input leaves the
    /// current deck in place.
    pub fn replace_deck(&mut self, cards: &[Card], name: impl Into<String>) -> Result<(), QuizError> {
        if cards.is_empty() {
            return Err(QuizError::EmptyDeck);
        }

        self.cards = shuffle(cards);
        self.index = 0;
        self.name = name.into();
        Ok(())
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.index)
    }

    /// Moves to the next card, wrapping to the first after the last.
    pub fn advance(&mut self) -> Result<usize, QuizError> {
        if self.cards.is_empty() {
            return Err(QuizError::EmptyDeck);
        }

        self.index = (self.index + 1) % self.cards.len();
        Ok(self.index)
    }

    /// New random order over the same cards, starting again from the top.
    pub fn restart(&mut self) {
        shuffle_in_place(&mut self.cards, &mut rand::rng());
        self.index = 0;
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
