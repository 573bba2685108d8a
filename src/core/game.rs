use super::Card;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Outcome of a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Correct,
    IncorrectRetry,
    IncorrectFinal,
    NoCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    AwaitingInput,
    Correct,
    IncorrectFinal,
    NoCard,
}

impl Phase {
    /// Correct and IncorrectFinal end grading for the current card.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Correct | Phase::IncorrectFinal)
    }
}

/// The answer as it should be shown once it is known to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameReveal {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub taxa_url: Option<String>,
}

impl From<&Card> for NameReveal {
    fn from(card: &Card) -> Self {
        Self {
            scientific_name: card.scientific_name.clone(),
            common_name: card.common_name.clone(),
            taxa_url: card.taxa_url.clone(),
        }
    }
}

impl NameReveal {
    fn plain(&self) -> String {
        match &self.common_name {
            Some(common) => format!("{} ({})", self.scientific_name, common),
            None => self.scientific_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    NoCard,
    TryAgain,
    Correct(NameReveal),
    Revealed(NameReveal),
}

impl Feedback {
    pub fn is_empty(&self) -> bool {
        matches!(self, Feedback::None)
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Feedback::None => "",
            Feedback::NoCard => "No card available.",
            Feedback::TryAgain => "Incorrect. Try again!",
            Feedback::Correct(_) => "Correct!",
            Feedback::Revealed(_) => "Incorrect. The correct name is:",
        }
    }

    pub fn reveal(&self) -> Option<&NameReveal> {
        match self {
            Feedback::Correct(reveal) | Feedback::Revealed(reveal) => Some(reveal),
            _ => None,
        }
    }

    pub fn text(&self) -> String {
        match self.reveal() {
            Some(reveal) => format!("{} {}", self.prefix(), reveal.plain()),
            None => self.prefix().to_string(),
        }
    }

}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn is_match(candidate: &str, scientific_name: &str) -> bool {
    normalize(candidate) == normalize(scientific_name)
}

/// Per-card answer state. Must be reset whenever the displayed card changes.
#[derive(Debug, Clone)]
pub struct GameState {
    answer: String,
    attempts: u32,
    feedback: Feedback,
    pronounce_enabled: bool,
    phase: Phase,
    max_attempts: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl GameState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            answer: String::new(),
            attempts: 0,
            feedback: Feedback::None,
            pronounce_enabled: false,
            phase: Phase::AwaitingInput,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Grades the text currently in the answer box.
    pub fn submit(&mut self, card: Option<&Card>) -> Grade {
        let candidate = self.answer.clone();
        self.submit_answer(card, &candidate)
    }

    pub fn submit_answer(&mut self, card: Option<&Card>, candidate: &str) -> Grade {
        let Some(card) = card else {
            self.feedback = Feedback::NoCard;
            self.phase = Phase::NoCard;
            return Grade::NoCard;
        };

        match self.phase {
            Phase::Correct => return Grade::Correct,
            Phase::IncorrectFinal => return Grade::IncorrectFinal,
            Phase::AwaitingInput | Phase::NoCard => {}
        }

        if is_match(candidate, &card.scientific_name) {
            self.feedback = Feedback::Correct(NameReveal::from(card));
            self.pronounce_enabled = true;
            self.phase = Phase::Correct;
            return Grade::Correct;
        }

        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            self.feedback = Feedback::Revealed(NameReveal::from(card));
            self.pronounce_enabled = true;
            self.phase = Phase::IncorrectFinal;
            Grade::IncorrectFinal
        } else {
            self.feedback = Feedback::TryAgain;
            self.phase = Phase::AwaitingInput;
            Grade::IncorrectRetry
        }
    }

    /// Puts the hint in the answer box and grades it like typed input.
    pub fn select_hint(&mut self, card: Option<&Card>, hint: &str) -> Grade {
        self.answer = hint.to_string();
        self.submit_answer(card, hint)
    }

    pub fn reset(&mut self) {
        self.answer.clear();
        self.attempts = 0;
        self.feedback = Feedback::None;
        self.pronounce_enabled = false;
        self.phase = Phase::AwaitingInput;
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn answer_mut(&mut self) -> &mut String {
        &mut self.answer
    }

    pub fn set_answer(&mut self, answer: impl Into<String>) {
        self.answer = answer.into();
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn pronounce_enabled(&self) -> bool {
        self.pronounce_enabled
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn set_max_attempts(&mut self, max_attempts: u32) {
        self.max_attempts = max_attempts.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lion() -> Card {
        Card::new("Panthera leo", "https://example.org/leo.jpg")
            .with_common_name("Lion")
            .with_taxa_url("https://www.inaturalist.org/taxa/41964")
    }

    #[test]
    fn test_grading_ignores_case_and_surrounding_whitespace() {
        let card = lion();

        let mut game = GameState::default();
        assert_eq!(game.submit_answer(Some(&card), "Panthera Leo "), Grade::Correct);

        let mut game = GameState::default();
        assert_eq!(game.submit_answer(Some(&card), "panthera leo"), Grade::Correct);

        let mut game = GameState::default();
        assert_eq!(game.submit_answer(Some(&card), "  PANTHERA LEO\t"), Grade::Correct);
        assert!(game.pronounce_enabled());
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn test_attempt_escalation() {
        let card = Card::new("Vulpes vulpes", "https://example.org/fox.jpg");
        let mut game = GameState::default();

        let mut grades = Vec::new();
        let mut pronounce = Vec::new();
        for guess in ["a", "b", "c"] {
            grades.push(game.submit_answer(Some(&card), guess));
            pronounce.push(game.pronounce_enabled());
        }

        assert_eq!(grades, vec![Grade::IncorrectRetry, Grade::IncorrectRetry, Grade::IncorrectFinal]);
        assert_eq!(pronounce, vec![false, false, true]);
        assert_eq!(game.attempts(), 3);
        assert_eq!(game.phase(), Phase::IncorrectFinal);
        assert_eq!(game.feedback().text(), "Incorrect. The correct name is: Vulpes vulpes");
    }

    #[test]
    fn test_configurable_threshold() {
        let card = lion();
        let mut game = GameState::new(1);
        assert_eq!(game.submit_answer(Some(&card), "Felis catus"), Grade::IncorrectFinal);
    }

    #[test]
    fn test_terminal_card_ignores_further_submissions() {
        let card = lion();
        let mut game = GameState::default();
        game.submit_answer(Some(&card), "panthera leo");

        assert_eq!(game.submit_answer(Some(&card), "wrong"), Grade::Correct);
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn test_no_card_is_a_noop_with_feedback() {
        let mut game = GameState::default();
        assert_eq!(game.submit_answer(None, "anything"), Grade::NoCard);
        assert_eq!(game.feedback().text(), "No card available.");
        assert_eq!(game.attempts(), 0);
        assert!(!game.pronounce_enabled());
    }

    #[test]
    fn test_select_hint_fills_answer_and_grades() {
        let card = lion();
        let mut game = GameState::default();

        assert_eq!(game.select_hint(Some(&card), "Vulpes vulpes"), Grade::IncorrectRetry);
        assert_eq!(game.answer(), "Vulpes vulpes");

        assert_eq!(game.select_hint(Some(&card), "Panthera leo"), Grade::Correct);
        assert_eq!(game.answer(), "Panthera leo");
    }

    #[test]
    fn test_reset_clears_everything() {
        let card = lion();
        let mut game = GameState::default();
        game.set_answer("x");
        game.submit(Some(&card));
        game.submit_answer(Some(&card), "y");
        game.submit_answer(Some(&card), "z");
        assert!(game.pronounce_enabled());

        game.reset();
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.answer(), "");
        assert_eq!(game.feedback().text(), "");
        assert!(game.feedback().is_empty());
        assert!(!game.pronounce_enabled());
        assert_eq!(game.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn test_feedback_carries_linkable_names() {
        let card = lion();
        let mut game = GameState::default();
        game.submit_answer(Some(&card), "Panthera leo");

        let reveal = game.feedback().reveal().unwrap();
        assert_eq!(reveal.taxa_url.as_deref(), Some("https://www.inaturalist.org/taxa/41964"));
        assert_eq!(game.feedback().prefix(), "Correct!");
        assert_eq!(game.feedback().text(), "Correct! Panthera leo (Lion)");
    }

    #[test]
    fn test_revealed_feedback_without_common_name() {
        let card = Card::new("Morchella esculenta", "https://example.org/m.jpg");
        let mut game = GameState::new(1);
        game.submit_answer(Some(&card), "nope");

        assert!(game.feedback().reveal().unwrap().taxa_url.is_none());
        assert_eq!(
            game.feedback().text(),
            "Incorrect. The correct name is: Morchella esculenta"
        );
    }
}
