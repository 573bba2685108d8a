use super::{
    parse_cards,
    Card,
    QuizError,
};

pub const DEFAULT_DECK_NAME: &str = "sample-fungi";

const DEFAULT_DECK_JSON: &str = include_str!("../../assets/default_deck.json");

/// Sample deck shipped with the binary so there is something to play before the
/// backend wakes up. It carries names and taxon search links only; photos and
/// observation credits come from server decks.
pub fn default_deck() -> Result<Vec<Card>, QuizError> {
    parse_cards(serde_json::from_str(DEFAULT_DECK_JSON)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute_hints;

    #[test]
    fn test_bundled_deck_parses() {
        let cards = default_deck().unwrap();
        assert_eq!(cards.len(), 11);
        assert_eq!(compute_hints(&cards).len(), 11);
        assert!(cards.iter().all(|c| c.common_name.is_some() && c.taxa_url.is_some()));
    }

    #[test]
    fn test_bundled_deck_claims_no_observations() {
        let cards = default_deck().unwrap();
        assert!(cards.iter().all(|c| {
            c.image_url.is_none() && c.observer_name.is_none() && c.observation_url.is_none()
        }));
    }
}
