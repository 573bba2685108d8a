use std::collections::BTreeSet;

use super::Card;

/// Sorted, de-duplicated scientific names of every card in the deck.
pub fn compute_hints(deck: &[Card]) -> Vec<String> {
    deck.iter()
        .map(|card| card.scientific_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
