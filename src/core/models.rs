use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use super::QuizError;

/// One quiz unit: an observation photo, when the deck has one, and the name it
/// must be graded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub image_url: Option<String>,
    pub taxa_url: Option<String>,
    pub observer_name: Option<String>,
    pub observation_year: Option<String>,
    pub observation_url: Option<String>,
}

impl Card {
    pub fn new(scientific_name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            common_name: None,
            image_url: Some(image_url.into()),
            taxa_url: None,
            observer_name: None,
            observation_year: None,
            observation_url: None,
        }
    }

    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = Some(common_name.into());
        self
    }

    pub fn with_taxa_url(mut self, taxa_url: impl Into<String>) -> Self {
        self.taxa_url = Some(taxa_url.into());
        self
    }

    /// "Observer, 2021. iNaturalist observation: "
    pub fn attribution(&self) -> String {
        format!(
            "{}, {}. iNaturalist observation: ",
            self.observer_name.as_deref().unwrap_or("Unknown observer"),
            self.observation_year.as_deref().unwrap_or("n.d."),
        )
    }
}

/// Card record as it arrives from the backend or the bundled data file.
///
/// Every field is optional here so that a missing key is reported as a
/// malformed record rather than a generic JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCard {
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub image_url: Option<String>,
    pub taxa_url: Option<String>,
    pub observer_name: Option<String>,
    pub observation_year: Option<serde_json::Value>,
    pub observation_url: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl TryFrom<RawCard> for Card {
    type Error = QuizError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        let scientific_name = non_empty(raw.scientific_name).ok_or_else(|| {
            QuizError::MalformedResponse("card is missing scientific_name".to_string())
        })?;

        // CSV-backed decks send the year as either a number or a string
        let observation_year = match raw.observation_year {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => non_empty(Some(s)),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            Some(other) => {
                return Err(QuizError::MalformedResponse(format!(
                    "card '{}' has invalid observation_year: {}",
                    scientific_name, other
                )))
            }
        };

        Ok(Card {
            scientific_name,
            common_name: non_empty(raw.common_name),
            image_url: non_empty(raw.image_url),
            taxa_url: non_empty(raw.taxa_url),
            observer_name: non_empty(raw.observer_name),
            observation_year,
            observation_url: non_empty(raw.observation_url),
        })
    }
}

/// Parses a JSON array of card records, rejecting the whole batch on the first bad record.
pub fn parse_cards(value: serde_json::Value) -> Result<Vec<Card>, QuizError> {
    let raw: Vec<RawCard> = serde_json::from_value(value)
        .map_err(|e| QuizError::MalformedResponse(format!("expected a list of cards: {e}")))?;

    raw.into_iter().map(Card::try_from).collect()
}

/// Server-side folders that hold deck files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directory {
    #[default]
    MmaForays,
    Uploads,
}

impl Directory {
    pub const ALL: [Directory; 2] = [Directory::MmaForays, Directory::Uploads];

    pub fn as_str(&self) -> &'static str {
        match self {
            Directory::MmaForays => "mmaforays",
            Directory::Uploads => "uploads",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Directory::MmaForays => "MMAforays",
            Directory::Uploads => "Uploads",
        }
    }
}

/// Display name for a deck file: the file name without its extension.
pub fn deck_name_from_source(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(source)
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deck_name_strips_extension() {
        assert_eq!(deck_name_from_source("macleod-obs-taxa.csv"), "macleod-obs-taxa");
        assert_eq!(deck_name_from_source("spring.foray.2023.csv"), "spring.foray.2023");
        assert_eq!(deck_name_from_source("no_extension"), "no_extension");
    }

    #[test]
    fn test_parse_cards_accepts_numeric_year() {
        let cards = parse_cards(json!([{
            "scientific_name": "Amanita muscaria",
            "common_name": "Fly Agaric",
            "image_url": "https://example.org/a.jpg",
            "taxa_url": "https://www.inaturalist.org/taxa/48715",
            "observer_name": "R. Smith",
            "observation_year": 2021,
            "observation_url": "https://www.inaturalist.org/observations/1"
        }]))
        .unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].observation_year.as_deref(), Some("2021"));
        assert_eq!(cards[0].attribution(), "R. Smith, 2021. iNaturalist observation: ");
    }

    #[test]
    fn test_parse_cards_rejects_missing_name() {
        let result = parse_cards(json!([{ "image_url": "https://example.org/a.jpg" }]));
        assert!(matches!(result, Err(QuizError::MalformedResponse(_))));

        let result = parse_cards(json!({ "cards": [] }));
        assert!(matches!(result, Err(QuizError::MalformedResponse(_))));
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let cards = parse_cards(json!([{
            "scientific_name": "  Trametes versicolor ",
            "common_name": "",
            "image_url": "https://example.org/t.jpg"
        }]))
        .unwrap();

        assert_eq!(cards[0].scientific_name, "Trametes versicolor");
        assert_eq!(cards[0].common_name, None);
        assert_eq!(cards[0].taxa_url, None);
    }

    #[test]
    fn test_card_without_photo_is_accepted() {
        let cards = parse_cards(json!([{
            "scientific_name": "Boletus edulis",
            "common_name": "King Bolete",
            "image_url": "   "
        }]))
        .unwrap();

        assert_eq!(cards[0].image_url, None);
        assert_eq!(cards[0].attribution(), "Unknown observer, n.d. iNaturalist observation: ");
    }
}
