use serde::{
    Deserialize,
    Serialize,
};

use crate::core::Directory;

#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LoadCardsRequest<'a> {
    pub filename: &'a str,
    pub directory: Directory,
}

#[derive(Debug, Serialize)]
pub struct PronounceRequest<'a> {
    pub scientific_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PronounceResponse {
    pub pronunciation: String,
}

/// Pronunciation guides come back either as prose or as a JSON document
/// serialized into a string.
#[derive(Debug, Clone, PartialEq)]
pub enum Pronunciation {
    Structured(serde_json::Value),
    Text(String),
}

impl Pronunciation {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
                Pronunciation::Structured(value)
            }
            _ => Pronunciation::Text(text),
        }
    }

    pub fn display_text(&self) -> String {
        match self {
            Pronunciation::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Pronunciation::Text(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_pronunciation_is_pretty_printed() {
        let p = Pronunciation::from_text(r#"{"genus":"a-MAN-i-ta","species":"MUS-kar-ee-a"}"#);
        assert!(matches!(p, Pronunciation::Structured(_)));
        assert!(p.display_text().contains("\n  \"genus\": \"a-MAN-i-ta\""));
    }

    #[test]
    fn test_prose_pronunciation_is_shown_raw() {
        let text = "Say it like: am-uh-NEE-tuh MUSS-kuh-ree-uh";
        let p = Pronunciation::from_text(text);
        assert_eq!(p, Pronunciation::Text(text.to_string()));
        assert_eq!(p.display_text(), text);

        // Valid JSON scalars are still prose
        assert!(matches!(Pronunciation::from_text("\"quoted\""), Pronunciation::Text(_)));
    }

    #[test]
    fn test_load_request_uses_directory_name() {
        let body = serde_json::to_value(LoadCardsRequest {
            filename: "macleod.csv",
            directory: Directory::Uploads,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "filename": "macleod.csv", "directory": "uploads" }));
    }
}
