use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("No cards available")]
    EmptyDeck,

    #[error("No card available")]
    NoCurrentCard,

    #[error("Server unreachable after {attempts} attempts")]
    NetworkUnavailable { attempts: u32 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP error {status} from {url}")]
    Http { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("QuizError: {0}")]
    Custom(String),
}

impl QuizError {
    /// True for failures that mean the backend could not be reached at all,
    /// as opposed to the backend answering with something unusable.
    pub fn is_connectivity(&self) -> bool {
        match self {
            QuizError::NetworkUnavailable { .. } => true,
            QuizError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(error: std::io::Error) -> Self {
        QuizError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for QuizError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return QuizError::MalformedResponse(error.to_string());
        }
        QuizError::Reqwest(Box::new(error))
    }
}
