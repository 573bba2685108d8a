pub mod client;
pub mod types;

use async_trait::async_trait;
pub use client::HttpApi;
pub use types::Pronunciation;

use crate::core::{
    availability::Probe,
    Card,
    Directory,
    QuizError,
};

/// The remote backend that serves decks, images and pronunciations.
#[async_trait]
pub trait FlashcardApi: Send + Sync {
    /// Liveness check; the body is ignored.
    async fn wakeup(&self) -> Result<(), QuizError>;

    async fn list_files(&self, directory: Directory) -> Result<Vec<String>, QuizError>;

    async fn upload_csv(
        &self,
        file_name: String,
        contents: Vec<u8>,
        directory: Directory,
    ) -> Result<(), QuizError>;

    async fn load_cards(&self, filename: &str, directory: Directory) -> Result<Vec<Card>, QuizError>;

    async fn pronounce_name(&self, scientific_name: &str) -> Result<Pronunciation, QuizError>;

    /// URL that fetches `url` through the backend's image proxy.
    fn image_url(&self, url: &str) -> String;
}

#[async_trait]
impl<T: FlashcardApi + ?Sized> Probe for T {
    async fn probe(&self) -> Result<(), QuizError> {
        self.wakeup().await
    }
}
