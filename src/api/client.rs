use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::USER_AGENT,
    multipart::{
        Form,
        Part,
    },
    Client,
    Response,
    Url,
};

use super::{
    types::{
        FileListResponse,
        LoadCardsRequest,
        PronounceRequest,
        PronounceResponse,
    },
    FlashcardApi,
    Pronunciation,
};
use crate::core::{
    parse_cards,
    Card,
    Directory,
    QuizError,
};

const CLIENT_USER_AGENT: &str = "taxacards/0.3 (+reqwest)";

pub fn http_client() -> Result<Client, QuizError> {
    Client::builder()
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| QuizError::Custom(format!("HTTP client build failed: {e}")))
}

/// reqwest-backed client for the flashcard backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, QuizError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| QuizError::Custom(format!("Invalid API URL '{}': {}", base_url, e)))?;

        Ok(Self { client: http_client()?, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn ensure_success(resp: Response) -> Result<Response, QuizError> {
    if !resp.status().is_success() {
        return Err(QuizError::Http { status: resp.status().as_u16(), url: resp.url().to_string() });
    }
    Ok(resp)
}

#[async_trait]
impl FlashcardApi for HttpApi {
    async fn wakeup(&self) -> Result<(), QuizError> {
        let resp = self
            .client
            .get(self.endpoint("wakeup"))
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;
        ensure_success(resp)?;
        Ok(())
    }

    async fn list_files(&self, directory: Directory) -> Result<Vec<String>, QuizError> {
        let resp = self
            .client
            .get(self.endpoint("list_csv_files"))
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .query(&[("directory", directory.as_str())])
            .send()
            .await?;

        let listing: FileListResponse = ensure_success(resp)?.json().await?;
        Ok(listing.files)
    }

    async fn upload_csv(
        &self,
        file_name: String,
        contents: Vec<u8>,
        directory: Directory,
    ) -> Result<(), QuizError> {
        let part = Part::bytes(contents).file_name(file_name).mime_str("text/csv")?;
        let form = Form::new().part("file", part).text("directory", directory.as_str());

        let resp = self
            .client
            .post(self.endpoint("upload_csv"))
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .multipart(form)
            .send()
            .await?;

        ensure_success(resp)?;
        Ok(())
    }

    async fn load_cards(&self, filename: &str, directory: Directory) -> Result<Vec<Card>, QuizError> {
        let resp = self
            .client
            .post(self.endpoint("load_cards"))
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .json(&LoadCardsRequest { filename, directory })
            .send()
            .await?;

        let body: serde_json::Value = ensure_success(resp)?.json().await?;
        parse_cards(body)
    }

    async fn pronounce_name(&self, scientific_name: &str) -> Result<Pronunciation, QuizError> {
        let resp = self
            .client
            .post(self.endpoint("pronounce_name"))
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .json(&PronounceRequest { scientific_name })
            .send()
            .await?;

        let body: PronounceResponse = ensure_success(resp)?.json().await?;
        Ok(Pronunciation::from_text(body.pronunciation))
    }

    fn image_url(&self, url: &str) -> String {
        Url::parse_with_params(&self.endpoint("get_image"), &[("url", url)])
            .map(String::from)
            .unwrap_or_else(|_| url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let api = HttpApi::new(" https://api.example.org/ ").unwrap();
        assert_eq!(api.base_url(), "https://api.example.org");
        assert_eq!(api.endpoint("wakeup"), "https://api.example.org/wakeup");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpApi::new("not a url").is_err());
    }

    #[test]
    fn test_image_url_is_proxied_and_encoded() {
        let api = HttpApi::new("http://localhost:5000").unwrap();
        let proxied = api.image_url("https://static.inaturalist.org/photos/1/medium.jpg?x=1&y=2");

        assert_eq!(
            proxied,
            "http://localhost:5000/get_image?url=https%3A%2F%2Fstatic.inaturalist.org%2Fphotos%2F1%2Fmedium.jpg%3Fx%3D1%26y%3D2"
        );
    }
}
