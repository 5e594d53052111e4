use crate::scores::ScoreStrip;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

/// Polls a score strip endpoint. The endpoint is configured by the caller;
/// nothing here knows where live scores come from.
#[derive(Debug, Clone)]
pub struct ScoresApi {
    client: Client,
    timeout: Duration,
}

impl Default for ScoresApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("playoff-picker/0.1 (terminal playoff picks)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ScoresApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the current score strip. A 4xx answer (no games posted yet)
    /// reads as an empty strip.
    pub async fn fetch(&self, url: &str) -> ApiResult<ScoreStrip> {
        self.get(url).await
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().is_some_and(|s| s.is_client_error()) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRIP: &str = r#"{"games": [
        {"eid": "2015011000", "away": "BAL", "home": "NE", "away_score": 28,
         "home_score": 31, "winner": null, "status": "Q4", "clock": "02:00",
         "day": "Sat", "time": "4:35", "pos": "NE"}
    ]}"#;

    #[tokio::test]
    async fn fetches_and_decodes_the_strip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/scores")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(STRIP)
            .create_async()
            .await;

        let strip = ScoresApi::new()
            .fetch(&format!("{}/scores", server.url()))
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(strip.games.len(), 1);
        assert_eq!(strip.games[0].status_label(), "Q4 02:00");
        assert!(strip.games[0].has_possession("NE"));
    }

    #[tokio::test]
    async fn client_error_reads_as_empty_strip() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/scores").with_status(404).create_async().await;

        let strip = ScoresApi::new()
            .fetch(&format!("{}/scores", server.url()))
            .await
            .unwrap();
        assert!(strip.games.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/scores").with_status(503).create_async().await;

        let err = ScoresApi::new()
            .fetch(&format!("{}/scores", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Api(..)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/scores")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = ScoresApi::new()
            .fetch(&format!("{}/scores", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Parsing(..)));
        assert!(err.to_string().starts_with("Parse error for http://"));
    }
}
