//! Client for the generative-text narrative service.
//!
//! Posts the prompt of a [`NarrativeRequest`] to a `generateContent` endpoint
//! and returns the generated Markdown. One attempt per request; any failure
//! degrades to a fixed fallback message.

use std::time::Duration;

use bid_ledger_calibration::NarrativeRequest;
use bid_ledger_core::NarrativeConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Shown when the service cannot be reached or rejects the request.
pub const FALLBACK_MESSAGE: &str = "Narrative service is temporarily unavailable, please try again later.";

/// Shown when the service answers without any text.
pub const EMPTY_REPLY_MESSAGE: &str = "Narrative generation produced no text.";

/// Errors that can occur when calling the narrative service.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("no API key configured (set narrative.api_key or BID_LEDGER_NARRATIVE__API_KEY)")]
    MissingApiKey,

    /// API request failed.
    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timeout: {0}")]
    Timeout(String),

    /// Reply body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentReply {
    /// Text of the first candidate, or `None` if it carries none.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

// =============================================================================
// Client
// =============================================================================

pub struct NarrativeClient {
    config: NarrativeConfig,
    http: Client,
}

impl std::fmt::Debug for NarrativeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeClient")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl NarrativeClient {
    /// Creates a client with the configured timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: NarrativeConfig) -> Result<Self, NarrativeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NarrativeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends the request's prompt and returns the generated text.
    ///
    /// # Errors
    /// Returns error if no API key is configured, the call fails, or the
    /// reply cannot be decoded.
    pub async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(NarrativeError::MissingApiKey)?;

        let url = self.url();
        let body = GenerateContentBody {
            contents: vec![Content {
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
        };

        debug!("POST {} prompt_len={}", url, request.prompt.len());

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let reply = response.json::<GenerateContentReply>().await?;
        Ok(reply
            .text()
            .unwrap_or_else(|| EMPTY_REPLY_MESSAGE.to_string()))
    }

    /// Like [`generate`](Self::generate), but never fails.
    pub async fn generate_or_fallback(&self, request: &NarrativeRequest) -> String {
        match self.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Narrative generation failed");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bid_ledger_calibration::{PortfolioStats, ProjectQuery};
    use bid_ledger_core::AppConfig;

    fn request() -> NarrativeRequest {
        NarrativeRequest::build(
            &PortfolioStats::default(),
            &ProjectQuery::all(),
            &AppConfig::default(),
        )
    }

    #[test]
    fn test_url_from_config() {
        let client = NarrativeClient::new(NarrativeConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            ..NarrativeConfig::default()
        })
        .unwrap();

        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentBody {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_reply_text_extraction() {
        let reply: GenerateContentReply = serde_json::from_str(
            r###"{"candidates":[{"content":{"parts":[{"text":"## Outbound"},{"text":" discounts"}]}}]}"###,
        )
        .unwrap();
        assert_eq!(reply.text().as_deref(), Some("## Outbound discounts"));

        let empty: GenerateContentReply =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert_eq!(empty.text(), None);
        assert_eq!(GenerateContentReply::default().text(), None);
    }

    #[tokio::test]
    async fn test_missing_key_is_error() {
        let client = NarrativeClient::new(NarrativeConfig::default()).unwrap();
        let err = client.generate(&request()).await.unwrap_err();
        assert!(matches!(err, NarrativeError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        let client = NarrativeClient::new(NarrativeConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: Some("test-key".to_string()),
            timeout_secs: 2,
            ..NarrativeConfig::default()
        })
        .unwrap();

        assert_eq!(client.generate_or_fallback(&request()).await, FALLBACK_MESSAGE);
    }
}
