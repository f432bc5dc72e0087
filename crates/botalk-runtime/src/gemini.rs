//! Gemini Provider
//!
//! Implementation of `TextGenerator` for Google's Generative Language
//! `generateContent` endpoint.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use botalk_core::{
    error::{ChatError, Result},
    provider::{Completion, FinishReason, GenerationOptions, ProviderInfo, TextGenerator, TokenUsage},
};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest request timeout accepted from configuration
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Gemini provider configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential sent in the `x-goog-api-key` header
    pub api_key: String,

    /// Service base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 30,
        }
    }

    /// Read `GEMINI_API_KEY`, `GEMINI_BASE_URL` and `GEMINI_TIMEOUT_SECS`.
    ///
    /// `Ok(None)` when no credential is set; callers treat that as local-only.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let Some(api_key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup("GEMINI_TIMEOUT_SECS") {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                ChatError::Config(format!("GEMINI_TIMEOUT_SECS must be a whole number of seconds (got {raw:?})"))
            })?;
        }

        config.validate()?;
        Ok(Some(config))
    }

    /// Timeout must lie in `1..=MAX_TIMEOUT_SECS`
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ChatError::Config(format!(
                "timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds (got {})",
                self.timeout_secs
            )));
        }
        Ok(())
    }
}

/// Gemini text generator
pub struct GeminiProvider {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create from configuration
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?
            .ok_or_else(|| ChatError::Config("GEMINI_API_KEY is not set".into()))?;
        Self::from_config(config)
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    fn build_request<'a>(prompt: &'a str, opts: &GenerationOptions) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: opts.temperature,
                top_k: opts.top_k,
                top_p: opts.top_p,
                max_output_tokens: opts.max_output_tokens,
            },
        }
    }

    /// Turn a raw HTTP status and body into a completion.
    ///
    /// Non-2xx, an `error` field, or a missing `candidates[0].content.parts[0].text`
    /// all become errors.
    fn parse_response(status: u16, body: &str, model: &str) -> Result<Completion> {
        let parsed = serde_json::from_str::<GenerateResponse>(body);

        if !(200..300).contains(&status) {
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| truncate(body, 200));
            return Err(ChatError::Service { status, message });
        }

        let response = parsed.map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(ChatError::Service {
                status: error.code.unwrap_or(status),
                message: error
                    .message
                    .or(error.status)
                    .unwrap_or_else(|| "unknown error".into()),
            });
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::MalformedResponse("no candidates".into()))?;

        let text = candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ChatError::MalformedResponse("candidate has no text".into()))?;

        Ok(Completion {
            content: text,
            model: model.to_string(),
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason: candidate.finish_reason.as_deref().map(finish_reason),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "Gemini".into(),
            endpoint: self.config.base_url.clone(),
        }
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion> {
        let request = Self::build_request(prompt, options);

        let response = self
            .client
            .post(self.endpoint(&options.model))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout(self.config.timeout_secs.saturating_mul(1000))
                } else {
                    ChatError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        tracing::debug!(status, bytes = body.len(), "Gemini responded");
        Self::parse_response(status, &body, &options.model)
    }
}

fn finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::Length,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => FinishReason::ContentFilter,
        _ => FinishReason::Other,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// Wire types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const PATH: &str = "/v1beta/models/gemini-pro:generateContent";

    fn provider(base_url: &str) -> GeminiProvider {
        GeminiProvider::from_config(GeminiConfig {
            base_url: base_url.into(),
            timeout_secs: 5,
            ..GeminiConfig::new("test-key")
        })
        .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = GeminiConfig::new("k");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(!format!("{config:?}").contains("\"k\""));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_lookup_without_key_is_local_only() {
        assert!(GeminiConfig::from_lookup(vars(&[])).unwrap().is_none());
        assert!(GeminiConfig::from_lookup(vars(&[("GEMINI_API_KEY", "  ")])).unwrap().is_none());
    }

    #[test]
    fn test_lookup_reads_overrides() {
        let config = GeminiConfig::from_lookup(vars(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_BASE_URL", "http://localhost:9000"),
            ("GEMINI_TIMEOUT_SECS", " 12 "),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_lookup_rejects_bad_timeouts() {
        for raw in ["abc", "-1", "0", "601", "18446744073709551615", "99999999999999999999"] {
            let result = GeminiConfig::from_lookup(vars(&[
                ("GEMINI_API_KEY", "k"),
                ("GEMINI_TIMEOUT_SECS", raw),
            ]));
            assert!(matches!(result, Err(ChatError::Config(_))), "{raw}");
        }
    }

    #[test]
    fn test_from_config_validates_timeout() {
        for timeout_secs in [0, u64::MAX] {
            let result = GeminiProvider::from_config(GeminiConfig {
                timeout_secs,
                ..GeminiConfig::new("k")
            });
            assert!(matches!(result, Err(ChatError::Config(_))), "{timeout_secs}");
        }
    }

    #[test]
    fn test_request_shape() {
        let request = GeminiProvider::build_request("hello", &GenerationOptions::default());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
        assert!(value["generationConfig"]["temperature"].as_f64().unwrap() > 0.69);
    }

    #[test]
    fn test_parse_error_payload_on_2xx() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let err = GeminiProvider::parse_response(200, body, "gemini-pro").unwrap_err();
        assert!(matches!(err, ChatError::Service { status: 400, .. }));
    }

    #[test]
    fn test_parse_missing_fields() {
        for body in [
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#,
            "not json",
        ] {
            let err = GeminiProvider::parse_response(200, body, "gemini-pro").unwrap_err();
            assert!(matches!(err, ChatError::MalformedResponse(_)), "{body}");
        }
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"role": "user", "parts": [{"text": "Do you support Slack?"}]}],
                "generationConfig": {"topK": 40, "maxOutputTokens": 1024}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "Yes, through our API."}]},
                        "finishReason": "STOP"
                    }],
                    "usageMetadata": {"promptTokenCount": 900, "candidatesTokenCount": 6, "totalTokenCount": 906}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let completion = provider(&server.url())
            .generate("Do you support Slack?", &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(completion.content, "Yes, through our API.");
        assert_eq!(completion.model, "gemini-pro");
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.usage.unwrap().total_tokens, 906);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_http_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(403)
            .with_body(r#"{"error": {"code": 403, "message": "Permission denied"}}"#)
            .create_async()
            .await;

        let err = provider(&server.url())
            .generate("hi", &GenerationOptions::default())
            .await
            .unwrap_err();

        match err {
            ChatError::Service { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Permission denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_server_error_plain_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let err = provider(&server.url())
            .generate("hi", &GenerationOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        assert!(err.to_string().contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_generate_transport_error() {
        // Nothing listens on port 1
        let err = provider("http://127.0.0.1:1")
            .generate("hi", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }
}
