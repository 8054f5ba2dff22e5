//! Hosted-language-model client.
//!
//! The model is an opaque external capability: no guarantee on latency,
//! determinism, or output format. Callers must sanitize completions
//! (see [`sanitize`]) before treating them as SQL.

pub mod prompts;
pub mod sanitize;

use async_trait::async_trait;

use crate::{Error, Result};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A text-completion model: prompt in, free text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Client for the Google Generative Language API.
pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(model: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a client with the key from `GEMINI_API_KEY` (or `GOOGLE_API_KEY`).
    pub fn from_env(model: &str) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| Error::MissingApiKey("GEMINI_API_KEY"))?;
        Ok(Self::new(model, &api_key))
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.0 }
        });

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let truncated: String = body.chars().take(200).collect();
            return Err(Error::Model(format!("model HTTP {status}: {truncated}")));
        }

        let data: serde_json::Value = resp.json().await?;
        let text = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string();

        if text.is_empty() {
            return Err(Error::Model("model returned an empty completion".into()));
        }

        Ok(text)
    }
}
