use std::time::Duration;

use aido_core::dispatch::{DispatchError, Provider, ProviderConfig};
use serde_json::{json, Value};

use super::{base_url, post_json};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini `generateContent`.
pub struct GeminiProvider {
    agent: ureq::Agent,
    api_key: String,
    url: String,
}

impl GeminiProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        let base = base_url(config.endpoint.as_deref(), DEFAULT_ENDPOINT);
        Self {
            agent: ureq::Agent::new_with_defaults(),
            api_key: config.api_key.clone(),
            url: format!("{base}/v1beta/models/{}:generateContent", config.model),
        }
    }
}

impl Provider for GeminiProvider {
    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, DispatchError> {
        let headers = [("x-goog-api-key", self.api_key.as_str())];
        let reply = post_json(&self.agent, &self.url, &headers, &request_body(prompt), timeout)?;
        parse_reply(&reply)
    }
}

fn request_body(prompt: &str) -> Value {
    json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
}

/// Concatenated text parts of the first candidate.
fn parse_reply(reply: &Value) -> Result<String, DispatchError> {
    let Some(parts) = reply["candidates"][0]["content"]["parts"].as_array() else {
        let reason = reply["promptFeedback"]["blockReason"]
            .as_str()
            .map(|r| format!("blocked: {r}"))
            .unwrap_or_else(|| "no candidates in reply".to_string());
        return Err(DispatchError::InvalidResponse(reason));
    };
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.trim().is_empty() {
        return Err(DispatchError::EmptyResponse);
    }
    Ok(text)
}
