use std::time::Duration;

use aido_core::dispatch::{DispatchError, Provider, ProviderConfig};
use serde_json::{json, Value};

use super::{base_url, post_json};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// OpenAI-compatible `chat/completions`.
///
/// Any server speaking the same wire format works through `endpoint`.
pub struct OpenAiProvider {
    agent: ureq::Agent,
    auth: String,
    model: String,
    url: String,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        let base = base_url(config.endpoint.as_deref(), DEFAULT_ENDPOINT);
        Self {
            agent: ureq::Agent::new_with_defaults(),
            auth: format!("Bearer {}", config.api_key),
            model: config.model.clone(),
            url: format!("{base}/chat/completions"),
        }
    }
}

impl Provider for OpenAiProvider {
    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, DispatchError> {
        let headers = [("Authorization", self.auth.as_str())];
        let body = request_body(&self.model, prompt);
        let reply = post_json(&self.agent, &self.url, &headers, &body, timeout)?;
        parse_reply(&reply)
    }
}

fn request_body(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "messages": [{ "role": "user", "content": prompt }],
    })
}

fn parse_reply(reply: &Value) -> Result<String, DispatchError> {
    match reply["choices"][0]["message"]["content"].as_str() {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        Some(_) => Err(DispatchError::EmptyResponse),
        None => Err(DispatchError::InvalidResponse(
            "no message content in reply".to_string(),
        )),
    }
}
