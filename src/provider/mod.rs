//! HTTP language-model providers.
//!
//! Both providers share one `ureq` agent per instance and apply the
//! caller's timeout to each request as a global (connect + read) limit.

mod gemini;
mod openai;

use std::sync::Arc;
use std::time::Duration;

use aido_core::dispatch::{DispatchError, Provider, ProviderConfig, ProviderKind};
use serde_json::Value;
use tracing::debug;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Build the provider described by `config` after validating it.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>, DispatchError> {
    config.validate()?;
    let provider: Arc<dyn Provider> = match config.kind {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(config)),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config)),
    };
    Ok(provider)
}

/// POST a JSON body and return the parsed JSON reply.
///
/// Non-2xx statuses become [`DispatchError::Provider`] carrying the
/// provider's error message when the body has one.
fn post_json(
    agent: &ureq::Agent,
    url: &str,
    headers: &[(&str, &str)],
    body: &Value,
    timeout: Duration,
) -> Result<Value, DispatchError> {
    let mut req = agent
        .post(url)
        .config()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .header("Content-Type", "application/json");
    for &(name, value) in headers {
        req = req.header(name, value);
    }

    let mut resp = req.send(body.to_string()).map_err(map_ureq_error)?;
    let status = resp.status().as_u16();
    let text = resp
        .body_mut()
        .read_to_string()
        .map_err(map_ureq_error)?;
    debug!(status, bytes = text.len(), "provider replied");

    if !(200..300).contains(&status) {
        return Err(DispatchError::Provider {
            status,
            message: error_message(&text),
        });
    }
    serde_json::from_str(&text).map_err(|e| DispatchError::InvalidResponse(e.to_string()))
}

fn map_ureq_error(e: ureq::Error) -> DispatchError {
    match e {
        ureq::Error::Timeout(_) => DispatchError::Timeout,
        ureq::Error::StatusCode(status) => DispatchError::Provider {
            status,
            message: String::new(),
        },
        other => DispatchError::Network(other.to_string()),
    }
}

/// `error.message` from a JSON error body, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Trim a trailing slash so paths can be appended with `/`.
fn base_url(endpoint: Option<&str>, default: &str) -> String {
    endpoint.unwrap_or(default).trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        let body = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        assert_eq!(error_message(body), "API key not valid");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message(" Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"detail":"x"}"#), r#"{"detail":"x"}"#);
    }

    #[test]
    fn test_base_url() {
        assert_eq!(base_url(None, "https://a.example/v1"), "https://a.example/v1");
        assert_eq!(
            base_url(Some("http://localhost:8080/v1/"), "unused"),
            "http://localhost:8080/v1"
        );
    }

    #[test]
    fn test_build_provider_validates_config() {
        let bad = ProviderConfig::new(ProviderKind::Gemini, "", "gemini-2.0-flash");
        assert!(matches!(build_provider(&bad), Err(DispatchError::Config(_))));
        let good = ProviderConfig::new(ProviderKind::OpenAi, "sk-test", "gpt-4o-mini");
        assert!(build_provider(&good).is_ok());
    }

    #[test]
    fn test_unreachable_endpoint_is_network_error() {
        let mut config = ProviderConfig::new(ProviderKind::OpenAi, "sk-test", "m");
        // Port 9 (discard) on localhost is closed in test environments.
        config.endpoint = Some("http://127.0.0.1:9".to_string());
        let provider = build_provider(&config).unwrap();
        let err = provider
            .complete("hi", Duration::from_secs(2))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Network(_) | DispatchError::Timeout
        ));
    }
}
