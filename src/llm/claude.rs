use std::time::Duration;

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Thin client for the Anthropic Messages API. One request per call, with
/// an explicit timeout and no retry: a failed round trip is the caller's
/// signal to fall back.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    api_key: String,
    model: String,
    analysis_max_tokens: u32,
    generation_max_tokens: u32,
    request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string());
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}

fn summarize_payload(payload: &Value) -> String {
    let model = payload
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    let max_tokens = payload
        .get("max_tokens")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let has_system = payload.get("system").is_some();
    let block_kinds = payload
        .pointer("/messages/0/content")
        .and_then(|v| v.as_array())
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|block| block.get("type").and_then(|v| v.as_str()))
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_else(|| "text".to_string());

    format!("model={model}, max_tokens={max_tokens}, system={has_system}, blocks=[{block_kinds}]")
}

fn extract_text(response: MessagesResponse) -> String {
    let mut parts = Vec::new();
    for block in response.content {
        if let ContentBlock::Text { text } = block {
            if !text.trim().is_empty() {
                parts.push(text);
            }
        }
    }
    parts.join("\n")
}

impl ClaudeClient {
    pub fn new(
        api_key: String,
        model: String,
        analysis_max_tokens: u32,
        generation_max_tokens: u32,
        request_timeout_seconds: u64,
    ) -> Self {
        ClaudeClient {
            api_key,
            model,
            analysis_max_tokens,
            generation_max_tokens,
            request_timeout: Duration::from_secs(request_timeout_seconds),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call_messages_api(&self, payload: Value) -> Result<String> {
        debug!(target: "llm.claude", "Claude request: {}", summarize_payload(&payload));

        let client = get_http_client();
        let response = client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .timeout(self.request_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                anyhow!(
                    "Claude request failed to send: {err} (timeout={}, connect={})",
                    err.is_timeout(),
                    err.is_connect()
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let (message, body_summary) = summarize_error_body(&body);
            let detail = message.unwrap_or(body_summary);
            return Err(anyhow!(
                "Claude request failed with status {status}: {detail}"
            ));
        }

        let parsed = response.json::<MessagesResponse>().await?;
        let text = extract_text(parsed);
        if text.trim().is_empty() {
            return Err(anyhow!("Claude reply contained no text blocks"));
        }
        Ok(text)
    }

    /// Vision analysis: one user message carrying the base64 image followed
    /// by the analysis instructions.
    pub async fn analyze_image(
        &self,
        media_type: &str,
        image_bytes: &[u8],
        prompt: &str,
    ) -> Result<String> {
        let encoded = general_purpose::STANDARD.encode(image_bytes);
        let payload = json!({
            "model": self.model,
            "max_tokens": self.analysis_max_tokens,
            "messages": [{
                "role": "user",
                "content": [
                    {
                        "type": "image",
                        "source": {
                            "type": "base64",
                            "media_type": media_type,
                            "data": encoded,
                        },
                    },
                    { "type": "text", "text": prompt },
                ],
            }],
        });

        log_llm_timing(
            "claude",
            &self.model,
            "analyze_image",
            Some(json!({ "media_type": media_type, "image_bytes": image_bytes.len() })),
            || async { self.call_messages_api(payload).await },
        )
        .await
    }

    /// Text generation under a fixed system prompt.
    pub async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "max_tokens": self.generation_max_tokens,
            "system": system_prompt,
            "messages": [{ "role": "user", "content": user_content }],
        });

        log_llm_timing("claude", &self.model, "complete", None, || async {
            self.call_messages_api(payload).await
        })
        .await
    }
}
