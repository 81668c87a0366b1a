//! Article summarization over a hosted chat-completion endpoint.

use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::llm::{self, DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL};

pub const DEFAULT_SUMMARY_LENGTH: u32 = 300;

/// Inputs shorter than this carry too little to summarize.
const MIN_INPUT_LEN: usize = 50;
/// Longer inputs are truncated before the call rather than chunked; a
/// summary does not need the whole tail.
const MAX_INPUT_LEN: usize = 4000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct Summarizer {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl Summarizer {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Summarizer {
            client,
            api_key,
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    /// Summarize `text` to roughly `max_length` characters. Returns `None`
    /// only for inputs below the minimum length; endpoint failures produce
    /// a placeholder.
    pub async fn summarize(&self, text: &str, max_length: u32) -> Option<String> {
        if text.trim().chars().count() < MIN_INPUT_LEN {
            return None;
        }

        let text = truncate_input(text);
        info!(chars = text.chars().count(), max_length, "summarizing text");

        match self.request_summary(&text, max_length).await {
            Ok(summary) if !summary.is_empty() => Some(summary),
            Ok(_) => {
                warn!("summarization endpoint returned an empty result");
                Some(simulate_summary(&text))
            }
            Err(e) => {
                warn!("summarization failed: {e}");
                Some(simulate_summary(&text))
            }
        }
    }

    async fn request_summary(&self, text: &str, max_length: u32) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            bail!("no summarization API key configured");
        };
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "Summarize the following news article in {max_length} characters \
                         or fewer. Capture only the key points, concisely."
                    ),
                },
                {"role": "user", "content": text},
            ],
            "max_tokens": max_length,
            "temperature": 0.3,
        });
        llm::chat_completion(&self.client, &self.endpoint, api_key, body, REQUEST_TIMEOUT).await
    }
}

fn truncate_input(text: &str) -> String {
    if text.chars().count() > MAX_INPUT_LEN {
        let mut truncated: String = text.chars().take(MAX_INPUT_LEN).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}

fn simulate_summary(text: &str) -> String {
    let snippet = match text.split_once('.') {
        Some((first, _)) => first.trim().to_string(),
        None => text.chars().take(100).collect(),
    };
    format!(
        "[summary unavailable] {snippet}... (a summarization API key is required; \
         see the original text)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn too_short_input_is_rejected() {
        let summarizer = Summarizer::new(reqwest::Client::new(), None);
        assert!(summarizer.summarize("brief", DEFAULT_SUMMARY_LENGTH).await.is_none());
    }

    #[tokio::test]
    async fn unconfigured_key_falls_back_to_simulation() {
        let summarizer = Summarizer::new(reqwest::Client::new(), None);
        let text = "The central bank raised rates by a quarter point on Wednesday. \
                    Markets had priced in the move for weeks.";
        let result = summarizer.summarize(text, DEFAULT_SUMMARY_LENGTH).await.unwrap();
        assert!(result.starts_with("[summary unavailable]"));
        assert!(result.contains("raised rates"));
    }

    #[test]
    fn truncates_long_input_with_ellipsis() {
        let text = "y".repeat(MAX_INPUT_LEN + 500);
        let truncated = truncate_input(&text);
        assert_eq!(truncated.chars().count(), MAX_INPUT_LEN + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn short_input_passes_through_untouched() {
        let text = "No truncation needed here.";
        assert_eq!(truncate_input(text), text);
    }
}
