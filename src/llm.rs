//! Thin client for OpenAI-style chat-completion endpoints, shared by the
//! translation, summarization and chat services.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use backoff::future::retry;
use backoff::ExponentialBackoffBuilder;
use serde::Deserialize;

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// POST a chat-completion request and return the assistant's trimmed reply.
///
/// Transient transport failures (connect, timeout) are retried with
/// exponential backoff; HTTP-level and decode errors are not.
pub async fn chat_completion(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    body: serde_json::Value,
    timeout: Duration,
) -> Result<String> {
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(500))
        .with_max_elapsed_time(Some(Duration::from_secs(10)))
        .build();

    let response = retry(policy, || async {
        client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    backoff::Error::transient(e)
                } else {
                    backoff::Error::permanent(e)
                }
            })
    })
    .await
    .context("chat completion request failed")?;

    let status = response.status();
    if !status.is_success() {
        let detail: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect();
        return Err(anyhow!("chat completion returned {status}: {detail}"));
    }

    let completion: ChatCompletion = response
        .json()
        .await
        .context("invalid chat completion response")?;
    let content = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| anyhow!("chat completion returned no choices"))?;

    Ok(content.trim().to_string())
}
