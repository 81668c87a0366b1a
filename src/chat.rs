//! Conversational assistant for the news platform.
//!
//! A single hosted-LLM call carrying a fixed persona prompt plus the
//! caller's conversation history. Without an API key, or when the call
//! fails, a small keyword-matched responder keeps the endpoint usable.

use std::time::Duration;

use anyhow::{bail, Result};
use tracing::warn;

use crate::llm::{self, DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL};
use crate::types::ChatTurn;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PERSONA_PROMPT: &str = "\
You are the friendly AI assistant of a global financial-news platform.

Role:
- Answer user questions helpfully and in detail
- Be especially good on global news, country facts, translation and languages
- Keep a bright, positive, professional tone
- Answer in the user's language

Constraints:
- Politely decline harmful or inappropriate requests
- Do not guess when you are not sure of a fact
- Never ask for personal information";

pub struct Chatbot {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl Chatbot {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Chatbot {
            client,
            api_key,
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    /// Produce a reply to `message` given the prior conversation. Total:
    /// failures degrade to the keyword responder.
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> String {
        match self.request_reply(message, history).await {
            Ok(reply) if !reply.is_empty() => reply,
            Ok(_) => simulate_reply(message),
            Err(e) => {
                warn!("chat completion failed: {e}");
                simulate_reply(message)
            }
        }
    }

    async fn request_reply(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            bail!("no chat API key configured");
        };

        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": PERSONA_PROMPT,
        })];
        for turn in history {
            messages.push(serde_json::json!({
                "role": turn.role,
                "content": turn.content,
            }));
        }
        messages.push(serde_json::json!({
            "role": "user",
            "content": message,
        }));

        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": 500,
            "temperature": 0.7,
            "top_p": 0.9,
            "frequency_penalty": 0.5,
            "presence_penalty": 0.3,
        });
        llm::chat_completion(&self.client, &self.endpoint, api_key, body, REQUEST_TIMEOUT).await
    }
}

/// Keyword-matched canned replies for when no model is reachable.
fn simulate_reply(message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("hello") || lower.contains("hi ") || lower == "hi" {
        "Hello! I'm the news platform assistant. How can I help you today?".to_string()
    } else if lower.contains("news") {
        "The platform tracks the latest news from markets around the world. \
         Paste an article URL into the processor to get the original text, a \
         translation and a summary."
            .to_string()
    } else if lower.contains("translat") {
        "Articles are translated automatically. Process an article and you \
         will get the original, the translation and a summary side by side."
            .to_string()
    } else if lower.contains("countr") {
        "News is available for a wide range of countries. Pick a country to \
         load its latest coverage."
            .to_string()
    } else if lower.contains("thank") {
        "You're welcome! Ask me anything else whenever you like.".to_string()
    } else if lower.contains("help") || lower.contains("how do i") {
        "How to use the platform:\n\
         1. Pick a country or paste an article URL\n\
         2. The article is scraped and processed automatically\n\
         3. Switch between the original, translated and summarized views\n\
         4. Check the sentiment badge for the favorable/unfavorable call"
            .to_string()
    } else if lower.contains("sentiment") || lower.contains("favorable") || lower.contains("unfavorable") {
        "Each article gets a financial sentiment call: favorable, unfavorable \
         or neutral, with a confidence score from a model trained on \
         financial news."
            .to_string()
    } else {
        format!(
            "I'd love to tell you more about \"{message}\", but I'm running in \
             fallback mode right now. Configure a chat API key for full answers, \
             and feel free to ask about news, translation or sentiment!"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_key_uses_keyword_responder() {
        let bot = Chatbot::new(reqwest::Client::new(), None);
        let reply = bot.chat("hello there", &[]).await;
        assert!(reply.contains("assistant"));
    }

    #[test]
    fn keyword_routing() {
        assert!(simulate_reply("how does translation work?").contains("translated automatically"));
        assert!(simulate_reply("what about sentiment?").contains("favorable, unfavorable"));
        assert!(simulate_reply("thanks!").contains("welcome"));
        assert!(simulate_reply("HELP me use this").contains("How to use"));
    }

    #[test]
    fn unknown_message_gets_fallback_notice() {
        let reply = simulate_reply("quantum entanglement");
        assert!(reply.contains("fallback mode"));
        assert!(reply.contains("quantum entanglement"));
    }
}
