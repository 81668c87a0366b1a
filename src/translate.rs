//! Article translation over a hosted chat-completion endpoint.
//!
//! Long inputs are split into sentence-aligned chunks before translation.
//! Without a configured API key, or when the endpoint fails, the service
//! degrades to a placeholder built from the first sentence so the pipeline
//! always has something to show.

use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::llm::{self, DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL};

pub const DEFAULT_TARGET_LANG: &str = "ko";

/// Inputs above this length go through the chunker.
const MAX_SINGLE_LEN: usize = 6000;
/// Soft limit a chunk may grow to before it is cut at a sentence boundary.
const CHUNK_SOFT_LIMIT: usize = 5000;
/// Inputs shorter than this are not worth translating.
const MIN_INPUT_LEN: usize = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct Translator {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl Translator {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Translator {
            client,
            api_key,
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    /// Translate `text` into `target_lang`. Returns `None` only for inputs
    /// below the minimum length; endpoint failures produce a placeholder
    /// rather than an error.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Option<String> {
        if text.trim().chars().count() < MIN_INPUT_LEN {
            return None;
        }

        if text.chars().count() > MAX_SINGLE_LEN {
            return Some(self.translate_long(text, target_lang).await);
        }

        info!(chars = text.chars().count(), target_lang, "translating text");
        match self.request_translation(text, target_lang).await {
            Ok(translated) if !translated.is_empty() => Some(translated),
            Ok(_) => {
                warn!("translation endpoint returned an empty result");
                Some(simulate_translation(text))
            }
            Err(e) => {
                warn!("translation failed: {e}");
                Some(simulate_translation(text))
            }
        }
    }

    async fn translate_long(&self, text: &str, target_lang: &str) -> String {
        let chunks = split_chunks(text);
        info!(
            chars = text.chars().count(),
            chunks = chunks.len(),
            "translating long text in chunks"
        );

        let mut translated = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            match self.request_translation(chunk, target_lang).await {
                Ok(part) if !part.is_empty() => translated.push(part),
                Ok(_) | Err(_) => {
                    warn!("chunk {}/{} failed to translate", i + 1, chunks.len());
                    translated.push(format!("[chunk {} translation failed]", i + 1));
                }
            }
        }
        translated.join(" ")
    }

    async fn request_translation(&self, text: &str, target_lang: &str) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            bail!("no translation API key configured");
        };
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt(target_lang)},
                {"role": "user", "content": text},
            ],
            "max_tokens": 4000,
            "temperature": 0.1,
        });
        llm::chat_completion(&self.client, &self.endpoint, api_key, body, REQUEST_TIMEOUT).await
    }
}

fn system_prompt(target_lang: &str) -> String {
    format!(
        "Translate the following text into {}. Translate the complete text \
         without omitting or summarizing anything, keep the sentence \
         structure and meaning intact, and write natural, accurate prose.",
        language_name(target_lang)
    )
}

fn language_name(code: &str) -> &str {
    match code {
        "ko" => "Korean",
        "en" => "English",
        "ja" => "Japanese",
        "de" => "German",
        "fr" => "French",
        "es" => "Spanish",
        other => other,
    }
}

/// Split on `". "` boundaries, accumulating sentences until a chunk would
/// pass the soft limit. A sentence that triggers the cut starts the next
/// chunk without its leading separator; the final sentence picks up a
/// trailing period even when the input had none. Both quirks are inherited
/// behavior; see DESIGN.md.
fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in text.split(". ") {
        if current.chars().count() + sentence.chars().count() > CHUNK_SOFT_LIMIT {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = sentence.to_string();
        } else {
            current.push_str(sentence);
            current.push_str(". ");
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim().to_string());
    }
    chunks
}

fn simulate_translation(text: &str) -> String {
    let snippet = match text.split_once('.') {
        Some((first, _)) => first.trim().to_string(),
        None => text.chars().take(100).collect(),
    };
    format!(
        "[translation unavailable] {snippet}... (a translation API key is required; \
         see the original text)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn too_short_input_is_rejected() {
        let translator = Translator::new(reqwest::Client::new(), None);
        assert!(translator.translate("short", "ko").await.is_none());
        assert!(translator.translate("   \n  ", "ko").await.is_none());
    }

    #[tokio::test]
    async fn unconfigured_key_falls_back_to_simulation() {
        let translator = Translator::new(reqwest::Client::new(), None);
        let result = translator
            .translate("The market closed higher today. Analysts were surprised.", "ko")
            .await
            .unwrap();
        assert!(result.starts_with("[translation unavailable]"));
        assert!(result.contains("The market closed higher today"));
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let text = "One sentence. Two sentences. Three.";
        let chunks = split_chunks(text);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].starts_with("One sentence. Two sentences."));
    }

    #[test]
    fn long_text_splits_at_sentence_boundaries() {
        let sentence = "This sentence is exactly long enough to matter for chunking purposes";
        let text = vec![sentence; 200].join(". ");
        assert!(text.chars().count() > MAX_SINGLE_LEN);

        let chunks = split_chunks(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            // soft limit: a chunk holds whole sentences and stays near the cap
            assert!(chunk.chars().count() <= CHUNK_SOFT_LIMIT + sentence.chars().count() + 2);
            assert!(chunk.starts_with("This sentence"));
        }
    }

    #[test]
    fn chunker_keeps_inherited_trailing_period_quirk() {
        // Input ends without a separator; the accumulator still appends
        // ". " to the last sentence before the final trim.
        let chunks = split_chunks("First part. Second part without trailing dot");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].ends_with("Second part without trailing dot."));
    }
}
