pub mod browser;
pub mod chat;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod llm;
pub mod normalize;
pub mod pipeline;
pub mod scrape;
pub mod selectors;
pub mod sentiment;
pub mod summarize;
pub mod translate;
pub mod types;

use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::chat::Chatbot;
use crate::sentiment::SentimentAnalyzer;
use crate::summarize::Summarizer;
use crate::translate::Translator;

pub use types::*;

/// Environment-derived configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub openai_api_key: Option<String>,
    pub hf_api_token: Option<String>,
    pub sentiment_model_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            hf_api_token: non_empty_var("HF_API_TOKEN"),
            sentiment_model_url: non_empty_var("SENTIMENT_MODEL_URL"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Application state shared across request handlers: one HTTP client and
/// the explicitly constructed services. Built once at process start; no
/// other state crosses requests.
pub struct AppState {
    pub http_client: reqwest::Client,
    pub translator: Translator,
    pub summarizer: Summarizer,
    pub sentiment: SentimentAnalyzer,
    pub chatbot: Chatbot,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = build_http_client()?;
        Ok(AppState {
            translator: Translator::new(http_client.clone(), config.openai_api_key.clone()),
            summarizer: Summarizer::new(http_client.clone(), config.openai_api_key.clone()),
            sentiment: SentimentAnalyzer::new(
                http_client.clone(),
                config.sentiment_model_url.clone(),
                config.hf_api_token.clone(),
            ),
            chatbot: Chatbot::new(http_client.clone(), config.openai_api_key.clone()),
            http_client,
        })
    }
}

pub fn build_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .context("Failed to build HTTP client")
}
