//! Financial news sentiment classification.
//!
//! Calls a hosted FinBERT-class inference endpoint that scores text over
//! the labels positive / negative / neutral, and maps the winning label to
//! the user-facing direction favorable / unfavorable / neutral.

use std::cmp::Ordering;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::types::{SentimentResult, SentimentScores};

pub const DEFAULT_MODEL_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/ProsusAI/finbert";

/// Below this trimmed length there is nothing meaningful to classify.
const MIN_INPUT_LEN: usize = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

pub struct SentimentAnalyzer {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl SentimentAnalyzer {
    pub fn new(client: reqwest::Client, endpoint: Option<String>, api_token: Option<String>) -> Self {
        SentimentAnalyzer {
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_MODEL_ENDPOINT.to_string()),
            api_token,
        }
    }

    /// Classify a news item. A non-empty description is appended to the
    /// title so the classifier sees both.
    pub async fn analyze_news(&self, title: &str, description: &str) -> Result<SentimentResult> {
        let text = if description.trim().is_empty() {
            title.to_string()
        } else {
            format!("{title}. {description}")
        };
        self.analyze(&text).await
    }

    pub async fn analyze(&self, text: &str) -> Result<SentimentResult> {
        if text.trim().chars().count() < MIN_INPUT_LEN {
            bail!("text is too short for sentiment analysis");
        }
        let Some(token) = &self.api_token else {
            bail!("sentiment model endpoint is not configured");
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&serde_json::json!({ "inputs": text }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .context("sentiment request failed")?
            .error_for_status()
            .context("sentiment endpoint rejected the request")?;

        let batches: Vec<Vec<LabelScore>> = response
            .json()
            .await
            .context("invalid sentiment response")?;
        let labels = batches
            .into_iter()
            .next()
            .context("sentiment endpoint returned no scores")?;

        let result = build_result(labels)?;
        info!(
            label = %result.label,
            confidence = result.confidence,
            "sentiment classified"
        );
        Ok(result)
    }
}

fn build_result(labels: Vec<LabelScore>) -> Result<SentimentResult> {
    let mut scores = SentimentScores::default();
    for entry in &labels {
        match entry.label.to_ascii_lowercase().as_str() {
            "positive" => scores.positive = round4(entry.score),
            "negative" => scores.negative = round4(entry.score),
            "neutral" => scores.neutral = round4(entry.score),
            _ => {}
        }
    }

    let top = labels
        .iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
        .context("sentiment endpoint returned an empty label set")?;
    let label = top.label.to_ascii_lowercase();

    Ok(SentimentResult {
        direction: direction_for(&label).to_string(),
        confidence: round4(top.score),
        label,
        scores,
    })
}

/// The user-facing direction for a model label. Total over the label set;
/// unknown labels read as neutral.
pub fn direction_for(label: &str) -> &'static str {
    match label {
        "positive" => "favorable",
        "negative" => "unfavorable",
        _ => "neutral",
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &str, score: f64) -> LabelScore {
        LabelScore { label: name.to_string(), score }
    }

    #[test]
    fn direction_mapping_is_total() {
        assert_eq!(direction_for("positive"), "favorable");
        assert_eq!(direction_for("negative"), "unfavorable");
        assert_eq!(direction_for("neutral"), "neutral");
        assert_eq!(direction_for("anything-else"), "neutral");
    }

    #[test]
    fn build_result_picks_winning_label() {
        let result = build_result(vec![
            label("positive", 0.91234567),
            label("negative", 0.05),
            label("neutral", 0.03765433),
        ])
        .unwrap();
        assert_eq!(result.label, "positive");
        assert_eq!(result.direction, "favorable");
        assert_eq!(result.confidence, 0.9123);
        assert_eq!(result.scores.positive, 0.9123);
        assert_eq!(result.scores.negative, 0.05);
        assert_eq!(result.scores.neutral, 0.0377);
    }

    #[test]
    fn build_result_rejects_empty_labels() {
        assert!(build_result(Vec::new()).is_err());
    }

    #[tokio::test]
    async fn short_input_is_rejected_before_any_call() {
        let analyzer = SentimentAnalyzer::new(reqwest::Client::new(), None, None);
        let err = analyzer.analyze("hi").await.unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[tokio::test]
    async fn unconfigured_endpoint_is_an_error() {
        let analyzer = SentimentAnalyzer::new(reqwest::Client::new(), None, None);
        let err = analyzer
            .analyze("Company files for bankruptcy amid mounting debts")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn combines_title_and_description() {
        // exercised through the length gate: title alone is too short, the
        // combined text is not, so the failure comes from configuration
        let analyzer = SentimentAnalyzer::new(reqwest::Client::new(), None, None);
        let err = analyzer.analyze_news("Up", "Shares of the company doubled").await.unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
