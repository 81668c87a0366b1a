use serde::{Deserialize, Serialize};

/// Best-effort article metadata. Any subset may be absent; extraction
/// failures here never fail a scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One successfully extracted article. Constructed once per fetch attempt,
/// never mutated, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub title: String,
    pub content: String,
    pub metadata: ArticleMetadata,
}

/// Terminal result of a scrape. There is no partial-success variant:
/// content at or below the length threshold is a full failure even when a
/// title was found.
#[derive(Debug, Clone)]
pub enum ScrapeOutcome {
    Success(ArticleRecord),
    Failure { reason: String, url: String },
}

impl ScrapeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeOutcome::Success(_))
    }
}

// --- API request/response types ---

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ArticleMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ScrapeOutcome> for ScrapeResponse {
    fn from(outcome: ScrapeOutcome) -> Self {
        match outcome {
            ScrapeOutcome::Success(record) => ScrapeResponse {
                success: true,
                title: Some(record.title),
                content: Some(record.content),
                url: record.url,
                metadata: Some(record.metadata),
                error: None,
            },
            ScrapeOutcome::Failure { reason, url } => ScrapeResponse {
                success: false,
                title: None,
                content: None,
                url,
                metadata: None,
                error: Some(reason),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedArticle {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizedArticle {
    pub content: Option<String>,
}

/// Result of the full scrape → translate → summarize pipeline. `progress`
/// and `current_step` describe how far processing got before finishing or
/// failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<ArticleRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated: Option<TranslatedArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summarized: Option<SummarizedArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub progress: u8,
    pub current_step: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

fn default_target_lang() -> String {
    "ko".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
}

fn default_max_length() -> u32 {
    300
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub original: String,
    pub summarized: String,
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Classifier output: the winning model label, the user-facing direction
/// (favorable / unfavorable / neutral), the winning score, and the full
/// per-label distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: String,
    pub direction: String,
    pub confidence: f64,
    pub scores: SentimentScores,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub success: bool,
    pub sentiment: SentimentResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_failure_serializes_without_content() {
        let outcome = ScrapeOutcome::Failure {
            reason: "no article content found (extracted 0 chars)".into(),
            url: "https://example.com/x".into(),
        };
        let json = serde_json::to_value(ScrapeResponse::from(outcome)).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("content").is_none());
        assert!(json.get("title").is_none());
        assert!(json["error"].as_str().unwrap().contains("0 chars"));
    }

    #[test]
    fn scrape_success_serializes_record_fields() {
        let outcome = ScrapeOutcome::Success(ArticleRecord {
            url: "https://example.com/a".into(),
            title: "A headline".into(),
            content: "body text".into(),
            metadata: ArticleMetadata { author: Some("Jane".into()), ..Default::default() },
        });
        let json = serde_json::to_value(ScrapeResponse::from(outcome)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["metadata"]["author"], "Jane");
        assert!(json.get("error").is_none());
        // absent metadata keys are omitted, not null
        assert!(json["metadata"].get("image_url").is_none());
    }
}
