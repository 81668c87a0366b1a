//! The full article pipeline: scrape, translate, then summarize.
//!
//! Only the scrape stage can fail the pipeline. Translation and
//! summarization are best-effort; their failures show up as placeholders in
//! the response, never as errors.

use chrono::Utc;
use tracing::{info, warn};

use crate::scrape;
use crate::summarize::DEFAULT_SUMMARY_LENGTH;
use crate::translate::DEFAULT_TARGET_LANG;
use crate::types::{
    ProcessResponse, ScrapeOutcome, SummarizedArticle, TranslatedArticle,
};
use crate::AppState;

pub async fn process_article(state: &AppState, url: &str) -> ProcessResponse {
    info!("Processing article: {url}");

    let record = match scrape::scrape_article(state, url).await {
        ScrapeOutcome::Success(record) => record,
        ScrapeOutcome::Failure { reason, url } => {
            warn!("scrape stage failed for {url}: {reason}");
            return ProcessResponse {
                success: false,
                original: None,
                translated: None,
                summarized: None,
                error: Some(reason),
                url: Some(url),
                progress: 25,
                current_step: "scrape failed".to_string(),
                timestamp: Utc::now().to_rfc3339(),
            };
        }
    };
    info!(progress = 25, "scrape stage complete");

    let translated_title = state.translator.translate(&record.title, DEFAULT_TARGET_LANG).await;
    let translated_content = state
        .translator
        .translate(&record.content, DEFAULT_TARGET_LANG)
        .await;
    info!(progress = 50, "translation stage complete");

    // Summarize the translation when there is one, the original otherwise.
    let summary_source = pick_summary_source(translated_content.as_deref(), &record.content);
    let summarized = state.summarizer.summarize(summary_source, DEFAULT_SUMMARY_LENGTH).await;
    info!(progress = 75, "summarization stage complete");

    info!(progress = 100, "article processing complete");
    ProcessResponse {
        success: true,
        original: Some(record),
        translated: Some(TranslatedArticle {
            title: translated_title,
            content: translated_content,
        }),
        summarized: Some(SummarizedArticle { content: summarized }),
        error: None,
        url: None,
        progress: 100,
        current_step: "complete".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }
}

fn pick_summary_source<'a>(translated: Option<&'a str>, original: &'a str) -> &'a str {
    match translated {
        Some(text) if !text.is_empty() => text,
        _ => original,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prefers_translation_when_present() {
        assert_eq!(pick_summary_source(Some("번역된 본문"), "original body"), "번역된 본문");
    }

    #[test]
    fn summary_falls_back_to_original() {
        assert_eq!(pick_summary_source(None, "original body"), "original body");
        assert_eq!(pick_summary_source(Some(""), "original body"), "original body");
    }
}
