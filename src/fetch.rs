//! Static HTTP tier of the scrape pipeline.
//!
//! A plain GET with browser-like headers, parsed with `scraper`. Cheap and
//! sufficient for server-rendered pages; the orchestrator escalates to the
//! rendering tier when this path fails.

use std::time::Duration;

use scraper::Html;
use tracing::{debug, info};
use url::Url;

use crate::error::ScrapeError;
use crate::extract::{extract_metadata, locate_content, locate_title};
use crate::selectors::MIN_CONTENT_LEN;
use crate::types::ArticleRecord;

/// Shared by both tiers so extraction sees the same markup variant a site
/// serves to this browser identity.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch and extract an article over plain HTTP.
///
/// Fails fast on non-2xx responses and transport errors, and reports
/// [`ScrapeError::ContentInsufficient`] when the page parsed but the locator
/// could not find enough text.
pub async fn fetch_static(client: &reqwest::Client, url: &str) -> Result<ArticleRecord, ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(format!("{url}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ScrapeError::InvalidUrl(format!(
            "{url}: only http and https URLs are supported"
        )));
    }

    debug!("Fetching {url} over plain HTTP");
    let response = client
        .get(parsed)
        .header("User-Agent", USER_AGENT)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.5")
        .header("Connection", "keep-alive")
        .timeout(FETCH_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;

    let html = response.text().await?;
    let record = extract_article(&html, url)?;
    info!(
        url,
        chars = record.content.chars().count(),
        "static fetch extracted article"
    );
    Ok(record)
}

/// Run the locator and metadata extractor over an HTML document and apply
/// the success gate. Shared with the rendering tier, which feeds it the
/// serialized post-render DOM.
pub(crate) fn extract_article(html: &str, url: &str) -> Result<ArticleRecord, ScrapeError> {
    let doc = Html::parse_document(html);

    let title = locate_title(&doc);
    let content = locate_content(&doc);

    let chars = content.chars().count();
    if chars <= MIN_CONTENT_LEN {
        return Err(ScrapeError::ContentInsufficient { chars });
    }

    Ok(ArticleRecord {
        url: url.to_string(),
        title,
        content,
        metadata: extract_metadata(&doc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_article_gates_on_content_length() {
        let html = "<html><body><h1>A headline long enough</h1><p>too short</p></body></html>";
        match extract_article(html, "https://example.com/a") {
            Err(ScrapeError::ContentInsufficient { chars }) => assert_eq!(chars, 0),
            other => panic!("expected ContentInsufficient, got {other:?}"),
        }
    }

    #[test]
    fn extract_article_success_carries_title_and_metadata() {
        let body: String = "Markets moved sharply higher in early trading today. ".repeat(4);
        let html = format!(
            r#"<html><body>
            <h1>Markets Rally On Rate Hopes</h1>
            <span class="byline">Sam Analyst</span>
            <div class="article-body">{body}</div>
            </body></html>"#
        );
        let record = extract_article(&html, "https://example.com/markets").unwrap();
        assert_eq!(record.title, "Markets Rally On Rate Hopes");
        assert!(record.content.chars().count() > MIN_CONTENT_LEN);
        assert_eq!(record.metadata.author.as_deref(), Some("Sam Analyst"));
        assert_eq!(record.url, "https://example.com/markets");
    }

    #[tokio::test]
    async fn rejects_non_http_schemes() {
        let client = reqwest::Client::new();
        let result = fetch_static(&client, "ftp://example.com/article").await;
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }
}
