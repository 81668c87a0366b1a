//! Scrape orchestration: a strict two-tier escalation.
//!
//! The cheap static fetch runs first; the expensive browser tier runs only
//! on demonstrated need, and its outcome is terminal. There are no retries
//! beyond these two attempts and no partial combination of their results.

use std::future::Future;

use tracing::{info, warn};

use crate::browser;
use crate::error::ScrapeError;
use crate::fetch;
use crate::types::{ArticleRecord, ScrapeOutcome};
use crate::AppState;

/// Scrape an article URL, escalating from static fetch to headless
/// rendering when needed. Every failure mode comes back as a
/// [`ScrapeOutcome::Failure`], never as an error.
pub async fn scrape_article(state: &AppState, url: &str) -> ScrapeOutcome {
    info!("Scraping article: {url}");
    run_two_tier(
        url,
        fetch::fetch_static(&state.http_client, url),
        browser::fetch_rendered(url),
    )
    .await
}

/// The escalation policy, separated from the concrete fetchers. The render
/// future is only polled when the static tier fails.
pub(crate) async fn run_two_tier<S, R>(url: &str, static_tier: S, render_tier: R) -> ScrapeOutcome
where
    S: Future<Output = Result<ArticleRecord, ScrapeError>>,
    R: Future<Output = Result<ArticleRecord, ScrapeError>>,
{
    match static_tier.await {
        Ok(record) => {
            info!("static fetch succeeded for {url}");
            return ScrapeOutcome::Success(record);
        }
        Err(e) => {
            warn!("static fetch failed for {url}: {e}; escalating to rendered fetch");
        }
    }

    match render_tier.await {
        Ok(record) => {
            info!("rendered fetch succeeded for {url}");
            ScrapeOutcome::Success(record)
        }
        Err(e) => {
            warn!("rendered fetch failed for {url}: {e}");
            ScrapeOutcome::Failure { reason: e.to_string(), url: url.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArticleMetadata;

    fn record(url: &str) -> ArticleRecord {
        ArticleRecord {
            url: url.to_string(),
            title: "A sufficiently long headline".into(),
            content: "c".repeat(60),
            metadata: ArticleMetadata::default(),
        }
    }

    #[tokio::test]
    async fn static_success_is_terminal() {
        let url = "https://example.com/a";
        let outcome = run_two_tier(
            url,
            async { Ok(record(url)) },
            // never polled: a static success must not touch the render tier
            async { panic!("render tier must not run") },
        )
        .await;
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn static_failure_escalates_to_render() {
        let url = "https://example.com/b";
        let outcome = run_two_tier(
            url,
            async { Err(ScrapeError::ContentInsufficient { chars: 0 }) },
            async { Ok(record(url)) },
        )
        .await;
        match outcome {
            ScrapeOutcome::Success(r) => assert_eq!(r.url, url),
            other => panic!("expected success from render tier, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn render_failure_is_terminal_failure() {
        let url = "https://example.com/c";
        let outcome = run_two_tier(
            url,
            async { Err(ScrapeError::ContentInsufficient { chars: 10 }) },
            async {
                Err(ScrapeError::Render(
                    "The page took too long to load. Please try again.".into(),
                ))
            },
        )
        .await;
        match outcome {
            ScrapeOutcome::Failure { reason, url: failed_url } => {
                assert_eq!(failed_url, url);
                assert!(reason.contains("too long to load"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
