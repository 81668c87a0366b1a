//! Typed failure taxonomy for the scrape pipeline.

use thiserror::Error;

/// Everything that can go wrong while fetching and extracting an article.
///
/// The locator itself never errors; fetchers surface these and the
/// orchestrator converts whatever reaches it into a `ScrapeOutcome::Failure`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Extraction ran but found too little text to count as an article.
    #[error("no article content found (extracted {chars} chars)")]
    ContentInsufficient { chars: usize },

    #[error("failed to launch browser: {0}")]
    BrowserLaunch(String),

    /// Navigation or in-page failure from the rendering tier, carrying a
    /// user-facing message once classified.
    #[error("{0}")]
    Render(String),
}
