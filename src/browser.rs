//! Rendering tier: a per-call headless Chromium instance for pages that
//! only produce their content client-side.
//!
//! Each call launches an isolated browser, navigates with bounded waits,
//! lets deferred content settle, extracts from the rendered DOM, and tears
//! the browser down on every exit path.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::fetch::{extract_article, USER_AGENT};
use crate::types::ArticleRecord;

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
const LOAD_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
/// Fixed wait after load so deferred client-side content can populate.
const SETTLE_DELAY: Duration = Duration::from_secs(3);

const VIEWPORT_WIDTH: u32 = 1920;
const VIEWPORT_HEIGHT: u32 = 1080;

const CHROME_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--disable-gpu",
];

/// Fetch and extract an article through a headless browser.
///
/// The browser instance is scoped to this call and shut down before it
/// returns, whatever the outcome.
pub async fn fetch_rendered(url: &str) -> Result<ArticleRecord, ScrapeError> {
    info!("Fetching {url} with headless browser");

    let config = BrowserConfig::builder()
        .viewport(Some(Viewport {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            device_scale_factor: Some(1.0),
            ..Default::default()
        }))
        .args(CHROME_ARGS.iter().copied())
        .build()
        .map_err(ScrapeError::BrowserLaunch)?;

    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;
    let event_loop = tokio::spawn(async move { while handler.next().await.is_some() {} });

    let result = fetch_in_browser(&browser, url).await;

    // Teardown runs on every path, including errors above this point having
    // already returned before a browser existed.
    if let Err(e) = browser.close().await {
        debug!("browser close reported: {e}");
    }
    event_loop.abort();

    result.map_err(classify_render_error)
}

async fn fetch_in_browser(browser: &Browser, url: &str) -> Result<ArticleRecord, ScrapeError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| ScrapeError::Render(e.to_string()))?;

    let result = fetch_on_page(&page, url).await;
    if let Err(e) = page.close().await {
        debug!("page close reported: {e}");
    }
    result
}

async fn fetch_on_page(page: &Page, url: &str) -> Result<ArticleRecord, ScrapeError> {
    // Same identity as the static tier, set before any navigation.
    page.execute(SetUserAgentOverrideParams::new(USER_AGENT.to_string()))
        .await
        .map_err(|e| ScrapeError::Render(e.to_string()))?;

    tokio::time::timeout(NAVIGATION_TIMEOUT, page.goto(url))
        .await
        .map_err(|_| {
            ScrapeError::Render(format!(
                "navigation timed out after {}s",
                NAVIGATION_TIMEOUT.as_secs()
            ))
        })?
        .map_err(|e| ScrapeError::Render(e.to_string()))?;

    // Secondary wait for the load lifecycle; non-fatal when it expires.
    match tokio::time::timeout(LOAD_WAIT_TIMEOUT, page.wait_for_navigation()).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => debug!("load-state wait failed, continuing: {e}"),
        Err(_) => warn!("load-state wait expired, continuing"),
    }

    tokio::time::sleep(SETTLE_DELAY).await;

    // Liveness probe: a page torn down during the settle delay fails here
    // rather than mid-extraction.
    page.get_title()
        .await
        .map_err(|e| ScrapeError::Render(format!("page closed during load: {e}")))?;

    let html = page
        .content()
        .await
        .map_err(|e| ScrapeError::Render(e.to_string()))?;

    let record = extract_article(&html, url)?;
    info!(
        url,
        chars = record.content.chars().count(),
        "rendered fetch extracted article"
    );
    Ok(record)
}

/// Map known failure substrings onto user-facing messages; anything
/// unrecognized passes through unchanged. Only navigation/render errors are
/// classified — content-insufficient results keep their diagnostic.
fn classify_render_error(err: ScrapeError) -> ScrapeError {
    match err {
        ScrapeError::Render(msg) => ScrapeError::Render(classify_message(msg)),
        other => other,
    }
}

fn classify_message(msg: String) -> String {
    let lower = msg.to_ascii_lowercase();
    if msg.contains("Target page, context or browser has been closed") || lower.contains("page closed")
    {
        "The page closed while loading. Please try again.".to_string()
    } else if lower.contains("timeout") || lower.contains("timed out") {
        "The page took too long to load. Please try again.".to_string()
    } else if msg.contains("net::") {
        "A network error occurred. Check your internet connection.".to_string()
    } else {
        msg
    }
}
