//! Content locator and metadata extractor.
//!
//! Both operate on a parsed document and never fail: the locator degrades
//! through a cascade of increasingly generic strategies down to a sentinel
//! title or empty content, and metadata lookups are best-effort per key.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::normalize::normalize;
use crate::selectors::{
    SelectorRule, AUTHOR_SELECTORS, CONTENT_RULES, DATE_SELECTORS, IMAGE_SELECTORS, MIN_BODY_LEN,
    MIN_CONTENT_LEN, MIN_DIV_LEN, MIN_PARAGRAPH_LEN, MIN_TITLE_LEN, TITLE_SELECTORS,
};
use crate::types::ArticleMetadata;

/// Sentinel returned when no title candidate clears the length threshold.
pub const TITLE_NOT_FOUND: &str = "Title not found";

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Locate the article title. Total: falls back to the `og:title` meta tag
/// and then to [`TITLE_NOT_FOUND`].
pub fn locate_title(doc: &Html) -> String {
    for css in TITLE_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(element) = doc.select(&selector).next() {
            let title = element_text(&element);
            if title.chars().count() > MIN_TITLE_LEN {
                return title;
            }
        }
    }

    if let Ok(selector) = Selector::parse(r#"meta[property="og:title"]"#) {
        if let Some(element) = doc.select(&selector).next() {
            if let Some(content) = element.value().attr("content") {
                let content = content.trim();
                if !content.is_empty() {
                    return content.to_string();
                }
            }
        }
    }

    TITLE_NOT_FOUND.to_string()
}

/// Locate the article body text.
///
/// Cascade, first success wins:
/// 1. the ordered [`CONTENT_RULES`] table, joining every sufficiently long
///    matching element with paragraph breaks;
/// 2. all `<p>` elements over [`MIN_PARAGRAPH_LEN`] chars, joined;
/// 3. the single longest `<div>` over [`MIN_DIV_LEN`] chars;
/// 4. the whole `<body>` text, if over [`MIN_BODY_LEN`] chars.
///
/// Returns an empty string when every strategy fails; that empty result is
/// the orchestrator's failure signal.
pub fn locate_content(doc: &Html) -> String {
    if let Some(content) = content_from_rules(doc, CONTENT_RULES) {
        return content;
    }

    // Paragraph fallback: concatenation of every substantial <p>.
    if let Ok(selector) = Selector::parse("p") {
        let parts: Vec<String> = doc
            .select(&selector)
            .map(|el| element_text(&el))
            .filter(|text| text.chars().count() > MIN_PARAGRAPH_LEN)
            .collect();
        if !parts.is_empty() {
            let content = normalize(&parts.join("\n\n"));
            if content.chars().count() > MIN_CONTENT_LEN {
                debug!(chars = content.chars().count(), "content extracted from <p> fallback");
                return content;
            }
        }
    }

    // Division fallback: the single longest text block, not a concatenation,
    // since generic <div>s nest and overlap.
    if let Ok(selector) = Selector::parse("div") {
        let longest = doc
            .select(&selector)
            .map(|el| element_text(&el))
            .filter(|text| text.chars().count() > MIN_DIV_LEN)
            .max_by_key(|text| text.chars().count());
        if let Some(text) = longest {
            let content = normalize(&text);
            if content.chars().count() > MIN_DIV_LEN {
                debug!(chars = content.chars().count(), "content extracted from <div> fallback");
                return content;
            }
        }
    }

    // Last resort: the whole page body.
    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = doc.select(&selector).next() {
            let content = normalize(&element_text(&body));
            if content.chars().count() > MIN_BODY_LEN {
                debug!(chars = content.chars().count(), "content extracted from <body> fallback");
                return content;
            }
        }
    }

    String::new()
}

fn content_from_rules(doc: &Html, rules: &[SelectorRule]) -> Option<String> {
    for rule in rules {
        let Ok(selector) = Selector::parse(rule.css) else {
            continue;
        };
        let parts: Vec<String> = doc
            .select(&selector)
            .map(|el| element_text(&el))
            .filter(|text| text.chars().count() > rule.min_len)
            .collect();
        if parts.is_empty() {
            continue;
        }
        let content = normalize(&parts.join("\n\n"));
        if content.chars().count() > MIN_CONTENT_LEN {
            debug!(
                selector = rule.css,
                chars = content.chars().count(),
                "content selector matched"
            );
            return Some(content);
        }
    }
    None
}

/// Best-effort metadata extraction. Each key is looked up independently
/// through its own small selector list; a miss leaves the field unset and
/// never affects the scrape.
pub fn extract_metadata(doc: &Html) -> ArticleMetadata {
    ArticleMetadata {
        author: first_matching_text(doc, AUTHOR_SELECTORS),
        published_date: first_matching_text(doc, DATE_SELECTORS),
        image_url: first_matching_attr(doc, IMAGE_SELECTORS, "src"),
    }
}

fn first_matching_text(doc: &Html, selectors: &[&str]) -> Option<String> {
    for css in selectors {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(element) = doc.select(&selector).next() {
            let text = element_text(&element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn first_matching_attr(doc: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    for css in selectors {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(value) = doc
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr))
        {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
