//! Ordered selector tables driving the extraction cascade.
//!
//! Ordering is a priority policy, not an optimization: rules are tried in
//! listed order and the first rule producing acceptable output wins. The
//! tables are constant configuration data, safe for unlimited concurrent
//! reads.

/// A content-bearing selector rule: a CSS expression plus the minimum
/// trimmed text length an individual matching element must exceed.
#[derive(Debug, Clone, Copy)]
pub struct SelectorRule {
    pub css: &'static str,
    pub min_len: usize,
}

/// Minimum trimmed length for an acceptable title candidate.
pub const MIN_TITLE_LEN: usize = 10;
/// Minimum normalized length for acceptable article content.
pub const MIN_CONTENT_LEN: usize = 50;
/// Minimum trimmed length for a paragraph in the `<p>` fallback.
pub const MIN_PARAGRAPH_LEN: usize = 30;
/// Minimum length for the `<div>` fallback; higher because untargeted
/// containers are more likely to capture navigation chrome.
pub const MIN_DIV_LEN: usize = 100;
/// Minimum length for the whole-body fallback, the least targeted of all.
pub const MIN_BODY_LEN: usize = 200;

pub const TITLE_SELECTORS: &[&str] = &[
    "h1",
    ".headline",
    ".title",
    ".article-title",
    ".story-headline",
    ".entry-title",
    r#"[data-testid="headline"]"#,
];

const fn content_rule(css: &'static str) -> SelectorRule {
    SelectorRule { css, min_len: MIN_CONTENT_LEN }
}

/// Article-body candidates: generic container patterns first, then patterns
/// observed on specific major news sites.
pub static CONTENT_RULES: &[SelectorRule] = &[
    content_rule("article .content"),
    content_rule(".article-body"),
    content_rule(".story-content"),
    content_rule(".entry-content"),
    content_rule(r#"[data-testid="article-content"]"#),
    content_rule(".post-content"),
    content_rule(".article-text"),
    content_rule(".article-content"),
    content_rule(".story-body"),
    content_rule(".article-section"),
    content_rule(".article-page"),
    content_rule(".article__content"),
    content_rule(".article-main"),
    content_rule(".article-wrapper"),
    content_rule(".article-content-body"),
    content_rule(".article__body"),
    content_rule(".story__body"),
    content_rule(".content-body"),
    content_rule(".main-content"),
    content_rule(".article-text-content"),
    content_rule(".entry-body"),
    content_rule(".post-body"),
    content_rule(".article-main-content"),
    content_rule(".news-content"),
    content_rule(".article-container"),
    content_rule(".content-container"),
    content_rule(".article-wrapper-content"),
    content_rule(".story-wrapper"),
    content_rule(".article-inner"),
    content_rule(".content-inner"),
    // NPR
    content_rule(".storytext"),
    content_rule(".transcript"),
    // BBC
    content_rule(".story-body__inner"),
    content_rule(".gel-layout__item"),
    // CNN
    content_rule(".zn-body__paragraph"),
    content_rule(".l-container"),
    // Reuters
    content_rule(".StandardArticleBody_body"),
    content_rule(".ArticleBodyWrapper"),
    // AP
    content_rule(".Article"),
    content_rule(".ArticleBody"),
];

pub const AUTHOR_SELECTORS: &[&str] = &[
    ".author",
    ".byline",
    ".writer",
    r#"[data-testid="author"]"#,
];

pub const DATE_SELECTORS: &[&str] = &[
    ".date",
    ".published",
    ".timestamp",
    r#"[data-testid="date"]"#,
];

pub const IMAGE_SELECTORS: &[&str] = &["article img", ".article img", ".story img", "img"];

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn all_selectors_parse() {
        for rule in CONTENT_RULES {
            assert!(Selector::parse(rule.css).is_ok(), "bad selector: {}", rule.css);
        }
        for css in TITLE_SELECTORS
            .iter()
            .chain(AUTHOR_SELECTORS)
            .chain(DATE_SELECTORS)
            .chain(IMAGE_SELECTORS)
        {
            assert!(Selector::parse(css).is_ok(), "bad selector: {css}");
        }
    }

    #[test]
    fn generic_containers_precede_site_patterns() {
        let generic = CONTENT_RULES.iter().position(|r| r.css == ".article-body").unwrap();
        let site = CONTENT_RULES.iter().position(|r| r.css == ".storytext").unwrap();
        assert!(generic < site);
    }
}
