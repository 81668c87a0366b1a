//! Whitespace and character normalization for extracted article text.
//!
//! Extraction joins element texts with double newlines to mark paragraph
//! boundaries; everything else in the raw text (navigation glue, tabs,
//! decorative Unicode) is noise. `normalize` deletes characters outside a
//! fixed allow-list and collapses whitespace while keeping those paragraph
//! boundaries intact.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Characters allowed in cleaned article text: word characters, whitespace,
/// and basic punctuation. Everything else is deleted, not replaced.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\w\s.,!?;:()\-"']"#).expect("valid character allow-list"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Normalize raw extracted text.
///
/// Runs of whitespace collapse to a single space, except runs containing two
/// or more newlines, which become exactly two (a paragraph boundary). The
/// result is trimmed. Total and idempotent: any input yields a valid result,
/// and normalizing twice changes nothing.
pub fn normalize(raw: &str) -> String {
    let stripped = DISALLOWED.replace_all(raw, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, |caps: &Captures| {
        let run = &caps[0];
        if run.matches('\n').count() >= 2 {
            "\n\n".to_string()
        } else {
            " ".to_string()
        }
    });
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("  This   is    some\ttext   "), "This is some text");
    }

    #[test]
    fn preserves_paragraph_breaks() {
        assert_eq!(
            normalize("first paragraph\n\nsecond paragraph"),
            "first paragraph\n\nsecond paragraph"
        );
    }

    #[test]
    fn collapses_newline_runs_to_paragraph_break() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n \n \n b"), "a\n\nb");
    }

    #[test]
    fn single_newline_becomes_space() {
        assert_eq!(normalize("line one\nline two"), "line one line two");
    }

    #[test]
    fn strips_disallowed_characters() {
        assert_eq!(normalize("hello \u{1F600} world"), "hello world");
        assert_eq!(normalize("em\u{2014}dash and \u{201C}smart quotes\u{201D}"), "emdash and smart quotes");
        assert_eq!(normalize("ctrl\u{0007}chars"), "ctrlchars");
    }

    #[test]
    fn keeps_allowed_punctuation() {
        let text = r#"Stocks rose 3.5% - no, wait: "fell" (sharply), analysts said!"#;
        // '%' is not in the allow-list, the rest is
        assert_eq!(
            normalize(text),
            r#"Stocks rose 3.5 - no, wait: "fell" (sharply), analysts said!"#
        );
    }

    #[test]
    fn keeps_unicode_word_characters() {
        assert_eq!(normalize("주식 시장이 상승했다"), "주식 시장이 상승했다");
    }

    #[test]
    fn total_on_degenerate_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
        assert_eq!(normalize("\u{1F600}\u{1F601}"), "");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "  a   b\n\n\nc  ",
            "plain text",
            "one\ntwo\n\nthree\t\tfour \u{1F600}",
            "",
            "   ",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
