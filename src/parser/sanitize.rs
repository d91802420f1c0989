//! Text cleanup for extracted chapter content
//!
//! Rendered pages carry layout whitespace that has nothing to do with the
//! prose: indentation runs, stray blank lines, tabs between inline spans.
//! These helpers normalize extracted text before it is persisted.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex patterns
static ANY_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static MULTI_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapse a text fragment onto a single line
///
/// Used for individual paragraphs and titles: all whitespace runs (including
/// newlines) become single spaces, and the result is trimmed.
///
/// # Examples
///
/// ```
/// use ranobe::parser::sanitize::clean_fragment;
///
/// let raw = "  He walked\n    into the\tnight.  ";
/// assert_eq!(clean_fragment(raw), "He walked into the night.");
/// ```
pub fn clean_fragment(text: &str) -> String {
    ANY_WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Sanitize multi-line text while preserving paragraph structure
///
/// Applies three steps: collapse space/tab runs, trim each line, and cap
/// consecutive newlines at two.
///
/// # Examples
///
/// ```
/// use ranobe::parser::sanitize::sanitize_text;
///
/// let raw = "Para one  \n\n\n\n  Para two";
/// assert_eq!(sanitize_text(raw), "Para one\n\nPara two");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let mut result = SPACE_RUN.replace_all(text, " ").to_string();
    result = trim_lines(&result);
    result = collapse_newlines(&result);
    result.trim().to_string()
}

/// Trim whitespace from each line, preserving line structure
pub fn trim_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse 3+ consecutive newlines to exactly 2
pub fn collapse_newlines(text: &str) -> String {
    MULTI_NEWLINE.replace_all(text, "\n\n").to_string()
}

/// Check if text contains meaningful content
///
/// # Examples
///
/// ```
/// use ranobe::parser::sanitize::has_content;
///
/// assert!(has_content("Hello"));
/// assert!(!has_content("   \n\t  "));
/// ```
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}
