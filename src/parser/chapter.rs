//! Chapter content extractor with selector fallback chain
//!
//! Body extraction walks the content selector catalog in priority order and
//! short-circuits on the first selector producing usable text. Only when the
//! whole catalog fails does the largest-text-block heuristic run, trading
//! precision for resilience against markup drift on the source site.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

use crate::config::SelectorConfig;
use crate::models::ChapterRecord;
use crate::parser::sanitize::{clean_fragment, sanitize_text};
use crate::parser::selectors::SelectorCatalog;
use crate::utils::error::ParseError;

/// Fragments at or below this length are treated as boilerplate and dropped
const MIN_FRAGMENT_CHARS: usize = 20;

static CHAPTER_IN_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/c(\d+)").unwrap());

static VOLUME_IN_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/v(\d+)").unwrap());

static CHAPTER_IN_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:chapter|глава|ch\.?)\s*(\d+)").unwrap());

/// Extracts chapter text and metadata from rendered page markup
pub struct ChapterParser {
    catalog: SelectorCatalog,
}

impl ChapterParser {
    /// Create a parser from configured selector lists
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidSelector` if any configured selector
    /// fails to compile.
    pub fn new(config: &SelectorConfig) -> Result<Self, ParseError> {
        Ok(Self {
            catalog: SelectorCatalog::compile(config)?,
        })
    }

    /// Extract a chapter record from page markup
    ///
    /// # Errors
    ///
    /// Returns `ParseError::ContentNotFound` when no content selector
    /// matches and the fallback heuristic finds no text either. A missing
    /// title is not an error; callers substitute a synthetic one.
    pub fn extract(&self, html: &str, url: &str) -> Result<ChapterRecord, ParseError> {
        let document = Html::parse_document(html);

        let body = self
            .extract_body(&document)
            .ok_or(ParseError::ContentNotFound)?;

        let title = self.extract_title(&document);
        let chapter_number = chapter_number(url, title.as_deref());
        let volume_number = volume_number(url);

        Ok(ChapterRecord {
            title,
            body,
            chapter_number,
            volume_number,
            source_url: url.to_string(),
        })
    }

    /// Extract body text via the selector chain, then the fallback heuristic
    fn extract_body(&self, document: &Html) -> Option<String> {
        for (index, selector) in self.catalog.content.iter().enumerate() {
            let fragments = self.collect_fragments(document, selector);
            if !fragments.is_empty() {
                let body = fragments.join("\n\n");
                debug!(
                    selector_index = index,
                    chars = body.chars().count(),
                    "Extracted body via content selector"
                );
                return Some(body);
            }
        }

        warn!("No content selector matched, trying largest-block fallback");
        self.largest_text_block(document)
    }

    /// Collect filtered text fragments for all elements matching `selector`
    ///
    /// Paragraph-like descendants are preferred; an element with none
    /// contributes its own text instead. Fragments of `MIN_FRAGMENT_CHARS`
    /// or fewer characters are dropped.
    fn collect_fragments(&self, document: &Html, selector: &Selector) -> Vec<String> {
        let mut fragments = Vec::new();

        for element in document.select(selector) {
            let mut paragraphs = element.select(&self.catalog.paragraph).peekable();

            if paragraphs.peek().is_some() {
                for paragraph in paragraphs {
                    let text = clean_fragment(&paragraph.text().collect::<String>());
                    if text.chars().count() > MIN_FRAGMENT_CHARS {
                        fragments.push(text);
                    }
                }
            } else {
                let text = clean_fragment(&element.text().collect::<String>());
                if text.chars().count() > MIN_FRAGMENT_CHARS {
                    fragments.push(text);
                }
            }
        }

        fragments
    }

    /// Fallback: scan block-level candidates and keep the longest text
    fn largest_text_block(&self, document: &Html) -> Option<String> {
        let mut largest = String::new();

        for element in document.select(&self.catalog.block) {
            let text = sanitize_text(&element.text().collect::<Vec<_>>().join("\n\n"));
            if text.chars().count() > largest.chars().count() {
                largest = text;
            }
        }

        if largest.is_empty() {
            None
        } else {
            debug!(chars = largest.chars().count(), "Extracted body via fallback");
            Some(largest)
        }
    }

    /// First non-empty match of the title selector list, else `None`
    fn extract_title(&self, document: &Html) -> Option<String> {
        for selector in &self.catalog.title {
            if let Some(element) = document.select(selector).next() {
                let title = clean_fragment(&element.text().collect::<String>());
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
        None
    }

    /// Find the next-chapter link on the page, resolving relative hrefs
    /// against the page URL
    pub fn next_chapter_url(&self, html: &str, page_url: &str) -> Option<String> {
        let document = Html::parse_document(html);

        for selector in &self.catalog.next_link {
            for element in document.select(selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };
                if href.trim().is_empty() {
                    continue;
                }

                if let Ok(base) = Url::parse(page_url) {
                    if let Ok(resolved) = base.join(href) {
                        return Some(resolved.to_string());
                    }
                }
                return Some(href.to_string());
            }
        }

        None
    }
}

/// Parse the chapter number from a `/c<digits>` URL segment, falling back to
/// a textual pattern in the title
pub fn chapter_number(url: &str, title: Option<&str>) -> Option<u32> {
    if let Some(caps) = CHAPTER_IN_URL.captures(url) {
        return caps[1].parse().ok();
    }

    let title = title?;
    CHAPTER_IN_TITLE
        .captures(title)
        .and_then(|caps| caps[1].parse().ok())
}

/// Parse the volume number from a `/v<digits>` URL segment
pub fn volume_number(url: &str) -> Option<u32> {
    VOLUME_IN_URL
        .captures(url)
        .and_then(|caps| caps[1].parse().ok())
}
