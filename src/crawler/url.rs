//! Chapter URL generation and novel identity extraction
//!
//! Start URLs follow the `<base>/v<volume>/c<chapter>` template. The base
//! path (protocol, host, book identifier) and the volume segment are kept
//! verbatim across iterations; only the chapter index is substituted.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::error::CrawlError;

static CHAPTER_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)/v(\d+)/c(\d+)").unwrap());

// Book identifier patterns across supported mirrors:
//   /ru/book/195738--some-novel/read/...
//   /r/195738--some-novel/v01/c01
static SLUG_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"/ru/book/\d+--([^/]+)").unwrap(),
        Regex::new(r"/r/\d+--([^/]+)").unwrap(),
    ]
});

const UNKNOWN_SLUG: &str = "unknown-novel";

/// A parsed chapter URL template
///
/// The volume segment is stored exactly as it appeared (`v01` stays `v01`)
/// so generated URLs match the site's own format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterUrl {
    base: String,
    volume_segment: String,
}

impl ChapterUrl {
    /// Parse a start URL against the `<base>/v<volume>/c<chapter>` template
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::MalformedUrl` when the URL does not match; this
    /// is fatal and aborts the run before any navigation.
    pub fn parse(url: &str) -> Result<Self, CrawlError> {
        let caps = CHAPTER_TEMPLATE
            .captures(url)
            .ok_or_else(|| CrawlError::MalformedUrl(url.to_string()))?;

        Ok(Self {
            base: caps[1].to_string(),
            volume_segment: caps[2].to_string(),
        })
    }

    /// Build the URL for a given chapter number
    pub fn for_chapter(&self, chapter: u32) -> String {
        format!("{}/v{}/c{}", self.base, self.volume_segment, chapter)
    }

    /// Volume number parsed from the preserved segment
    pub fn volume(&self) -> u32 {
        self.volume_segment.parse().unwrap_or(0)
    }
}

/// Extract the novel slug used for the output directory
///
/// Falls back to a fixed placeholder when no known pattern matches.
pub fn novel_slug(url: &str) -> String {
    for pattern in SLUG_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(url) {
            return caps[1].to_string();
        }
    }
    UNKNOWN_SLUG.to_string()
}

/// Everything the loop needs to identify a novel: the URL template and the
/// slug naming its output directory
#[derive(Debug, Clone)]
pub struct NovelTarget {
    pub url: ChapterUrl,
    pub slug: String,
}

impl NovelTarget {
    /// Parse a start URL into a download target
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::MalformedUrl` when the chapter template does not
    /// match.
    pub fn parse(start_url: &str) -> Result<Self, CrawlError> {
        Ok(Self {
            url: ChapterUrl::parse(start_url)?,
            slug: novel_slug(start_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_generate() {
        let url = ChapterUrl::parse("https://ranobe.org/r/195738--myst-might-mayhem/v1/c5").unwrap();
        assert_eq!(
            url.for_chapter(5),
            "https://ranobe.org/r/195738--myst-might-mayhem/v1/c5"
        );
        assert_eq!(
            url.for_chapter(6),
            "https://ranobe.org/r/195738--myst-might-mayhem/v1/c6"
        );
        assert_eq!(
            url.for_chapter(7),
            "https://ranobe.org/r/195738--myst-might-mayhem/v1/c7"
        );
    }

    #[test]
    fn test_volume_segment_preserved() {
        let url = ChapterUrl::parse("https://example.org/ru/book/1--novel/read/v01/c01").unwrap();
        assert_eq!(
            url.for_chapter(2),
            "https://example.org/ru/book/1--novel/read/v01/c2"
        );
        assert_eq!(url.volume(), 1);
    }

    #[test]
    fn test_malformed_url() {
        let result = ChapterUrl::parse("https://example.org/ru/book/1--novel");
        assert!(matches!(result, Err(CrawlError::MalformedUrl(_))));
    }

    #[test]
    fn test_slug_ranobelib_pattern() {
        let slug = novel_slug("https://ranobelib.me/ru/book/195738--myst-might-mayhem/read/v01/c01");
        assert_eq!(slug, "myst-might-mayhem");
    }

    #[test]
    fn test_slug_short_pattern() {
        let slug = novel_slug("https://ranobe.org/r/195738--myst-might-mayhem/v01/c01");
        assert_eq!(slug, "myst-might-mayhem");
    }

    #[test]
    fn test_slug_fallback() {
        assert_eq!(novel_slug("https://example.org/v1/c1"), "unknown-novel");
    }

    #[test]
    fn test_target_parse() {
        let target = NovelTarget::parse("https://ranobe.org/r/1--the-novel/v2/c10").unwrap();
        assert_eq!(target.slug, "the-novel");
        assert_eq!(target.url.volume(), 2);
    }

    #[test]
    fn test_target_parse_malformed() {
        assert!(NovelTarget::parse("not a chapter url").is_err());
    }
}
