// Core data structures for the ranobe downloader

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One chapter fetch attempt, produced by the acquisition loop's URL
/// generator. Immutable once constructed; discarded after the attempt
/// completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRequest {
    pub url: String,
    pub chapter_number: u32,
    pub volume_number: u32,
}

impl ChapterRequest {
    pub fn new(url: impl Into<String>, chapter_number: u32, volume_number: u32) -> Self {
        Self {
            url: url.into(),
            chapter_number,
            volume_number,
        }
    }
}

/// Extracted chapter content and metadata
///
/// Invariant: `body` is non-empty. Records shorter than the loop's minimum
/// body length are rejected before persisting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChapterRecord {
    /// Chapter title, if any title selector matched
    pub title: Option<String>,

    /// Extracted body text, paragraphs separated by blank lines
    pub body: String,

    /// Chapter number parsed from the URL or title
    pub chapter_number: Option<u32>,

    /// Volume number parsed from the URL
    pub volume_number: Option<u32>,

    /// URL the chapter was extracted from
    pub source_url: String,
}

impl ChapterRecord {
    /// Body length in characters (not bytes)
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }

    /// Title to display, substituting a synthetic one when missing
    pub fn display_title(&self, chapter_number: u32) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => format!("Chapter {chapter_number}"),
        }
    }
}

/// Result of a complete download run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DownloadSummary {
    /// Chapters successfully persisted during this run
    pub persisted: usize,

    /// Path to the merged archive, when a merge produced one
    pub archive_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_request_new() {
        let req = ChapterRequest::new("https://example.org/v1/c5", 5, 1);
        assert_eq!(req.chapter_number, 5);
        assert_eq!(req.volume_number, 1);
        assert!(req.url.ends_with("/c5"));
    }

    #[test]
    fn test_body_len_counts_chars() {
        let record = ChapterRecord {
            body: "глава".to_string(),
            ..Default::default()
        };
        assert_eq!(record.body_len(), 5);
        assert!(record.body.len() > 5); // bytes, not chars
    }

    #[test]
    fn test_display_title_present() {
        let record = ChapterRecord {
            title: Some("The Beginning".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_title(3), "The Beginning");
    }

    #[test]
    fn test_display_title_missing() {
        let record = ChapterRecord::default();
        assert_eq!(record.display_title(3), "Chapter 3");
    }

    #[test]
    fn test_display_title_blank() {
        let record = ChapterRecord {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_title(7), "Chapter 7");
    }
}
