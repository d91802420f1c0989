//! Error types for the ranobe downloader
//!
//! This module defines custom error types used throughout the application.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while navigating the rendering browser
#[derive(Error, Debug)]
pub enum NavigateError {
    /// Page responded with an HTTP error status
    #[error("HTTP {0} error")]
    Http(u16),

    /// Page load timed out
    #[error("Page load timeout")]
    Timeout,

    /// Render engine failure (launch, protocol, crashed page)
    #[error("Render engine error: {0}")]
    Engine(String),
}

/// Errors that can occur during chapter extraction
#[derive(Error, Debug)]
pub enum ParseError {
    /// No content selector matched and the fallback found no text
    #[error("Chapter content not found")]
    ContentNotFound,

    /// A configured selector could not be compiled
    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Errors that can occur while persisting or merging chapter artifacts
#[derive(Error, Debug)]
pub enum StorageError {
    /// Merge requested but the chapters directory holds no artifacts
    #[error("No chapter files found in {}", .0.display())]
    NoChaptersFound(PathBuf),

    /// Artifact template failed to register or render
    #[error("Template error: {0}")]
    Template(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<handlebars::TemplateError> for StorageError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<handlebars::RenderError> for StorageError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Template(err.to_string())
    }
}

/// Acquisition-loop errors
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Start URL does not match the `<base>/v<volume>/c<chapter>` template
    #[error("Start URL does not match <base>/v<volume>/c<chapter>: {0}")]
    MalformedUrl(String),

    /// Navigation failed after all retries
    #[error("Navigation failed: {0}")]
    Navigate(#[from] NavigateError),

    /// Extraction failed
    #[error("Extraction failed: {0}")]
    Parse(#[from] ParseError),

    /// Extraction produced too little text to be a real chapter
    #[error("Insufficient content: {len} chars")]
    InsufficientContent { len: usize },

    /// Storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CrawlError {
    /// Whether this error aborts the whole run rather than counting as a
    /// single chapter failure
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_error_display() {
        assert_eq!(NavigateError::Http(503).to_string(), "HTTP 503 error");
        assert_eq!(NavigateError::Timeout.to_string(), "Page load timeout");
    }

    #[test]
    fn test_crawl_error_conversion() {
        let err: CrawlError = NavigateError::Timeout.into();
        assert!(matches!(err, CrawlError::Navigate(_)));
        assert!(!err.is_fatal());

        let err: CrawlError = ParseError::ContentNotFound.into();
        assert!(matches!(err, CrawlError::Parse(_)));
    }

    #[test]
    fn test_malformed_url_is_fatal() {
        let err = CrawlError::MalformedUrl("https://example.org/book".to_string());
        assert!(err.is_fatal());
    }

    #[test]
    fn test_no_chapters_found_display() {
        let err = StorageError::NoChaptersFound(PathBuf::from("/tmp/chapters"));
        assert!(err.to_string().contains("/tmp/chapters"));
    }
}
