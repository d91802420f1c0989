//! HTML parsing and chapter text extraction
//!
//! The extractor walks an ordered catalog of content selectors, short-circuits
//! on the first one that yields usable text, and falls back to a
//! largest-text-block heuristic when the catalog fails entirely.

pub mod chapter;
pub mod sanitize;
pub mod selectors;

pub use chapter::ChapterParser;
pub use selectors::SelectorCatalog;
