//! ranobe - Sequential novel chapter downloader
//!
//! Downloads numbered web-novel chapters through a rendering browser,
//! extracts their text with a prioritized selector fallback chain, and
//! merges the result into a single archive file.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`browser`] - Render-engine session and navigation retry logic
//! - [`parser`] - HTML parsing and chapter text extraction
//! - [`crawler`] - Sequential acquisition loop and URL generation
//! - [`models`] - Core data structures and types
//! - [`storage`] - Chapter artifacts and archive assembly
//! - [`utils`] - Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use ranobe::browser::Browser;
//! use ranobe::config::Config;
//! use ranobe::crawler::{DownloadPlan, NovelCrawler, NovelTarget};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let target = NovelTarget::parse("https://example.org/r/1--some-novel/v1/c1")?;
//!     let page = Browser::launch(&config.browser).await?;
//!     let mut crawler = NovelCrawler::new(page, &config, target)?;
//!     let persisted = crawler.run(&DownloadPlan::default()).await?;
//!     crawler.shutdown().await?;
//!     println!("persisted {persisted} chapters");
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod crawler;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::browser::{Browser, PageSession, RenderPage};
    pub use crate::config::Config;
    pub use crate::crawler::{DownloadPlan, NovelCrawler, NovelTarget};
    pub use crate::models::{ChapterRecord, ChapterRequest, DownloadSummary};
    pub use crate::parser::ChapterParser;
    pub use crate::storage::{ArchiveAssembler, ChapterWriter};
    pub use crate::utils::error::{CrawlError, NavigateError, ParseError, StorageError};
}

// Direct re-exports for convenience
pub use models::{ChapterRecord, ChapterRequest, DownloadSummary};
