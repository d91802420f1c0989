//! Sequential chapter acquisition loop
//!
//! Drives one chapter at a time: generate the URL, navigate, extract,
//! persist. Chapter-level failures accumulate in a consecutive-failure
//! counter, the sole mechanism that stops a run on persistent failure;
//! any success resets it.

pub mod url;

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::browser::{PageSession, RenderPage};
use crate::config::Config;
use crate::models::ChapterRequest;
use crate::parser::ChapterParser;
use crate::storage::ChapterWriter;
use crate::utils::error::CrawlError;

pub use self::url::{novel_slug, ChapterUrl, NovelTarget};

/// Chapter-level failures tolerated in a row before the run stops
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// Extracted bodies below this many characters are rejected as error pages
/// or paywalled stubs rather than real chapters
pub const MIN_BODY_CHARS: usize = 100;

/// Loop bounds for one download run
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    /// First chapter number to fetch
    pub start_chapter: u32,

    /// Last chapter number to fetch, when known
    pub end_chapter: Option<u32>,

    /// Hard upper bound on chapter numbers
    pub max_chapters: u32,
}

impl Default for DownloadPlan {
    fn default() -> Self {
        Self {
            start_chapter: 1,
            end_chapter: None,
            max_chapters: 1000,
        }
    }
}

/// Mutable loop state, exclusively owned by the acquisition loop
#[derive(Debug, Clone)]
pub struct AcquisitionState {
    pub current_chapter: u32,
    pub consecutive_failures: u32,
    pub stopped: bool,
}

impl AcquisitionState {
    pub fn new(start_chapter: u32) -> Self {
        Self {
            current_chapter: start_chapter,
            consecutive_failures: 0,
            stopped: false,
        }
    }

    /// Reset the failure counter after a persisted chapter
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Count a chapter-level failure; stops the run at the threshold
    pub fn record_failure(&mut self) {
        self.consecutive_failures += 1;
        if self.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
            self.stopped = true;
        }
    }

    /// Move on to the next chapter number
    pub fn advance(&mut self) {
        self.current_chapter += 1;
    }
}

/// Downloads a novel chapter by chapter through a page session
pub struct NovelCrawler<P: RenderPage> {
    session: PageSession<P>,
    parser: ChapterParser,
    writer: ChapterWriter,
    target: NovelTarget,
    novel_dir: PathBuf,
    chapter_delay: Duration,
}

impl<P: RenderPage> NovelCrawler<P> {
    /// Build a crawler for one novel
    ///
    /// Creates the novel's output directories and compiles the selector
    /// catalog up front, so configuration problems surface before any
    /// navigation.
    pub fn new(page: P, config: &Config, target: NovelTarget) -> Result<Self, CrawlError> {
        let novel_dir = config.output.dir.join(&target.slug);
        let chapters_dir = novel_dir.join(&config.output.chapters_subdir);

        let writer = ChapterWriter::new(&chapters_dir)?;
        let parser = ChapterParser::new(&config.selectors)?;

        info!(dir = %novel_dir.display(), "Novel directory ready");

        Ok(Self {
            session: PageSession::new(page, config),
            parser,
            writer,
            target,
            novel_dir,
            chapter_delay: config.chapter_delay(),
        })
    }

    /// Directory holding this novel's artifacts
    pub fn novel_dir(&self) -> &Path {
        &self.novel_dir
    }

    /// Access the underlying render page
    pub fn page(&self) -> &P {
        self.session.page()
    }

    /// Number of chapter artifacts currently on disk
    pub fn chapter_count(&self) -> usize {
        self.writer.count()
    }

    /// Run the acquisition loop, returning the number of chapters persisted
    /// during this run
    ///
    /// Chapter failures never abort the run; the loop stops when the
    /// configured bounds are reached or after
    /// [`MAX_CONSECUTIVE_FAILURES`] failures in a row.
    pub async fn run(&mut self, plan: &DownloadPlan) -> Result<usize, CrawlError> {
        let mut state = AcquisitionState::new(plan.start_chapter);
        let mut persisted = 0usize;

        info!(
            novel = %self.target.slug,
            start = plan.start_chapter,
            end = ?plan.end_chapter,
            max = plan.max_chapters,
            "Starting download"
        );

        while !state.stopped {
            if state.current_chapter > plan.max_chapters {
                break;
            }
            if let Some(end) = plan.end_chapter {
                if state.current_chapter > end {
                    break;
                }
            }

            let request = ChapterRequest::new(
                self.target.url.for_chapter(state.current_chapter),
                state.current_chapter,
                self.target.url.volume(),
            );

            match self.download_chapter(&request).await {
                Ok(()) => {
                    persisted += 1;
                    state.record_success();
                    tokio::time::sleep(self.chapter_delay).await;
                }
                Err(err) => {
                    state.record_failure();
                    warn!(
                        chapter = request.chapter_number,
                        failures = state.consecutive_failures,
                        max_failures = MAX_CONSECUTIVE_FAILURES,
                        error = %err,
                        "Chapter failed"
                    );

                    if state.stopped {
                        info!(
                            failures = state.consecutive_failures,
                            "Stopping after consecutive failures"
                        );
                    }
                }
            }

            state.advance();
        }

        info!(persisted, "Download finished");
        Ok(persisted)
    }

    /// Fetch, extract, and persist a single chapter
    ///
    /// Every error leaving this function counts as exactly one chapter
    /// failure; navigation retries already happened inside the session.
    async fn download_chapter(&self, request: &ChapterRequest) -> Result<(), CrawlError> {
        self.session.navigate(&request.url).await?;

        let html = self.session.html().await?;

        let record = match self.parser.extract(&html, &request.url) {
            Ok(record) => record,
            Err(err) => {
                self.capture_diagnostic(request.chapter_number).await;
                return Err(err.into());
            }
        };

        let chars = record.body_len();
        if chars < MIN_BODY_CHARS {
            self.capture_diagnostic(request.chapter_number).await;
            return Err(CrawlError::InsufficientContent { len: chars });
        }

        let path = self.writer.save(&record, request.chapter_number)?;
        info!(
            chapter = request.chapter_number,
            title = %record.display_title(request.chapter_number),
            chars,
            path = %path.display(),
            "Saved chapter"
        );

        Ok(())
    }

    async fn capture_diagnostic(&self, chapter: u32) {
        let path = self
            .novel_dir
            .join(format!("error_chapter_{chapter}.png"));

        match self.session.screenshot(&path).await {
            Ok(()) => info!(path = %path.display(), "Diagnostic screenshot saved"),
            Err(err) => warn!(error = %err, "Failed to capture diagnostic screenshot"),
        }
    }

    /// Close the page session; the engine is opened once per run and closed
    /// once here
    pub async fn shutdown(&mut self) -> Result<(), crate::utils::error::NavigateError> {
        self.session.close().await
    }
}
