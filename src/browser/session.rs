//! Page session: navigation retries and content readiness
//!
//! Wraps a [`RenderPage`] with the retry state machine used for every
//! chapter navigation. HTTP errors (status >= 400), timeouts, and engine
//! errors are all retried the same bounded number of times with a fixed
//! delay; once exhausted, the last error escalates to the caller.

use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::browser::RenderPage;
use crate::config::Config;
use crate::utils::error::NavigateError;
use crate::utils::retry::{with_retry, RetryConfig};

/// Wait applied when no content selector becomes visible within budget;
/// readiness is best-effort, not a precondition for extraction
const READINESS_GRACE: Duration = Duration::from_secs(3);

/// Navigation wrapper owning the page for a whole acquisition run
pub struct PageSession<P: RenderPage> {
    page: P,
    retry: RetryConfig,
    content_selectors: Vec<String>,
    readiness_budget: Duration,
}

impl<P: RenderPage> PageSession<P> {
    pub fn new(page: P, config: &Config) -> Self {
        Self {
            page,
            retry: RetryConfig::new(config.crawler.max_retries, config.retry_delay()),
            content_selectors: config.selectors.content.clone(),
            readiness_budget: config.readiness_timeout(),
        }
    }

    /// Navigate to `url` with bounded retries, then wait for content
    /// readiness
    ///
    /// # Errors
    ///
    /// Returns the last attempt's `NavigateError` once retries are
    /// exhausted. The readiness wait never fails; extraction proceeds
    /// regardless.
    pub async fn navigate(&self, url: &str) -> Result<(), NavigateError> {
        with_retry(&self.retry, || self.attempt(url)).await?;
        self.wait_for_content().await;
        Ok(())
    }

    async fn attempt(&self, url: &str) -> Result<(), NavigateError> {
        debug!(url, "Navigating");
        let status = self.page.goto(url).await?;

        if status >= 400 {
            return Err(NavigateError::Http(status));
        }

        Ok(())
    }

    /// Wait for any content selector to become visible, splitting the total
    /// budget evenly so one missing selector cannot starve the rest
    async fn wait_for_content(&self) {
        if self.content_selectors.is_empty() {
            return;
        }

        let slice = self.readiness_budget / self.content_selectors.len() as u32;
        for selector in &self.content_selectors {
            if self.page.wait_for_visible(selector, slice).await {
                debug!(selector = %selector, "Content ready");
                return;
            }
        }

        warn!("No content selector became visible, continuing after grace delay");
        tokio::time::sleep(READINESS_GRACE).await;
    }

    /// Access the underlying render page
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Rendered markup of the current page
    pub async fn html(&self) -> Result<String, NavigateError> {
        self.page.content().await
    }

    /// Capture a diagnostic screenshot of the current page
    pub async fn screenshot(&self, path: &Path) -> Result<(), NavigateError> {
        self.page.screenshot(path).await
    }

    /// Close the underlying page and release engine resources
    pub async fn close(&mut self) -> Result<(), NavigateError> {
        self.page.close().await
    }
}
