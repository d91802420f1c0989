//! Render-engine session management
//!
//! The acquisition loop never talks to the browser directly. It goes through
//! [`PageSession`], which wraps any [`RenderPage`] implementation with the
//! navigation retry machine and the best-effort content-readiness wait.
//! [`Browser`] is the production implementation over chromiumoxide; tests
//! substitute scripted pages.

pub mod chrome;
pub mod session;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::utils::error::NavigateError;

pub use chrome::Browser;
pub use session::PageSession;

/// One rendered page owned for the lifetime of a whole acquisition run
///
/// This is the boundary to the external render engine: load a URL and report
/// its HTTP status, wait for a selector to become visible, hand back the
/// rendered markup, capture a screenshot, shut down.
#[async_trait]
pub trait RenderPage: Send {
    /// Navigate to `url`, returning the document's HTTP status code
    async fn goto(&self, url: &str) -> Result<u16, NavigateError>;

    /// Wait up to `timeout` for an element matching `selector` to appear
    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> bool;

    /// Rendered markup of the current page
    async fn content(&self) -> Result<String, NavigateError>;

    /// Capture a screenshot of the current page to `path`
    async fn screenshot(&self, path: &Path) -> Result<(), NavigateError>;

    /// Close the page and release engine resources
    async fn close(&mut self) -> Result<(), NavigateError>;
}
