//! Browser automation using chromiumoxide
//!
//! Launches one Chrome instance and one page per acquisition run. The CDP
//! handler task must keep draining events for the whole browser lifetime.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as ChromeBrowser, BrowserConfig as ChromeBrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::{EventResponseReceived, ResourceType};
use chromiumoxide::error::CdpError;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::browser::RenderPage;
use crate::config::BrowserConfig;
use crate::utils::error::NavigateError;

/// How long to watch network events for the document response after a
/// navigation settles
const STATUS_SCAN_BUDGET: Duration = Duration::from_secs(2);

/// Poll interval for selector visibility checks
const VISIBILITY_POLL: Duration = Duration::from_millis(250);

/// Render engine session backed by a headless Chrome instance
pub struct Browser {
    browser: ChromeBrowser,
    handle: tokio::task::JoinHandle<()>,
    page: Page,
}

impl Browser {
    /// Launch a browser and open the single page used for the whole run
    pub async fn launch(config: &BrowserConfig) -> Result<Self, NavigateError> {
        let mut builder = ChromeBrowserConfig::builder()
            .no_sandbox()
            .window_size(config.viewport_width, config.viewport_height)
            .request_timeout(Duration::from_millis(config.page_load_timeout_ms))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--mute-audio");

        if !config.headless {
            builder = builder.with_head();
        }

        if let Some(proxy) = &config.proxy {
            builder = builder.arg(format!("--proxy-server={proxy}"));
        }

        let chrome_config = builder.build().map_err(NavigateError::Engine)?;

        let (browser, mut handler) = ChromeBrowser::launch(chrome_config)
            .await
            .map_err(map_cdp)?;

        // The handler task must keep running for the browser to work
        let handle = tokio::spawn(async move {
            loop {
                match handler.next().await {
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => continue,
                    None => break,
                }
            }
        });

        // Give the browser process a moment to settle
        tokio::time::sleep(Duration::from_secs(1)).await;

        let page = browser.new_page("about:blank").await.map_err(map_cdp)?;
        page.set_user_agent(SetUserAgentOverrideParams::new(config.user_agent.clone()))
            .await
            .map_err(map_cdp)?;

        debug!("Browser started");
        Ok(Self {
            browser,
            handle,
            page,
        })
    }
}

#[async_trait]
impl RenderPage for Browser {
    async fn goto(&self, url: &str) -> Result<u16, NavigateError> {
        // Subscribe before navigating so the document response is not missed
        let mut responses = self
            .page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(map_cdp)?;

        self.page.goto(url).await.map_err(map_cdp)?;

        let deadline = tokio::time::Instant::now() + STATUS_SCAN_BUDGET;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                break;
            }

            match tokio::time::timeout(remaining, responses.next()).await {
                Ok(Some(event)) => {
                    if event.r#type == ResourceType::Document {
                        return Ok(event.response.status as u16);
                    }
                }
                Ok(None) | Err(_) => break,
            }
        }

        // Navigation completed but no document response was observed
        Ok(200)
    }

    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.page.find_element(selector).await.is_ok() {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(VISIBILITY_POLL).await;
        }
    }

    async fn content(&self) -> Result<String, NavigateError> {
        self.page.content().await.map_err(map_cdp)
    }

    async fn screenshot(&self, path: &Path) -> Result<(), NavigateError> {
        self.page
            .save_screenshot(ScreenshotParams::builder().full_page(true).build(), path)
            .await
            .map_err(map_cdp)?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), NavigateError> {
        self.browser.close().await.map_err(map_cdp)?;
        self.handle.abort();
        debug!("Browser closed");
        Ok(())
    }
}

fn map_cdp(err: CdpError) -> NavigateError {
    match err {
        CdpError::Timeout => NavigateError::Timeout,
        other => NavigateError::Engine(other.to_string()),
    }
}
