//! Shared test helpers: a scripted render page and HTML builders

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use ranobe::browser::RenderPage;
use ranobe::config::Config;
use ranobe::utils::error::NavigateError;

/// One scripted outcome for a single `goto` call
pub enum PageLoad {
    /// Navigation reaches the site; carries the HTTP status and markup
    Ok { status: u16, html: String },

    /// Navigation times out at the engine level
    Timeout,

    /// Engine-level failure with a message
    Fail(String),
}

impl PageLoad {
    pub fn page(html: impl Into<String>) -> Self {
        Self::Ok {
            status: 200,
            html: html.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Ok {
            status,
            html: String::from("<html><body>error page</body></html>"),
        }
    }
}

/// Scripted [`RenderPage`]: every `goto` for a URL pops the next scripted
/// load; unscripted loads answer 404
pub struct ScriptedPage {
    loads: Mutex<HashMap<String, VecDeque<PageLoad>>>,
    current_html: Mutex<String>,
    pub goto_log: Mutex<Vec<String>>,
    pub screenshots: Mutex<Vec<PathBuf>>,
    pub closed: Mutex<bool>,
}

impl ScriptedPage {
    pub fn new() -> Self {
        Self {
            loads: Mutex::new(HashMap::new()),
            current_html: Mutex::new(String::new()),
            goto_log: Mutex::new(Vec::new()),
            screenshots: Mutex::new(Vec::new()),
            closed: Mutex::new(false),
        }
    }

    /// Queue a load outcome for a URL; call repeatedly to script retries
    pub fn on(self, url: &str, load: PageLoad) -> Self {
        self.loads
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(load);
        self
    }

    pub fn goto_count(&self, url: &str) -> usize {
        self.goto_log
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }
}

#[async_trait]
impl RenderPage for ScriptedPage {
    async fn goto(&self, url: &str) -> Result<u16, NavigateError> {
        self.goto_log.lock().unwrap().push(url.to_string());

        let load = self
            .loads
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());

        match load {
            Some(PageLoad::Ok { status, html }) => {
                *self.current_html.lock().unwrap() = html;
                Ok(status)
            }
            Some(PageLoad::Timeout) => Err(NavigateError::Timeout),
            Some(PageLoad::Fail(msg)) => Err(NavigateError::Engine(msg)),
            // Chapters past the end of the novel
            None => {
                *self.current_html.lock().unwrap() =
                    String::from("<html><body>Not Found</body></html>");
                Ok(404)
            }
        }
    }

    async fn wait_for_visible(&self, _selector: &str, _timeout: Duration) -> bool {
        true
    }

    async fn content(&self) -> Result<String, NavigateError> {
        Ok(self.current_html.lock().unwrap().clone())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), NavigateError> {
        self.screenshots.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), NavigateError> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}

/// A chapter page whose extracted body is `body`
pub fn chapter_html(title: &str, body: &str) -> String {
    format!(
        r#"<html><body>
            <div class="reader-header"><h1>{title}</h1></div>
            <div class="chapter-content"><p>{body}</p></div>
        </body></html>"#
    )
}

/// Config tuned for tests: zero delays, temp output directory
pub fn test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.output.dir = output_dir.to_path_buf();
    config.crawler.chapter_delay_secs = 0.0;
    config.crawler.retry_delay_secs = 0.0;
    config.crawler.readiness_timeout_ms = 10;
    config
}
