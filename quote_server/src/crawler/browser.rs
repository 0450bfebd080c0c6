//! Chromium-backed [`PageFetcher`].
//!
//! Every `fetch` launches its own browser process on a fresh temporary profile,
//! drives one page through the crawl directives, extracts the schema and closes
//! the browser again. Nothing is shared between requests: cookies, cache and
//! consent state live in the profile directory, which is deleted with the session.
//! The session is closed explicitly on success and on failure; if the request
//! future is dropped mid-crawl, `Drop` stops the CDP handler task and
//! chromiumoxide kills the child process.
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures_util::StreamExt;
use log::{debug, info, warn};
use tempfile::TempDir;
use quote_common::policy::{BrowserSessionPolicy, CrawlDirectives};
use quote_common::schema::ExtractionSchema;
use quote_common::{QuoteError, Result};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

use super::PageFetcher;
use super::extract;
use super::scripts::{REMOVE_OVERLAYS, STRIP_EXTERNAL_LINKS};

/// Delay between two checks of the `wait_for` selector.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launches a fresh Chromium for every fetch.
#[derive(Debug, Clone, Default)]
pub struct ChromiumFetcher {
    /// Explicit browser binary; chromiumoxide searches the usual locations otherwise.
    executable: Option<PathBuf>,
}

impl ChromiumFetcher {
    /// Create a fetcher using `executable`, or auto-detection when `None`.
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }

    fn browser_config(
        &self,
        policy: &BrowserSessionPolicy,
        profile_dir: &Path,
    ) -> Result<BrowserConfig> {
        let user_agent = policy.pick_user_agent();
        if let Some(ua) = user_agent {
            debug!("Session user agent: {}", ua);
        }

        let mut builder = BrowserConfig::builder()
            .disable_default_args()
            .user_data_dir(profile_dir)
            .args(policy.launch_args(user_agent));
        if !policy.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(QuoteError::Collaborator)
    }
}

#[async_trait]
impl PageFetcher for ChromiumFetcher {
    async fn fetch(
        &self,
        url: &str,
        schema: &ExtractionSchema,
        policy: &BrowserSessionPolicy,
        directives: &CrawlDirectives,
    ) -> Result<Option<String>> {
        let profile = session_profile()?;
        let config = self.browser_config(policy, profile.path())?;
        let session = BrowserSession::launch(config, profile).await?;
        let outcome = session.crawl(url, schema, policy, directives).await;
        session.close().await;
        outcome
    }
}

/// Creates the throwaway profile directory for one session.
fn session_profile() -> Result<TempDir> {
    Ok(tempfile::Builder::new()
        .prefix("quote-server-profile-")
        .tempdir()?)
}

/// A launched browser plus the task pumping its CDP event stream.
///
/// Fields drop in order: the browser process is killed before its profile
/// directory is removed.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    profile: TempDir,
}

impl BrowserSession {
    async fn launch(config: BrowserConfig, profile: TempDir) -> Result<Self> {
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(QuoteError::collaborator)?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler stopped: {}", e);
                    break;
                }
            }
        });

        debug!("Browser session launched on profile {}", profile.path().display());
        Ok(Self {
            browser,
            handler,
            profile,
        })
    }

    async fn crawl(
        &self,
        url: &str,
        schema: &ExtractionSchema,
        policy: &BrowserSessionPolicy,
        directives: &CrawlDirectives,
    ) -> Result<Option<String>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(QuoteError::collaborator)?;

        let html = load_page(&page, url, policy, directives).await;
        if let Err(e) = page.close().await {
            debug!("Closing page failed: {}", e);
        }
        let html = html?;

        if html.trim().is_empty() {
            warn!("Page {} rendered no HTML", url);
            return Ok(None);
        }
        info!("Fetched {} ({} bytes of HTML)", url, html.len());
        extract::extract_json(&html, schema).map(Some)
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to reap browser process: {}", e);
        }
        debug!(
            "Browser session closed, removing profile {}",
            self.profile.path().display()
        );
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Navigates, waits, runs the page scripts and returns the final HTML.
async fn load_page(
    page: &Page,
    url: &str,
    policy: &BrowserSessionPolicy,
    directives: &CrawlDirectives,
) -> Result<String> {
    page.goto(url).await.map_err(QuoteError::collaborator)?;
    page.wait_for_navigation()
        .await
        .map_err(QuoteError::collaborator)?;

    if let Some(selector) = &directives.wait_for {
        wait_for_selector(page, selector, directives.wait_timeout).await?;
    }
    if !policy.on_load_script.trim().is_empty() {
        evaluate(page, &policy.on_load_script).await?;
    }
    if directives.remove_overlay_elements {
        evaluate(page, REMOVE_OVERLAYS).await?;
    }
    if directives.exclude_external_links {
        evaluate(page, STRIP_EXTERNAL_LINKS).await?;
    }

    page.content().await.map_err(QuoteError::collaborator)
}

async fn evaluate(page: &Page, script: &str) -> Result<()> {
    page.evaluate_expression(script)
        .await
        .map_err(QuoteError::collaborator)?;
    Ok(())
}

async fn wait_for_selector(page: &Page, selector: &str, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if page.find_element(selector).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(QuoteError::Collaborator(format!(
                "timed out after {:?} waiting for selector '{}'",
                timeout, selector
            )));
        }
        sleep(WAIT_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_config_for_quote_policy() {
        let fetcher = ChromiumFetcher::new(Some(PathBuf::from("/usr/bin/chromium")));
        let profile = session_profile().unwrap();
        assert!(
            fetcher
                .browser_config(&BrowserSessionPolicy::quote_page(), profile.path())
                .is_ok()
        );
    }

    #[test]
    fn every_session_gets_its_own_profile() {
        let first = session_profile().unwrap();
        let second = session_profile().unwrap();
        assert_ne!(first.path(), second.path());
        assert!(first.path().is_dir());
        assert!(second.path().is_dir());

        let first_path = first.path().to_path_buf();
        drop(first);
        assert!(!first_path.exists());
        assert!(second.path().is_dir());
    }
}
