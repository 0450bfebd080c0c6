//! Browser session policy and per-crawl directives.
//!
//! Both are process-wide constants: they are built once at startup and handed by
//! reference to the collaborator on every request. The policy governs how the
//! browser is launched; the directives govern what happens on the page before the
//! HTML is handed to the extraction schema.
use std::time::Duration;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Clicks the cookie-consent "accept all" button if the overlay is present.
pub const ACCEPT_COOKIES_SCRIPT: &str = r#"
(function() {
    const acceptButton = document.querySelector('button.accept-all');
    if (acceptButton) {
        acceptButton.click();
        console.log('Clicked cookie accept button.');
    } else {
        console.log('Cookie accept button not found using selector "button.accept-all".');
    }
})();
"#;

/// Desktop user agents rotated when [`UserAgentMode::Random`] is selected.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36 Edg/123.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// Flags applied to every launch regardless of mode.
///
/// The launcher adds `--mute-audio` for headless sessions and
/// `--disable-extensions` when no extension is loaded, so neither appears here.
const BASE_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--no-first-run",
    "--no-default-browser-check",
    "--lang=en_US",
];

/// Text mode: skip images and web fonts.
const TEXT_MODE_ARGS: &[&str] = &[
    "--blink-settings=imagesEnabled=false",
    "--disable-remote-fonts",
    "--disable-software-rasterizer",
];

/// Light mode: turn off background services the scrape never needs.
const LIGHT_MODE_ARGS: &[&str] = &[
    "--disable-background-networking",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-breakpad",
    "--disable-client-side-phishing-detection",
    "--disable-component-extensions-with-background-pages",
    "--disable-default-apps",
    "--disable-features=TranslateUI",
    "--disable-hang-monitor",
    "--disable-ipc-flooding-protection",
    "--disable-popup-blocking",
    "--disable-prompt-on-repost",
    "--disable-renderer-backgrounding",
    "--disable-sync",
    "--metrics-recording-only",
    "--password-store=basic",
    "--use-mock-keychain",
];

/// User agent selection strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserAgentMode {
    /// Keep the browser's own user agent.
    #[default]
    Default,
    /// Pick a different desktop user agent for every session.
    Random,
}

/// How the browser is launched for a scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSessionPolicy {
    /// Run without a visible window.
    pub headless: bool,
    /// User agent selection strategy.
    pub user_agent_mode: UserAgentMode,
    /// Disable images and remote fonts.
    pub text_mode: bool,
    /// Disable background browser services.
    pub light_mode: bool,
    /// Script evaluated on the page once it has loaded.
    pub on_load_script: String,
}

impl BrowserSessionPolicy {
    /// Policy used for quote pages: headless, randomized, lightweight, cookie banner dismissed.
    pub fn quote_page() -> Self {
        BrowserSessionPolicy {
            headless: true,
            user_agent_mode: UserAgentMode::Random,
            text_mode: true,
            light_mode: true,
            on_load_script: ACCEPT_COOKIES_SCRIPT.to_string(),
        }
    }

    /// Picks the user agent for one session, if the mode overrides it.
    pub fn pick_user_agent(&self) -> Option<&'static str> {
        match self.user_agent_mode {
            UserAgentMode::Default => None,
            UserAgentMode::Random => USER_AGENTS.choose(&mut rand::rng()).copied(),
        }
    }

    /// Command-line switches passed to the browser process.
    ///
    /// Headless mode is left to the launcher; `user_agent` is usually the value of
    /// [`Self::pick_user_agent`] for the session being launched.
    pub fn launch_args(&self, user_agent: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = BASE_ARGS.iter().map(|a| a.to_string()).collect();
        if self.text_mode {
            args.extend(TEXT_MODE_ARGS.iter().map(|a| a.to_string()));
        }
        if self.light_mode {
            args.extend(LIGHT_MODE_ARGS.iter().map(|a| a.to_string()));
        }
        if let Some(ua) = user_agent {
            args.push(format!("--user-agent={}", ua));
        }
        args
    }
}

/// Page-side steps applied between navigation and extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlDirectives {
    /// Unwrap links pointing at other hosts before extraction.
    pub exclude_external_links: bool,
    /// Remove modal/fixed overlays covering the page.
    pub remove_overlay_elements: bool,
    /// CSS selector that must be present before anything else runs.
    pub wait_for: Option<String>,
    /// Upper bound for the `wait_for` condition.
    pub wait_timeout: Duration,
}

impl CrawlDirectives {
    /// Directives used for quote pages: wait for `body`, strip links and overlays.
    pub fn quote_page() -> Self {
        CrawlDirectives {
            exclude_external_links: true,
            remove_overlay_elements: true,
            wait_for: Some("body".to_string()),
            wait_timeout: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_page_policy_is_headless_and_random() {
        let policy = BrowserSessionPolicy::quote_page();
        assert!(policy.headless);
        assert_eq!(policy.user_agent_mode, UserAgentMode::Random);
        assert!(policy.on_load_script.contains("button.accept-all"));
    }

    #[test]
    fn random_mode_picks_a_known_agent() {
        let policy = BrowserSessionPolicy::quote_page();
        for _ in 0..20 {
            let ua = policy.pick_user_agent().unwrap();
            assert!(USER_AGENTS.contains(&ua));
        }
    }

    #[test]
    fn default_mode_keeps_browser_agent() {
        let policy = BrowserSessionPolicy {
            user_agent_mode: UserAgentMode::Default,
            ..BrowserSessionPolicy::quote_page()
        };
        assert_eq!(policy.pick_user_agent(), None);
    }

    #[test]
    fn launch_args_follow_modes() {
        let policy = BrowserSessionPolicy::quote_page();
        let args = policy.launch_args(Some("agent/1.0"));
        assert!(args.iter().any(|a| a == "--blink-settings=imagesEnabled=false"));
        assert!(args.iter().any(|a| a == "--disable-sync"));
        assert_eq!(args.last().map(String::as_str), Some("--user-agent=agent/1.0"));

        let bare = BrowserSessionPolicy {
            text_mode: false,
            light_mode: false,
            ..policy
        };
        let args = bare.launch_args(None);
        assert_eq!(args.len(), BASE_ARGS.len());
        assert!(!args.iter().any(|a| a.starts_with("--user-agent")));
    }

    #[test]
    fn launch_args_leave_launcher_flags_alone() {
        let args = BrowserSessionPolicy::quote_page().launch_args(Some("agent/1.0"));
        for flag in ["--mute-audio", "--disable-extensions", "--headless"] {
            assert!(!args.iter().any(|a| a == flag), "{} is added by the launcher", flag);
        }
        let mut unique = args.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), args.len());
    }

    #[test]
    fn user_agent_mode_parses() {
        assert_eq!("RANDOM".parse::<UserAgentMode>().unwrap(), UserAgentMode::Random);
        assert_eq!(UserAgentMode::Default.to_string(), "default");
    }
}
