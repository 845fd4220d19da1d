//! Headed Chromium window driven over the DevTools protocol.

use super::surface::WebSurface;
use crate::app_paths;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Overrides Chromium discovery with an explicit binary.
pub const CHROMIUM_ENV: &str = "UNICOM_USAGE_CHROMIUM";

pub fn find_chromium() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CHROMIUM_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
        tracing::warn!("{CHROMIUM_ENV} points to missing file {}", path.display());
    }

    for name in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
    ] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

pub struct ChromiumSurface {
    // Dropping the browser kills the process, so it lives as long as the page.
    _browser: Browser,
    page: Page,
    closed: Arc<AtomicBool>,
    handler: JoinHandle<()>,
}

impl ChromiumSurface {
    /// Opens a visible browser window with the persistent login profile.
    pub async fn launch(config: &AppConfig) -> Result<Self> {
        let chrome_path = find_chromium()
            .with_context(|| format!("Chromium not found. Install Chrome or set {CHROMIUM_ENV}"))?;
        let profile_dir = app_paths::browser_profile_dir()?;
        tracing::info!(
            "Launching {} with profile {}",
            chrome_path.display(),
            profile_dir.display()
        );

        let browser_config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .with_head()
            .user_data_dir(profile_dir)
            .arg(format!("--user-agent={}", config.user_agent))
            .arg("--window-size=430,900")
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("failed to launch Chromium")?;

        let closed = Arc::new(AtomicBool::new(false));
        let closed_flag = Arc::clone(&closed);
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("browser event error: {e}");
                }
            }
            tracing::debug!("browser connection closed");
            closed_flag.store(true, Ordering::SeqCst);
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to open browser page")?;

        Ok(Self {
            _browser: browser,
            page,
            closed,
            handler,
        })
    }
}

impl Drop for ChromiumSurface {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl WebSurface for ChromiumSurface {
    async fn load_url(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("failed to load {url}"))?;
        Ok(())
    }

    async fn present(&mut self) -> Result<()> {
        self.page
            .bring_to_front()
            .await
            .context("failed to bring browser to front")?;
        Ok(())
    }

    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("JS execution failed")?;

        result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert JS result: {e:?}"))
    }

    async fn is_open(&mut self) -> bool {
        !self.closed.load(Ordering::SeqCst) && self.page.url().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_find_chromium_prefers_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("chrome");
        std::fs::write(&fake, "").unwrap();

        std::env::set_var(CHROMIUM_ENV, &fake);
        let found = find_chromium();
        std::env::remove_var(CHROMIUM_ENV);

        assert_eq!(found, Some(fake));
    }

    #[tokio::test]
    #[ignore] // Requires Chromium and a display
    async fn test_chromium_probe_on_blank_page() {
        let mut surface = ChromiumSurface::launch(&AppConfig::default())
            .await
            .expect("failed to launch");
        surface.load_url("data:text/html,<p>login</p>").await.unwrap();
        let value = surface.evaluate(super::super::probe::PROBE_SCRIPT).await.unwrap();
        assert_eq!(value, serde_json::json!({"isAddCookieBtn": false}));
        assert!(surface.is_open().await);
    }

    /// Serves a page that sets a readable `jsessionid` cookie.
    async fn serve_logged_in_page() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let body = "<html><body><p>logged in</p></body></html>";
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\
                     Set-Cookie: jsessionid=abc; Path=/\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    #[ignore] // Requires Chromium and a display
    async fn test_chromium_probe_adds_one_button_across_injections() {
        let url = serve_logged_in_page().await;
        let mut surface = ChromiumSurface::launch(&AppConfig::default())
            .await
            .expect("failed to launch");
        surface.load_url(&url).await.unwrap();

        for _ in 0..2 {
            let value = surface.evaluate(super::super::probe::PROBE_SCRIPT).await.unwrap();
            assert_eq!(value, serde_json::json!({"isAddCookieBtn": true}));
        }
        let buttons = surface
            .evaluate("document.querySelectorAll('#copy-btn').length")
            .await
            .unwrap();
        assert_eq!(buttons, serde_json::json!(1));
    }
}
