//! Page rendering collaborators.
//!
//! The catalog listing is built by JavaScript, so the harvester talks to a
//! browser through [`Renderer`]. Nodes come back as outer HTML so extraction
//! never holds browser handles.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use scraper::{Html, Selector};
use thirtyfour::prelude::*;

#[async_trait]
pub trait Renderer: Send + Sync {
    /// Load `url` and wait for the document to be ready.
    async fn navigate(&self, url: &str) -> Result<()>;
    /// Outer HTML of every element matching a CSS selector.
    async fn find_nodes(&self, selector: &str) -> Result<Vec<String>>;
    /// Current document height in pixels.
    async fn page_height(&self) -> Result<u64>;
    async fn scroll_to_bottom(&self) -> Result<()>;
    /// Click every visible, enabled element matching `selector`. Returns how many were clicked.
    async fn click_all(&self, selector: &str) -> Result<usize>;
}

/// Headless Chrome driven over the WebDriver protocol.
pub struct WebDriverRenderer {
    driver: WebDriver,
}

impl WebDriverRenderer {
    pub async fn connect(server_url: &str, user_agent: &str) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()?;
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;
        caps.set_disable_gpu()?;
        caps.add_arg("--window-size=1920,1080")?;
        caps.add_arg(&format!("--user-agent={user_agent}"))?;
        let driver = WebDriver::new(server_url, caps).await?;
        tracing::info!(server_url, "webdriver session started");
        Ok(Self { driver })
    }

    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

#[async_trait]
impl Renderer for WebDriverRenderer {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn find_nodes(&self, selector: &str) -> Result<Vec<String>> {
        let elements = self.driver.find_all(By::Css(selector)).await?;
        let mut nodes = Vec::with_capacity(elements.len());
        for element in elements {
            // elements can go stale while the page keeps rendering
            match element.outer_html().await {
                Ok(html) => nodes.push(html),
                Err(err) => tracing::debug!(%err, selector, "skipping stale element"),
            }
        }
        Ok(nodes)
    }

    async fn page_height(&self) -> Result<u64> {
        let ret = self.driver.execute("return document.body.scrollHeight", Vec::new()).await?;
        ret.json().as_u64().ok_or_else(|| anyhow!("scrollHeight is not a number: {}", ret.json()))
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.driver
            .execute("window.scrollTo(0, document.body.scrollHeight);", Vec::new())
            .await?;
        Ok(())
    }

    async fn click_all(&self, selector: &str) -> Result<usize> {
        let mut clicked = 0;
        for button in self.driver.find_all(By::Css(selector)).await? {
            let clickable = button.is_displayed().await.unwrap_or(false) && button.is_enabled().await.unwrap_or(false);
            if !clickable { continue; }
            let arg = button.to_json()?;
            match self.driver.execute("arguments[0].click();", vec![arg]).await {
                Ok(_) => clicked += 1,
                Err(err) => tracing::debug!(%err, selector, "click failed"),
            }
        }
        Ok(clicked)
    }
}

/// Server-rendered HTML: either fetched over plain HTTP or supplied directly.
/// Scrolling and clicking do nothing, so the page never grows.
pub struct StaticRenderer {
    client: Option<Client>,
    html: RwLock<String>,
}

impl StaticRenderer {
    pub fn new(client: Client) -> Self {
        Self { client: Some(client), html: RwLock::new(String::new()) }
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        Self { client: None, html: RwLock::new(html.into()) }
    }
}

fn select_outer_html(html: &str, selector: &str) -> Result<Vec<String>> {
    let sel = Selector::parse(selector).map_err(|e| anyhow!("invalid selector {selector:?}: {e:?}"))?;
    let doc = Html::parse_document(html);
    let nodes = doc.select(&sel).map(|el| el.html()).collect();
    Ok(nodes)
}

#[async_trait]
impl Renderer for StaticRenderer {
    async fn navigate(&self, url: &str) -> Result<()> {
        let Some(client) = &self.client else { return Ok(()) };
        let resp = client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("GET {url} returned {}", resp.status()));
        }
        let body = resp.text().await?;
        *self.html.write() = body;
        Ok(())
    }

    async fn find_nodes(&self, selector: &str) -> Result<Vec<String>> {
        let html = self.html.read();
        select_outer_html(&html, selector)
    }

    async fn page_height(&self) -> Result<u64> {
        Ok(self.html.read().len() as u64)
    }

    async fn scroll_to_bottom(&self) -> Result<()> { Ok(()) }

    async fn click_all(&self, _selector: &str) -> Result<usize> { Ok(0) }
}
