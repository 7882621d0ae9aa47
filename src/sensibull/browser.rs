use super::config;
use crate::error::Result;
use anyhow::Context;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

// -----------------------------------------------
// DOM QUERY SEAM
// -----------------------------------------------

/// A node in the live page that can be queried relative to itself.
#[async_trait]
pub trait DomElement: Send + Sync + Sized {
    /// First child matching `xpath`, `None` when nothing matches
    async fn find(&self, xpath: &str) -> Result<Option<Self>>;

    async fn find_all(&self, xpath: &str) -> Result<Vec<Self>>;

    async fn text(&self) -> Result<String>;
}

/// A long-lived browser page that can be refreshed and queried.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Element: DomElement;

    /// Re-fetch the current page
    async fn refresh(&self) -> Result<()>;

    /// Locate a top-level element on the page
    async fn find(&self, xpath: &str) -> Result<Option<Self::Element>>;
}

fn missing_as_none<T>(res: std::result::Result<T, CmdError>) -> Result<Option<T>> {
    match res {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_no_such_element() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl DomElement for Element {
    async fn find(&self, xpath: &str) -> Result<Option<Self>> {
        missing_as_none(Element::find(self, Locator::XPath(xpath)).await)
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<Self>> {
        Ok(Element::find_all(self, Locator::XPath(xpath)).await?)
    }

    async fn text(&self) -> Result<String> {
        Ok(Element::text(self).await?)
    }
}

// -----------------------------------------------
// WEBDRIVER SESSION
// -----------------------------------------------

/// Browser session owned by the process for its whole lifetime.
pub struct WebDriverSession {
    client: Client,
    page_url: String,
}

impl WebDriverSession {
    /// Start a Chrome session through the WebDriver at `webdriver_url` and open `page_url`
    pub async fn connect(webdriver_url: &str, page_url: &str, headless: bool) -> Result<Self> {
        let mut args = vec![config::BROWSER_WINDOW_SIZE];
        if headless {
            args.push("--headless");
        }

        let mut caps = serde_json::Map::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;

        client.goto(page_url).await?;
        info!(page_url, headless, "Browser session opened");

        Ok(Self {
            client,
            page_url: page_url.to_string(),
        })
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// End the WebDriver session
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        info!("Browser session closed");
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    type Element = Element;

    async fn refresh(&self) -> Result<()> {
        debug!(page_url = %self.page_url, "Refreshing page");
        Ok(self.client.refresh().await?)
    }

    async fn find(&self, xpath: &str) -> Result<Option<Element>> {
        missing_as_none(self.client.find(Locator::XPath(xpath)).await)
    }
}

/// Where and how to open the browser session
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub webdriver_url: String,
    pub page_url: String,
    pub headless: bool,
}

impl SessionSettings {
    pub fn from_env() -> Self {
        Self {
            webdriver_url: config::get_webdriver_url(),
            page_url: config::get_page_url(),
            headless: config::is_headless(),
        }
    }
}

/// Check the WebDriver is ready, then open the option chain page
pub async fn open_session(settings: &SessionSettings) -> anyhow::Result<WebDriverSession> {
    let status = probe_webdriver(&settings.webdriver_url).await?;
    info!(webdriver = %settings.webdriver_url, message = %status.message, "WebDriver ready");

    let session =
        WebDriverSession::connect(&settings.webdriver_url, &settings.page_url, settings.headless)
            .await
            .context("Failed to open browser session")?;
    Ok(session)
}

// -----------------------------------------------
// WEBDRIVER READINESS PROBE
// -----------------------------------------------

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    value: WebDriverStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebDriverStatus {
    pub ready: bool,
    #[serde(default)]
    pub message: String,
}

/// Ask the WebDriver server whether it can create a new session
pub async fn probe_webdriver(webdriver_url: &str) -> anyhow::Result<WebDriverStatus> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config::WEBDRIVER_PROBE_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")?;

    let url = format!("{}/status", webdriver_url.trim_end_matches('/'));
    let envelope: StatusEnvelope = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("WebDriver not reachable at {}", url))?
        .error_for_status()
        .context("WebDriver status request failed")?
        .json()
        .await
        .context("Failed to parse WebDriver status")?;

    if !envelope.value.ready {
        anyhow::bail!("WebDriver not ready: {}", envelope.value.message);
    }

    Ok(envelope.value)
}
