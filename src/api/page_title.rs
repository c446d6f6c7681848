use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{Result, TrackerError};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").unwrap_or_else(|_| unreachable!()));

/// Source of scoreboard page titles
pub trait TitleSource: Send + Sync {
    /// Fetch the `<title>` text of the page at `url`
    fn fetch_title(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches scoreboard pages over HTTP and reads their title
pub struct PageTitleClient {
    client: Client,
}

impl PageTitleClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(HTML_ACCEPT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl TitleSource for PageTitleClient {
    async fn fetch_title(&self, url: &str) -> Result<String> {
        debug!("Fetching scoreboard page: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TrackerError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.text().await?;

        extract_title(&body).ok_or_else(|| TrackerError::EmptyTitle {
            url: url.to_string(),
        })
    }
}

/// Trimmed text of the document's first `<title>`, `None` if absent or blank
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let title = document.select(&TITLE_SELECTOR).next()?;
    let text = title.text().collect::<String>();
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_string())
}
