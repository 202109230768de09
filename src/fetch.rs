use std::path::Path;

use anyhow::Context as _;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use scraper::Html;
use url::Url;

use crate::config::SiteConfig;
use crate::error::ScrapeError;

/// Raw body of one country page, as served.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub html: String,
}

impl Page {
    pub fn document(&self) -> Result<Html, ScrapeError> {
        parse_page(&self.html)
    }
}

pub fn page_url(base_url: &str, page_id: u32) -> Result<Url, ScrapeError> {
    let base_url = base_url.trim_end_matches('/');
    let mut url = Url::parse(&format!("{base_url}/BrowseData.aspx")).map_err(|err| {
        ScrapeError::Retrieval {
            url: base_url.to_owned(),
            reason: format!("invalid base url: {err}"),
        }
    })?;
    url.query_pairs_mut()
        .append_pair("Id", &page_id.to_string());
    Ok(url)
}

/// Blocking client for the statistics site. No retries: the first failure is returned.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(config: &SiteConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn fetch(&self, page_id: u32) -> Result<Page, ScrapeError> {
        let url = page_url(&self.base_url, page_id)?;
        tracing::debug!(%url, "GET country page");

        let retrieval = |reason: String| ScrapeError::Retrieval {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .map_err(|err| retrieval(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(retrieval(format!("status {status}")));
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            let content_type = content_type.to_ascii_lowercase();
            if !(content_type.starts_with("text/html")
                || content_type.starts_with("application/xhtml+xml"))
            {
                return Err(ScrapeError::Parse(format!(
                    "unexpected content type: {content_type}"
                )));
            }
        }

        let html = response
            .text()
            .map_err(|err| retrieval(format!("read body: {err}")))?;
        if !looks_like_html(&html) {
            return Err(ScrapeError::Parse(format!("{url} did not return an html document")));
        }

        Ok(Page { url, html })
    }
}

pub fn parse_page(html: &str) -> Result<Html, ScrapeError> {
    if html.trim().is_empty() {
        return Err(ScrapeError::Parse("body is empty".to_owned()));
    }
    if !looks_like_html(html) {
        return Err(ScrapeError::Parse("no <html> element".to_owned()));
    }
    Ok(Html::parse_document(html))
}

pub fn read_page_file(path: &Path) -> anyhow::Result<Html> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("read page html: {}", path.display()))?;
    parse_page(&html).with_context(|| format!("parse page html: {}", path.display()))
}

pub fn save_page_file(path: &Path, page: &Page) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("page output already exists: {}", path.display());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create page output dir: {}", parent.display()))?;
    }
    std::fs::write(path, &page.html)
        .with_context(|| format!("write page html: {}", path.display()))
}

fn looks_like_html(html: &str) -> bool {
    let lowered = html.trim_start().to_ascii_lowercase();
    lowered.starts_with("<!doctype html") || lowered.contains("<html")
}
