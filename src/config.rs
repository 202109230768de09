use std::time::Duration;

use anyhow::Context as _;

pub const DEFAULT_BASE_URL: &str = "https://ecastats.uneca.org/data";
pub const DEFAULT_USER_AGENT: &str = "HDXINTERNAL UNECA scraper";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PAGE_ID: u32 = 32;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_METADATA_PATH: &str = "config/metadata.yml";
pub const DEFAULT_DATASETS_PATH: &str = "data/datasets.jsonl";

/// Where and how the statistics site is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup("ECA_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/');
            if base_url.is_empty() {
                anyhow::bail!("ECA_BASE_URL is empty");
            }
            config.base_url = base_url.to_owned();
        }
        if let Some(user_agent) = lookup("ECA_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(raw) = lookup("ECA_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid ECA_TIMEOUT_SECS={raw:?}"))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Applies command-line overrides on top of the env layer.
    #[must_use]
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        user_agent: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url.trim_end_matches('/').to_owned();
        }
        if let Some(user_agent) = user_agent {
            self.user_agent = user_agent.to_owned();
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}
