use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("retrieve {url}: {reason}")]
    Retrieval { url: String, reason: String },

    #[error("parse page as html: {0}")]
    Parse(String),

    #[error("table not found: #{table_id}")]
    MissingTable { table_id: String },

    #[error("no <h3><b> heading with a country name")]
    MissingCountryName,

    #[error("build css selector {css:?}: {reason}")]
    Selector { css: String, reason: String },
}

impl ScrapeError {
    pub fn missing_table(table_id: &str) -> Self {
        Self::MissingTable {
            table_id: table_id.to_owned(),
        }
    }
}

pub(crate) fn selector(css: &str) -> Result<scraper::Selector, ScrapeError> {
    scraper::Selector::parse(css).map_err(|err| ScrapeError::Selector {
        css: css.to_owned(),
        reason: err.to_string(),
    })
}
