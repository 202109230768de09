use clap::{Args, Parser, Subcommand};

use crate::category::Category;
use crate::config::{
    DEFAULT_DATA_DIR, DEFAULT_DATASETS_PATH, DEFAULT_METADATA_PATH, DEFAULT_PAGE_ID,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a country page, write CSVs and metadata, and publish dataset descriptions.
    Run(RunArgs),
    /// Save a country page's raw HTML.
    Fetch(FetchArgs),
    /// Write CSVs and metadata from a saved country page.
    Extract(ExtractArgs),
    /// Assemble and publish dataset descriptions from existing metadata.
    Datasets(DatasetsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SiteArgs {
    /// Statistics site base URL (default: $ECA_BASE_URL or the UNECA site).
    #[arg(long)]
    pub base_url: Option<String>,

    /// User-Agent header sent with every request (default: $ECA_USER_AGENT).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds (default: $ECA_TIMEOUT_SECS or 60).
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Directory receiving `<COUNTRY>-<category>.csv` files.
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Metadata YAML with one section per indicator category.
    #[arg(long, default_value = DEFAULT_METADATA_PATH)]
    pub metadata: String,

    /// Indicator categories to process (repeatable; default: all).
    #[arg(long = "category", value_enum)]
    pub categories: Vec<Category>,
}

impl OutputArgs {
    pub fn selected_categories(&self) -> Vec<Category> {
        if self.categories.is_empty() {
            return Category::ALL.to_vec();
        }
        let mut selected = self.categories.clone();
        selected.sort();
        selected.dedup();
        selected
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Country page identifier (`BrowseData.aspx?Id=<page-id>`).
    #[arg(long, default_value_t = DEFAULT_PAGE_ID)]
    pub page_id: u32,

    #[command(flatten)]
    pub site: SiteArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// JSON Lines file receiving the dataset descriptions.
    #[arg(long, default_value = DEFAULT_DATASETS_PATH)]
    pub datasets_out: String,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Country page identifier (`BrowseData.aspx?Id=<page-id>`).
    #[arg(long, default_value_t = DEFAULT_PAGE_ID)]
    pub page_id: u32,

    #[command(flatten)]
    pub site: SiteArgs,

    /// Output file for the raw HTML (must not exist).
    #[arg(long)]
    pub out: String,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Saved country page (created by `fetch`).
    #[arg(long)]
    pub html: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct DatasetsArgs {
    /// Upper-case country name used in CSV file names.
    #[arg(long)]
    pub country: String,

    #[command(flatten)]
    pub output: OutputArgs,

    /// JSON Lines file receiving the dataset descriptions.
    #[arg(long, default_value = DEFAULT_DATASETS_PATH)]
    pub out: String,
}
