use std::path::{Path, PathBuf};

use anyhow::Context as _;
use scraper::Html;

use crate::catalog::{Catalog, JsonlCatalog};
use crate::category::Category;
use crate::cli::{DatasetsArgs, ExtractArgs, FetchArgs, RunArgs, SiteArgs};
use crate::config::SiteConfig;
use crate::country::require_country_name;
use crate::csv_store::{csv_path, write_csv};
use crate::dataset::assemble_dataset;
use crate::error::ScrapeError;
use crate::fetch::{Fetcher, read_page_file, save_page_file};
use crate::formats::{CategorySummary, RunReport};
use crate::metadata::{MetadataRecord, MetadataStore};
use crate::tables::extract_category;

/// Fields the catalog may leave empty.
const OPTIONAL_FIELDS: &[&str] = &["notes"];

pub fn run(args: RunArgs) -> anyhow::Result<RunReport> {
    let fetcher = Fetcher::new(&site_config(&args.site)?)?;
    let data_dir = PathBuf::from(&args.output.data_dir);
    let store = MetadataStore::new(&args.output.metadata);
    let mut record = store.load().context("load metadata")?;

    tracing::info!(page_id = args.page_id, "run: fetch");
    let page = fetcher
        .fetch(args.page_id)
        .with_context(|| format!("fetch page {}", args.page_id))?;
    let doc = page.document().context("parse country page")?;

    tracing::info!(url = %page.url, "run: extract");
    let mut report = process_document(
        &doc,
        &args.output.selected_categories(),
        &data_dir,
        &mut record,
    )?;
    ensure_progress(&report)?;
    store.save(&record).context("save metadata")?;
    tracing::info!(path = %store.path().display(), "metadata saved");

    tracing::info!(out = %args.datasets_out, "run: datasets");
    let mut catalog = JsonlCatalog::create(Path::new(&args.datasets_out))?;
    let categories = report.completed_categories();
    publish_datasets(&mut report, &categories, &record, &data_dir, &mut catalog)?;
    ensure_progress(&report)?;

    log_done(&report);
    Ok(report)
}

pub fn fetch(args: FetchArgs) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(&site_config(&args.site)?)?;
    let out = PathBuf::from(&args.out);

    tracing::info!(page_id = args.page_id, out = %out.display(), "fetch");
    let page = fetcher
        .fetch(args.page_id)
        .with_context(|| format!("fetch page {}", args.page_id))?;
    save_page_file(&out, &page)
}

pub fn extract(args: ExtractArgs) -> anyhow::Result<RunReport> {
    let doc = read_page_file(Path::new(&args.html))?;
    let store = MetadataStore::new(&args.output.metadata);
    let mut record = store.load().context("load metadata")?;

    let report = process_document(
        &doc,
        &args.output.selected_categories(),
        Path::new(&args.output.data_dir),
        &mut record,
    )?;
    ensure_progress(&report)?;
    store.save(&record).context("save metadata")?;

    log_done(&report);
    Ok(report)
}

pub fn datasets(args: DatasetsArgs) -> anyhow::Result<RunReport> {
    let country = args.country.trim().to_uppercase();
    let data_dir = PathBuf::from(&args.output.data_dir);
    let record = MetadataStore::new(&args.output.metadata)
        .load()
        .context("load metadata")?;

    let mut report = RunReport::new(&country);
    for category in args.output.selected_categories() {
        let path = csv_path(&data_dir, &country, category)?;
        if !path.is_file() {
            tracing::warn!(%category, path = %path.display(), "category skipped: csv not found");
            report.skip(category, format!("csv not found: {}", path.display()));
            continue;
        }
        report.completed.push(CategorySummary {
            category,
            csv_path: path.to_string_lossy().to_string(),
            rows: 0,
            sources: 0,
        });
    }

    let mut catalog = JsonlCatalog::create(Path::new(&args.out))?;
    let categories = report.completed_categories();
    publish_datasets(&mut report, &categories, &record, &data_dir, &mut catalog)?;
    ensure_progress(&report)?;

    log_done(&report);
    Ok(report)
}

/// Extracts every requested category from a parsed page, writing its CSV and
/// recording its sources in `record`. A missing table skips only that category.
pub fn process_document(
    doc: &Html,
    categories: &[Category],
    data_dir: &Path,
    record: &mut MetadataRecord,
) -> anyhow::Result<RunReport> {
    let country = require_country_name(doc).context("extract country name")?;
    tracing::info!(%country, categories = categories.len(), "country page");

    let mut report = RunReport::new(&country);
    for &category in categories {
        tracing::info!(%category, "category: start");

        let tables = match extract_category(doc, category) {
            Ok(tables) => tables,
            Err(err @ ScrapeError::MissingTable { .. }) => {
                tracing::warn!(%category, %err, "category skipped");
                report.skip(category, err.to_string());
                continue;
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!("extract {category} tables")));
            }
        };

        let path = csv_path(data_dir, &country, category)?;
        write_csv(&path, &tables.rows).with_context(|| format!("write {category} csv"))?;
        record.update_source(category, &tables.sources)?;

        tracing::info!(
            %category,
            rows = tables.rows.len(),
            sources = tables.sources.len(),
            path = %path.display(),
            "category: done"
        );
        report.completed.push(CategorySummary {
            category,
            csv_path: path.to_string_lossy().to_string(),
            rows: tables.rows.len(),
            sources: tables.sources.len(),
        });
    }

    Ok(report)
}

/// Assembles and publishes one dataset per category. Categories whose description
/// cannot be assembled or lacks required fields are skipped; publish failures abort.
pub fn publish_datasets(
    report: &mut RunReport,
    categories: &[Category],
    record: &MetadataRecord,
    data_dir: &Path,
    catalog: &mut dyn Catalog,
) -> anyhow::Result<()> {
    for &category in categories {
        let assembled = assemble_dataset(category, &report.country, record, data_dir)
            .and_then(|dataset| {
                dataset.check_required_fields(OPTIONAL_FIELDS)?;
                Ok(dataset)
            });
        let dataset = match assembled {
            Ok(dataset) => dataset,
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(%category, %reason, "dataset skipped");
                report.skip(category, reason);
                continue;
            }
        };

        catalog
            .publish(&dataset)
            .with_context(|| format!("publish {category} dataset"))?;
        report.published.push(dataset.name);
    }
    Ok(())
}

fn ensure_progress(report: &RunReport) -> anyhow::Result<()> {
    if !report.completed.is_empty() {
        return Ok(());
    }
    let reasons = report
        .skipped
        .iter()
        .map(|s| format!("{}: {}", s.category, s.reason))
        .collect::<Vec<_>>()
        .join("; ");
    anyhow::bail!(
        "no indicator category succeeded for {}: {reasons}",
        report.country
    );
}

fn log_done(report: &RunReport) {
    tracing::info!(
        country = %report.country,
        completed = report.completed.len(),
        skipped = report.skipped.len(),
        published = report.published.len(),
        "run: done"
    );
}

fn site_config(args: &SiteArgs) -> anyhow::Result<SiteConfig> {
    Ok(SiteConfig::from_env()
        .context("load site config")?
        .with_overrides(
            args.base_url.as_deref(),
            args.user_agent.as_deref(),
            args.timeout_secs,
        ))
}
