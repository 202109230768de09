use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::category::Category;

/// `<data_dir>/<COUNTRY>-<category>.csv`
pub fn csv_path(data_dir: &Path, country: &str, category: Category) -> anyhow::Result<PathBuf> {
    if country.is_empty() {
        anyhow::bail!("country name must not be empty");
    }
    if country.contains(['/', '\\']) || country == "." || country == ".." {
        anyhow::bail!("country name cannot be used as a file name: {country:?}");
    }
    Ok(data_dir.join(format!("{country}-{}.csv", category.key())))
}

/// Writes every row, header included, replacing any previous file.
pub fn write_csv(path: &Path, rows: &[Vec<String>]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create csv dir: {}", parent.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open csv: {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("write csv row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", path.display()))?;

    Ok(())
}
