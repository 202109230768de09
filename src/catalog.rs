use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::formats::DatasetDescription;

/// Receives finished dataset descriptions. Uploading and server-side validation live behind this.
pub trait Catalog {
    fn publish(&mut self, dataset: &DatasetDescription) -> anyhow::Result<()>;
}

/// Writes one JSON object per dataset to a file, truncated when the catalog is opened.
pub struct JsonlCatalog {
    path: PathBuf,
    out: BufWriter<File>,
}

impl JsonlCatalog {
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dataset output dir: {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("open dataset output: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
        })
    }
}

impl Catalog for JsonlCatalog {
    fn publish(&mut self, dataset: &DatasetDescription) -> anyhow::Result<()> {
        let mut value = serde_json::to_value(dataset).context("serialize dataset description")?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "dataset_date".to_owned(),
                serde_json::json!(dataset.dataset_date()),
            );
        }

        serde_json::to_writer(&mut self.out, &value).context("write dataset json")?;
        self.out
            .write_all(b"\n")
            .context("write dataset newline")?;
        self.out
            .flush()
            .with_context(|| format!("flush dataset output: {}", self.path.display()))?;

        tracing::info!(name = %dataset.name, title = %dataset.title, "dataset published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::category::Category;
    use crate::dataset::assemble_dataset;
    use crate::metadata::MetadataRecord;

    #[test]
    fn writes_one_line_per_dataset_with_date() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let out = temp.path().join("datasets.jsonl");
        std::fs::write(&out, "stale\n")?;

        let record = MetadataRecord::from_yaml(
            "health:\n  title: Health Indicators\n  name: health-indicators\n  data_source: WHO\n",
        )?;
        let dataset = assemble_dataset(Category::Health, "KENYA", &record, Path::new("data"))?;

        let mut catalog = JsonlCatalog::create(&out)?;
        catalog.publish(&dataset)?;
        catalog.publish(&dataset)?;
        drop(catalog);

        let contents = std::fs::read_to_string(&out)?;
        let lines = contents.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0])?;
        assert_eq!(value["dataset_date"], "01/01/1985-12/31/2017");
        assert_eq!(value["category"], "health");
        assert_eq!(value["title"], "KENYA - Health Indicators");

        let parsed: DatasetDescription = serde_json::from_str(lines[1])?;
        assert_eq!(parsed, dataset);
        Ok(())
    }
}
