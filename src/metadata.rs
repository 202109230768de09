use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::category::Category;

const DATA_SOURCE_KEY: &str = "data_source";

/// Catalog fields stored for one indicator category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryMetadata {
    pub title: String,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub data_source: String,
}

/// The whole metadata document. Keys this crate does not know about are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    root: Mapping,
}

impl MetadataRecord {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(yaml).context("parse metadata yaml")?;
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            _ => anyhow::bail!("metadata document must be a mapping of categories"),
        }
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(&self.root).context("serialize metadata yaml")
    }

    pub fn section(&self, category: Category) -> anyhow::Result<CategoryMetadata> {
        let section = self
            .root
            .get(category.key())
            .ok_or_else(|| anyhow::anyhow!("metadata has no `{category}` section"))?;
        serde_yaml::from_value(section.clone())
            .with_context(|| format!("read metadata section `{category}`"))
    }

    pub fn data_source(&self, category: Category) -> Option<&str> {
        self.root
            .get(category.key())?
            .get(DATA_SOURCE_KEY)?
            .as_str()
    }

    /// Joins the citation fragments with `,` and stores them as `<category>.data_source`.
    pub fn update_source(&mut self, category: Category, fragments: &[String]) -> anyhow::Result<()> {
        self.set_data_source(category, fragments.join(","))
    }

    pub fn set_data_source(&mut self, category: Category, data_source: String) -> anyhow::Result<()> {
        if !self.root.contains_key(category.key()) {
            tracing::debug!(%category, "metadata section missing; creating it");
            self.root.insert(
                Value::String(category.key().to_owned()),
                Value::Mapping(Mapping::new()),
            );
        }

        let Some(Value::Mapping(section)) = self.root.get_mut(category.key()) else {
            anyhow::bail!("metadata section `{category}` must be a mapping");
        };
        section.insert(
            Value::String(DATA_SOURCE_KEY.to_owned()),
            Value::String(data_source),
        );
        Ok(())
    }
}

/// YAML file holding the [`MetadataRecord`]. Loaded once per run and saved once.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<MetadataRecord> {
        let yaml = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read metadata: {}", self.path.display()))?;
        MetadataRecord::from_yaml(&yaml)
            .with_context(|| format!("load metadata: {}", self.path.display()))
    }

    /// Replaces the file in one rename so readers never see a half-written document.
    pub fn save(&self, record: &MetadataRecord) -> anyhow::Result<()> {
        let yaml = record.to_yaml()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create metadata dir: {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(yaml.as_bytes())
            .context("write metadata temp file")?;
        tmp.flush().context("flush metadata temp file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("replace metadata: {}", self.path.display()))?;

        Ok(())
    }
}
