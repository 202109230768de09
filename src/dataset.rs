use std::path::Path;

use crate::category::Category;
use crate::csv_store::csv_path;
use crate::formats::{DatasetDescription, ResourceRef, YearRange};
use crate::metadata::MetadataRecord;

pub const YEARS: YearRange = YearRange {
    start: 1985,
    end: 2017,
};
pub const UPDATE_FREQUENCY: &str = "Every year";
pub const RESOURCE_DESCRIPTION: &str =
    "Indicators extracted from the UNECA statistics database country profile";

/// Builds the catalog description for one category. Pure: reads the record, touches no files.
pub fn assemble_dataset(
    category: Category,
    country: &str,
    record: &MetadataRecord,
    data_dir: &Path,
) -> anyhow::Result<DatasetDescription> {
    let section = record.section(category)?;
    let path = csv_path(data_dir, country, category)?;

    Ok(DatasetDescription {
        category,
        name: slugify(&section.name),
        title: format!("{country} - {}", section.title),
        notes: section.notes,
        dataset_source: section.data_source,
        location: country.to_owned(),
        tags: category.tags().iter().map(|tag| (*tag).to_owned()).collect(),
        subnational: true,
        year_range: YEARS,
        data_update_frequency: UPDATE_FREQUENCY.to_owned(),
        resources: vec![ResourceRef {
            name: category.resource_name(country),
            description: RESOURCE_DESCRIPTION.to_owned(),
            format: "csv".to_owned(),
            path: path.to_string_lossy().to_string(),
        }],
    })
}

/// Lower-cases and turns every run of characters outside `[a-z0-9_]` into one dash.
#[must_use]
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

impl DatasetDescription {
    /// Catalog date-range notation, e.g. `01/01/1985-12/31/2017`.
    pub fn dataset_date(&self) -> String {
        format!(
            "01/01/{}-12/31/{}",
            self.year_range.start, self.year_range.end
        )
    }

    /// Fails on the first empty required field, skipping any listed in `ignore`.
    pub fn check_required_fields(&self, ignore: &[&str]) -> anyhow::Result<()> {
        let notes = self.notes.as_deref().unwrap_or_default();
        let checks: [(&str, bool); 5] = [
            ("name", !self.name.is_empty()),
            ("title", !self.title.trim().is_empty()),
            ("notes", !notes.trim().is_empty()),
            ("location", !self.location.is_empty()),
            ("tags", !self.tags.is_empty()),
        ];
        for (field, ok) in checks {
            if !ok && !ignore.contains(&field) {
                anyhow::bail!("dataset `{}` is missing required field `{field}`", self.name);
            }
        }

        if self.resources.len() != 1 {
            anyhow::bail!(
                "dataset `{}` must carry exactly one resource, found {}",
                self.name,
                self.resources.len()
            );
        }
        if self.year_range.start > self.year_range.end {
            anyhow::bail!("dataset `{}` has an inverted year range", self.name);
        }
        Ok(())
    }
}
