use serde::{Deserialize, Serialize};

use crate::category::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: u16,
    pub end: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub name: String,
    pub description: String,
    pub format: String,
    pub path: String,
}

/// Catalog-ready description of one category's dataset for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescription {
    pub category: Category,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub dataset_source: String,
    pub location: String,
    pub tags: Vec<String>,
    pub subnational: bool,
    pub year_range: YearRange,
    pub data_update_frequency: String,
    pub resources: Vec<ResourceRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub csv_path: String,
    pub rows: usize,
    pub sources: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCategory {
    pub category: Category,
    pub reason: String,
}

/// Outcome of processing one country page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub country: String,
    pub completed: Vec<CategorySummary>,
    pub skipped: Vec<SkippedCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub published: Vec<String>,
}

impl RunReport {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            completed: Vec::new(),
            skipped: Vec::new(),
            published: Vec::new(),
        }
    }

    pub fn skip(&mut self, category: Category, reason: impl Into<String>) {
        self.completed.retain(|summary| summary.category != category);
        self.skipped.push(SkippedCategory {
            category,
            reason: reason.into(),
        });
    }

    pub fn completed_categories(&self) -> Vec<Category> {
        self.completed.iter().map(|summary| summary.category).collect()
    }
}
