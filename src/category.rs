use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the statistical domains published on each country page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Category {
    PopulationAndMigration,
    Health,
    Education,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::PopulationAndMigration,
        Category::Health,
        Category::Education,
    ];

    /// Key used in file names and as the metadata section name.
    pub fn key(self) -> &'static str {
        match self {
            Category::PopulationAndMigration => "population_and_migration",
            Category::Health => "health",
            Category::Education => "education",
        }
    }

    pub fn data_table_id(self) -> &'static str {
        match self {
            Category::PopulationAndMigration => "StatBasebody_tblPopulation",
            Category::Health => "StatBasebody_tblHealth",
            Category::Education => "StatBasebody_tblEducation",
        }
    }

    pub fn source_table_id(self) -> &'static str {
        match self {
            Category::PopulationAndMigration => "StatBasebody_tblPopulationDS",
            Category::Health => "StatBasebody_tblHealthDS",
            Category::Education => "StatBasebody_tblEducationDS",
        }
    }

    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Category::PopulationAndMigration => &["population", "migration"],
            Category::Health => &["health"],
            Category::Education => &["EDUCATION"],
        }
    }

    #[must_use]
    pub fn resource_name(self, country: &str) -> String {
        let label = match self {
            Category::PopulationAndMigration => "Population and migration indicators",
            Category::Health => "Health indicators",
            Category::Education => "Education indicators",
        };
        format!("{country} - {label}")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        let raw = raw.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.key() == raw)
            .ok_or_else(|| anyhow::anyhow!("unknown indicator category: {raw:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn keys_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
        assert_eq!(
            " health ".parse::<Category>().unwrap(),
            Category::Health
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "economy".parse::<Category>().unwrap_err().to_string();
        assert!(err.contains("unknown indicator category"));
    }

    #[test]
    fn source_table_is_data_table_with_ds_suffix() {
        for category in Category::ALL {
            assert_eq!(
                category.source_table_id(),
                format!("{}DS", category.data_table_id())
            );
        }
    }

    #[test]
    fn population_carries_two_tags() {
        assert_eq!(
            Category::PopulationAndMigration.tags(),
            &["population", "migration"]
        );
        assert_eq!(Category::Education.tags(), &["EDUCATION"]);
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&Category::PopulationAndMigration).unwrap();
        assert_eq!(json, "\"population_and_migration\"");
    }
}
