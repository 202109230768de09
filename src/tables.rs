use scraper::{ElementRef, Html};

use crate::category::Category;
use crate::error::{ScrapeError, selector};

/// Data rows and source citations pulled from one category's table pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTables {
    /// Row 0 is the header row, kept as-is.
    pub rows: Vec<Vec<String>>,
    pub sources: Vec<String>,
}

pub fn extract_category(doc: &Html, category: Category) -> Result<CategoryTables, ScrapeError> {
    extract_tables(doc, category.data_table_id(), category.source_table_id())
}

pub fn extract_tables(
    doc: &Html,
    data_table_id: &str,
    source_table_id: &str,
) -> Result<CategoryTables, ScrapeError> {
    let data_table = find_table(doc, data_table_id)?;
    let source_table = find_table(doc, source_table_id)?;

    let rows = table_rows(data_table)?;
    let sources = table_rows(source_table)?
        .into_iter()
        .skip(1)
        .flatten()
        .collect();

    Ok(CategoryTables { rows, sources })
}

fn find_table<'a>(doc: &'a Html, table_id: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let tables = selector("table")?;
    doc.select(&tables)
        .find(|table| table.value().id() == Some(table_id))
        .ok_or_else(|| ScrapeError::missing_table(table_id))
}

fn table_rows(table: ElementRef<'_>) -> Result<Vec<Vec<String>>, ScrapeError> {
    let row = selector("tr")?;
    let cell = selector("td, th")?;

    Ok(table
        .select(&row)
        .map(|tr| {
            tr.select(&cell)
                .map(|c| c.text().collect::<String>())
                .collect()
        })
        .collect())
}
