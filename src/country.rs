use scraper::Html;

use crate::error::{ScrapeError, selector};

/// Returns the first non-empty `<h3><b>` text in document order, trimmed and upper-cased.
///
/// Headings without a bold child are skipped.
pub fn extract_country_name(doc: &Html) -> Result<Option<String>, ScrapeError> {
    let heading = selector("h3")?;
    let bold = selector("b")?;

    for h3 in doc.select(&heading) {
        let Some(b) = h3.select(&bold).next() else {
            continue;
        };
        let text = b.text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() {
            return Ok(Some(text.to_uppercase()));
        }
    }

    Ok(None)
}

/// Like [`extract_country_name`], but a page without a country name is an error.
pub fn require_country_name(doc: &Html) -> Result<String, ScrapeError> {
    extract_country_name(doc)?.ok_or(ScrapeError::MissingCountryName)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn skips_empty_headings() {
        let page = doc("<h3><b>  </b></h3><h3><b></b></h3><h3><b> chad </b></h3><h3><b>Mali</b></h3>");
        assert_eq!(extract_country_name(&page).unwrap().as_deref(), Some("CHAD"));
    }

    #[test]
    fn skips_headings_without_bold() {
        let page = doc("<h3>Country profile</h3><h3>Indicators for <b>Kenya</b></h3>");
        assert_eq!(extract_country_name(&page).unwrap().as_deref(), Some("KENYA"));
    }

    #[test]
    fn ignores_bold_outside_h3() {
        let page = doc("<h2><b>Africa</b></h2><p><b>Niger</b></p><h3><b>Togo</b></h3>");
        assert_eq!(extract_country_name(&page).unwrap().as_deref(), Some("TOGO"));
    }

    #[test]
    fn nested_markup_inside_bold_is_collected() {
        let page = doc("<h3><b><span>Côte</span> d'Ivoire</b></h3>");
        assert_eq!(
            extract_country_name(&page).unwrap().as_deref(),
            Some("CÔTE D'IVOIRE")
        );
    }

    #[test]
    fn missing_name_is_absent_then_error() {
        let page = doc("<h3><b> </b></h3><h1>Kenya</h1>");
        assert_eq!(extract_country_name(&page).unwrap(), None);
        assert!(matches!(
            require_country_name(&page),
            Err(ScrapeError::MissingCountryName)
        ));
    }
}
