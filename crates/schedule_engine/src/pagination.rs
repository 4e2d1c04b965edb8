use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::ExtractWarning;

static MARKER_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[href*='goToPage'], [onclick*='goToPage']").expect("marker selector is valid")
});

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"goToPage\(\s*['"]?([^'")]*?)['"]?\s*\)"#).expect("marker regex is valid")
});

/// Declared number of result pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCount {
    pub total: u32,
    /// Set when the count fell back to one page.
    pub warning: Option<ExtractWarning>,
}

impl PageCount {
    fn single(detail: &str) -> Self {
        Self {
            total: 1,
            warning: Some(ExtractWarning::PaginationAmbiguous {
                detail: detail.to_string(),
            }),
        }
    }
}

/// Reads the page count from `goToPage('N')` jump links on the first page.
///
/// The highest page referenced wins. Missing, non-numeric or zero markers all
/// collapse to a single page with a warning.
pub fn discover_page_count(document: &Html) -> PageCount {
    let mut seen_marker = false;
    let mut highest: Option<u32> = None;

    for element in document.select(&MARKER_SELECTOR) {
        for attr in ["href", "onclick"] {
            let Some(value) = element.value().attr(attr) else {
                continue;
            };
            for caps in MARKER_RE.captures_iter(value) {
                seen_marker = true;
                if let Ok(page) = caps[1].trim().parse::<u32>() {
                    highest = Some(highest.map_or(page, |h| h.max(page)));
                }
            }
        }
    }

    match highest {
        Some(0) => PageCount::single("points to zero pages"),
        Some(total) => PageCount {
            total,
            warning: None,
        },
        None if seen_marker => PageCount::single("is malformed"),
        None => PageCount::single("not found"),
    }
}
