use std::sync::LazyLock;

use schedule_core::{
    collapse_whitespace, normalize_placeholder, split_building_room, CourseRecord, Status,
};
use schedule_logging::{schedule_debug, schedule_warn};
use scraper::{ElementRef, Html, Selector};

use crate::cells::{cell_lines, cell_text, course_number, parse_day_time, subject_code};
use crate::pagination::discover_page_count;
use crate::ExtractWarning;

/// Number of `td` cells a listing row must have.
const REQUIRED_CELLS: usize = 10;

static LISTING_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.courseListing").expect("table selector is valid"));

// Substring match so extra class tokens on the row are tolerated.
static COURSE_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr[class*='crseRow1']").expect("row selector is valid"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("expected {required} cells, found {found}")]
    TooFewCells { found: usize, required: usize },
    #[error("missing CRN")]
    MissingCrn,
    #[error("CRN {0:?} is not numeric")]
    InvalidCrn(String),
    #[error("missing subject code")]
    MissingSubject,
}

/// Records and warnings from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    pub records: Vec<CourseRecord>,
    pub warnings: Vec<ExtractWarning>,
}

/// Accumulated result of an extraction run, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<CourseRecord>,
    pub warnings: Vec<ExtractWarning>,
    pub pages_parsed: u32,
}

impl Extraction {
    pub(crate) fn push_page(&mut self, page: PageExtraction) {
        self.records.extend(page.records);
        self.warnings.extend(page.warnings);
        self.pages_parsed += 1;
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Extracts records from already-loaded pages (page 1 first).
///
/// Bad rows become warnings; nothing here fails. The first page's pagination
/// marker is checked too: an unreadable one adds
/// [`ExtractWarning::PaginationAmbiguous`], and a count above the number of
/// supplied pages adds [`ExtractWarning::MissingPages`].
pub fn extract<S: AsRef<str>>(pages: &[S]) -> Extraction {
    let mut extraction = Extraction::default();
    for (index, html) in pages.iter().enumerate() {
        let page = index as u32 + 1;
        let document = Html::parse_document(html.as_ref());
        if page == 1 {
            let count = discover_page_count(&document);
            if let Some(warning) = count.warning {
                schedule_warn!("{}", warning);
                extraction.warnings.push(warning);
            }
            if count.total as usize > pages.len() {
                extraction.warnings.push(ExtractWarning::MissingPages {
                    declared: count.total,
                    supplied: pages.len() as u32,
                });
            }
        }
        extraction.push_page(extract_document(&document, page));
    }
    extraction
}

/// Extracts the course rows of a single listing page.
pub fn extract_page(html: &str, page: u32) -> PageExtraction {
    extract_document(&Html::parse_document(html), page)
}

pub(crate) fn extract_document(document: &Html, page: u32) -> PageExtraction {
    let mut result = PageExtraction::default();
    let mut saw_table = false;

    for table in document.select(&LISTING_TABLE) {
        saw_table = true;
        for row in table.select(&COURSE_ROW) {
            match parse_row(row) {
                Ok(record) => result.records.push(record),
                Err(reason) => {
                    let raw = collapse_whitespace(&row.text().collect::<Vec<_>>().join(" "));
                    schedule_warn!("page {}: skipping row ({}): {}", page, reason, raw);
                    result
                        .warnings
                        .push(ExtractWarning::RowSkipped { page, reason, raw });
                }
            }
        }
    }

    if !saw_table {
        schedule_warn!("page {}: no course listing table", page);
        result.warnings.push(ExtractWarning::NoListingTable { page });
    }
    schedule_debug!(
        "page {}: {} records, {} warnings",
        page,
        result.records.len(),
        result.warnings.len()
    );
    result
}

fn parse_row(row: ElementRef<'_>) -> Result<CourseRecord, RowError> {
    let cells: Vec<ElementRef<'_>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name().eq_ignore_ascii_case("td"))
        .collect();
    if cells.len() < REQUIRED_CELLS {
        return Err(RowError::TooFewCells {
            found: cells.len(),
            required: REQUIRED_CELLS,
        });
    }

    let crn = cell_text(cells[1]);
    if crn.is_empty() {
        return Err(RowError::MissingCrn);
    }
    if !crn.chars().all(|c| c.is_ascii_digit()) {
        return Err(RowError::InvalidCrn(crn));
    }

    let subject = subject_code(cells[2]).ok_or(RowError::MissingSubject)?;
    let course_number = course_number(cells[2], &subject);
    let (building, room) = split_building_room(&cell_text(cells[7]));
    let day_time = parse_day_time(&cell_lines(cells[8]));

    Ok(CourseRecord {
        status: Status::from_cell_text(&cell_text(cells[0])),
        crn,
        subject,
        course_number,
        section: cell_text(cells[3]),
        title: cell_text(cells[4]),
        credits: cell_text(cells[5]),
        instructor: normalize_placeholder(&cell_text(cells[6])),
        days: day_time.days,
        time_start: day_time.time.map(|t| t.start),
        time_end: day_time.time.map(|t| t.end),
        time_raw: day_time.time_raw,
        date_range: normalize_placeholder(&cell_text(cells[9])),
        building,
        room,
    })
}
