use std::io;

use futures_util::future::join_all;
use schedule_logging::{schedule_error, schedule_info, schedule_warn};
use scraper::Html;

use crate::decode::decode_html;
use crate::extract::{extract_document, extract_page, Extraction, PageExtraction};
use crate::fetch::Fetcher;
use crate::listing::ListingQuery;
use crate::pagination::discover_page_count;
use crate::{ExtractWarning, FailureKind, FetchError, HarvestEvent};

/// Supplies the decoded HTML of one listing page (1-based).
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError>;
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Pages of one subject listing fetched over HTTP.
pub struct ListingSource<F: Fetcher> {
    fetcher: F,
    query: ListingQuery,
}

impl<F: Fetcher> ListingSource<F> {
    pub fn new(fetcher: F, query: ListingQuery) -> Self {
        Self { fetcher, query }
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }
}

#[async_trait::async_trait]
impl<F: Fetcher> PageSource for ListingSource<F> {
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError> {
        let url = self
            .query
            .page_url(page)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let output = self.fetcher.fetch(url.as_str()).await?;
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        Ok(decoded.html)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestSettings {
    /// Upper bound on pages requested, whatever the listing declares.
    pub max_pages: u32,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self { max_pages: 50 }
    }
}

struct FirstPage {
    declared: u32,
    pagination_warning: Option<ExtractWarning>,
    extraction: PageExtraction,
}

// Parsed documents are not Send, so page 1 is fully consumed before any await.
fn read_first_page(html: &str) -> FirstPage {
    let document = Html::parse_document(html);
    let count = discover_page_count(&document);
    FirstPage {
        declared: count.total,
        pagination_warning: count.warning,
        extraction: extract_document(&document, 1),
    }
}

/// Fetches and extracts every page of a listing.
///
/// Page 1 decides the page count; the remaining pages are requested
/// concurrently and merged in page order. A page that cannot be fetched adds a
/// warning and contributes no records; the other pages are kept.
pub async fn harvest(
    source: &dyn PageSource,
    sink: &dyn ProgressSink,
    settings: &HarvestSettings,
) -> Extraction {
    let mut extraction = Extraction::default();

    sink.emit(HarvestEvent::PageRequested { page: 1 });
    let first_html = match source.fetch_page(1).await {
        Ok(html) => html,
        Err(error) => {
            record_failure(&mut extraction, sink, 1, error);
            finish(&extraction, sink);
            return extraction;
        }
    };

    let first = read_first_page(&first_html);
    if let Some(warning) = first.pagination_warning {
        schedule_warn!("{}", warning);
        extraction.warnings.push(warning);
    }
    let limit = settings.max_pages.max(1);
    let total = if first.declared > limit {
        let warning = ExtractWarning::PageLimitExceeded {
            declared: first.declared,
            limit,
        };
        schedule_warn!("{}", warning);
        extraction.warnings.push(warning);
        limit
    } else {
        first.declared
    };
    record_page(&mut extraction, sink, 1, total, first.extraction);

    for page in 2..=total {
        sink.emit(HarvestEvent::PageRequested { page });
    }
    let fetches = (2..=total).map(|page| async move { (page, source.fetch_page(page).await) });
    for (page, result) in join_all(fetches).await {
        match result {
            Ok(html) => {
                let parsed = extract_page(&html, page);
                record_page(&mut extraction, sink, page, total, parsed);
            }
            Err(error) => record_failure(&mut extraction, sink, page, error),
        }
    }

    finish(&extraction, sink);
    extraction
}

/// Runs [`harvest`] on a private runtime for callers without one.
pub fn harvest_blocking(
    source: &dyn PageSource,
    sink: &dyn ProgressSink,
    settings: &HarvestSettings,
) -> io::Result<Extraction> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(harvest(source, sink, settings)))
}

fn record_page(
    extraction: &mut Extraction,
    sink: &dyn ProgressSink,
    page: u32,
    total_pages: u32,
    parsed: PageExtraction,
) {
    schedule_info!(
        "page {}/{}: {} records",
        page,
        total_pages,
        parsed.records.len()
    );
    sink.emit(HarvestEvent::PageParsed {
        page,
        total_pages,
        records: parsed.records.len(),
        warnings: parsed.warnings.len(),
    });
    extraction.push_page(parsed);
}

fn record_failure(extraction: &mut Extraction, sink: &dyn ProgressSink, page: u32, error: FetchError) {
    schedule_error!("page {} failed: {}", page, error);
    sink.emit(HarvestEvent::PageFailed {
        page,
        kind: error.kind.clone(),
    });
    extraction
        .warnings
        .push(ExtractWarning::PageFetchFailed { page, error });
}

fn finish(extraction: &Extraction, sink: &dyn ProgressSink) {
    sink.emit(HarvestEvent::Finished {
        pages: extraction.pages_parsed,
        records: extraction.records.len(),
        warnings: extraction.warnings.len(),
    });
}
