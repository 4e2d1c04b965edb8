//! Schedule engine: page fetching, listing extraction and export.
mod cells;
mod decode;
mod export;
mod extract;
mod fetch;
mod harvest;
mod listing;
mod pagination;
mod persist;
mod types;

pub use cells::{parse_day_time, DayTime};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use export::{export_schedule, records_to_json, ExportError, ExportOptions, ExportSummary};
pub use extract::{extract, extract_page, Extraction, PageExtraction, RowError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use harvest::{
    harvest, harvest_blocking, HarvestSettings, ListingSource, PageSource, ProgressSink,
};
pub use listing::{ListingError, ListingQuery, Semester, TermId, DEFAULT_LISTING_URL, PAGE_PARAM};
pub use pagination::{discover_page_count, PageCount};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    ExtractWarning, FailureKind, FetchError, FetchMetadata, FetchOutput, HarvestEvent,
};
