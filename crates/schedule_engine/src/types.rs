use std::fmt;

use crate::extract::RowError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "undecodable response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Non-fatal problems collected during an extraction run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractWarning {
    #[error("page {page}: skipped row ({reason}): {raw}")]
    RowSkipped {
        page: u32,
        reason: RowError,
        raw: String,
    },
    #[error("page {page}: no course listing table found (login or error page?)")]
    NoListingTable { page: u32 },
    #[error("pagination marker {detail}; assuming a single page")]
    PaginationAmbiguous { detail: String },
    #[error("listing declares {declared} pages; only the first {limit} are fetched")]
    PageLimitExceeded { declared: u32, limit: u32 },
    #[error("listing declares {declared} pages but only {supplied} were supplied")]
    MissingPages { declared: u32, supplied: u32 },
    #[error(
        "page {page} could not be fetched ({error}); open the listing in a browser, \
         save the page, and rerun with --html-file <saved page>"
    )]
    PageFetchFailed { page: u32, error: FetchError },
}

/// Progress reported while harvesting a multi-page listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    PageRequested {
        page: u32,
    },
    PageParsed {
        page: u32,
        total_pages: u32,
        records: usize,
        warnings: usize,
    },
    PageFailed {
        page: u32,
        kind: FailureKind,
    },
    Finished {
        pages: u32,
        records: usize,
        warnings: usize,
    },
}
