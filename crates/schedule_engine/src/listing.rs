use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_LISTING_URL: &str = "https://my.gwu.edu/mod/pws/courses.cfm";

/// Query parameter carrying the 1-based page number for pages after the first.
pub const PAGE_PARAM: &str = "pageNum";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("subject code is required")]
    EmptySubject,
    #[error("subject code {0:?} must be 2 to 4 letters")]
    InvalidSubject(String),
    #[error("invalid listing base url: {0}")]
    InvalidBaseUrl(String),
    #[error("page numbers start at 1")]
    PageZero,
    #[error("unknown semester {0:?} (expected spring, summer, fall or 01/06/08)")]
    UnknownSemester(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    Spring,
    Summer,
    Fall,
}

impl Semester {
    /// Two-digit code the registrar appends to the year in a term id.
    pub fn code(self) -> &'static str {
        match self {
            Semester::Spring => "01",
            Semester::Summer => "06",
            Semester::Fall => "08",
        }
    }
}

impl FromStr for Semester {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" | "01" => Ok(Semester::Spring),
            "summer" | "06" => Ok(Semester::Summer),
            "fall" | "08" => Ok(Semester::Fall),
            _ => Err(ListingError::UnknownSemester(s.to_string())),
        }
    }
}

/// Registrar term identifier, e.g. `202601` for Spring 2026.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermId(String);

impl TermId {
    pub fn new(year: u16, semester: Semester) -> Self {
        TermId(format!("{year}{}", semester.code()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one subject's schedule listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub campus: String,
    pub term: String,
    pub subject: String,
}

fn default_base_url() -> String {
    DEFAULT_LISTING_URL.to_string()
}

impl ListingQuery {
    /// Builds a query against [`DEFAULT_LISTING_URL`]. The subject is trimmed
    /// and upper-cased.
    pub fn new(
        campus: impl Into<String>,
        term: impl Into<String>,
        subject: &str,
    ) -> Result<Self, ListingError> {
        let query = Self {
            base_url: default_base_url(),
            campus: campus.into(),
            term: term.into(),
            subject: subject.trim().to_ascii_uppercase(),
        };
        query.validate()?;
        Ok(query)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<(), ListingError> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ListingError::EmptySubject);
        }
        if !(2..=4).contains(&subject.len()) || !subject.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ListingError::InvalidSubject(subject.to_string()));
        }
        Url::parse(&self.base_url).map_err(|err| ListingError::InvalidBaseUrl(err.to_string()))?;
        Ok(())
    }

    /// URL of the first page.
    pub fn url(&self) -> Result<Url, ListingError> {
        self.page_url(1)
    }

    /// URL of `page`; page 1 carries no page parameter.
    pub fn page_url(&self, page: u32) -> Result<Url, ListingError> {
        if page == 0 {
            return Err(ListingError::PageZero);
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| ListingError::InvalidBaseUrl(err.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("campId", &self.campus)
                .append_pair("termId", &self.term)
                .append_pair("subjId", &self.subject.trim().to_ascii_uppercase());
            if page > 1 {
                pairs.append_pair(PAGE_PARAM, &page.to_string());
            }
        }
        Ok(url)
    }
}
