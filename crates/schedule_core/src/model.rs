use serde::{Deserialize, Serialize};

use crate::days::Days;
use crate::time::TimeRange;

/// Sentinel for blank or placeholder text in optional fields.
pub const NOT_SPECIFIED: &str = "Not specified";

const PLACEHOLDERS: &[&str] = &[NOT_SPECIFIED, "TBD", "TBA", "N/A", "NA", "-"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Open,
    Closed,
    Waitlist,
    #[default]
    Unknown,
}

impl Status {
    /// Matches the status cell case-insensitively; anything unrecognized is `Unknown`.
    pub fn from_cell_text(text: &str) -> Status {
        let upper = collapse_whitespace(text).to_ascii_uppercase();
        if upper.starts_with("OPEN") {
            Status::Open
        } else if upper.starts_with("CLOSED") {
            Status::Closed
        } else if upper.starts_with("WAIT") {
            Status::Waitlist
        } else {
            Status::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "OPEN",
            Status::Closed => "CLOSED",
            Status::Waitlist => "WAITLIST",
            Status::Unknown => "UNKNOWN",
        }
    }
}

/// One scraped row of the schedule listing.
///
/// Records are built once per extraction pass and never mutated afterwards.
/// `crn` is not unique across pages (cross-listed sections repeat), so nothing
/// here treats it as a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub status: Status,
    pub crn: String,
    pub subject: String,
    pub course_number: String,
    pub section: String,
    pub title: String,
    pub credits: String,
    pub instructor: String,
    pub days: Days,
    pub time_start: Option<u16>,
    pub time_end: Option<u16>,
    /// Time cell text exactly as scraped, kept even when parsing failed.
    pub time_raw: String,
    pub date_range: String,
    pub building: String,
    pub room: String,
}

impl CourseRecord {
    pub fn time_range(&self) -> Option<TimeRange> {
        match (self.time_start, self.time_end) {
            (Some(start), Some(end)) => Some(TimeRange { start, end }),
            _ => None,
        }
    }

    /// Display code such as `"GEOG 1001"`, falling back to the section when the
    /// course number is missing.
    pub fn course_code(&self) -> String {
        let suffix = if self.course_number.is_empty() {
            &self.section
        } else {
            &self.course_number
        };
        match (self.subject.is_empty(), suffix.is_empty()) {
            (false, false) => format!("{} {}", self.subject, suffix),
            (false, true) => self.subject.clone(),
            (true, _) => suffix.clone(),
        }
    }

    pub fn has_location(&self) -> bool {
        !is_placeholder(&self.building) && !is_placeholder(&self.room)
    }
}

/// Collapses runs of whitespace (including non-breaking spaces) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty()
        || PLACEHOLDERS
            .iter()
            .any(|placeholder| placeholder.eq_ignore_ascii_case(trimmed))
}

/// Whitespace-collapses `text` and maps blanks and placeholders to [`NOT_SPECIFIED`].
pub fn normalize_placeholder(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    if is_placeholder(&collapsed) {
        NOT_SPECIFIED.to_string()
    } else {
        collapsed
    }
}

/// Splits a location cell into `(building, room)`.
///
/// The last whitespace token is the room and the rest is the building; a
/// single token is a building with no room. Either part that is a placeholder
/// (`"MON TBA"`) becomes [`NOT_SPECIFIED`]. This is a positional heuristic for
/// the listing's `"<building> <room>"` cells, not a general address parser.
pub fn split_building_room(text: &str) -> (String, String) {
    let normalized = normalize_placeholder(text);
    if normalized == NOT_SPECIFIED {
        return (NOT_SPECIFIED.to_string(), NOT_SPECIFIED.to_string());
    }
    let tokens: Vec<&str> = normalized.split(' ').collect();
    match tokens.split_last() {
        Some((room, building)) if !building.is_empty() => (
            normalize_placeholder(&building.join(" ")),
            normalize_placeholder(room),
        ),
        _ => (normalized, NOT_SPECIFIED.to_string()),
    }
}
