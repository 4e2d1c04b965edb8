use std::sync::LazyLock;

use regex::Regex;

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp])[Mm]$").expect("clock regex is valid")
});

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}:\d{2}\s*[AaPp][Mm])\s*[-\u{2010}-\u{2015}]+\s*(\d{1,2}:\d{2}\s*[AaPp][Mm])")
        .expect("time range regex is valid")
});

/// Half-open `[start, end)` interval in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeRange {
    pub start: u16,
    pub end: u16,
}

impl TimeRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Touching intervals (one ends as the other starts) do not overlap.
    pub fn overlaps(self, other: TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Converts `"02:20PM"` style text to minutes since midnight.
///
/// `12:xxAM` is just after midnight and `12:xxPM` just after noon.
pub fn parse_clock(text: &str) -> Option<u16> {
    let caps = CLOCK_RE.captures(text.trim())?;
    let hour: u16 = caps[1].parse().ok()?;
    let minute: u16 = caps[2].parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let pm = caps[3].eq_ignore_ascii_case("p");
    Some(hour % 12 * 60 + minute + if pm { 12 * 60 } else { 0 })
}

/// Finds a `start - end` clock range anywhere in `text`.
///
/// Arranged meetings (`ARR`) and anything without two valid clock times give `None`.
pub fn parse_time_range(text: &str) -> Option<TimeRange> {
    if text.to_ascii_uppercase().contains("ARR") {
        return None;
    }
    let caps = RANGE_RE.captures(text)?;
    let start = parse_clock(&caps[1])?;
    let end = parse_clock(&caps[2])?;
    Some(TimeRange { start, end })
}

/// Byte span of the first clock range in `text`, used to split single-line
/// day/time cells.
pub fn find_time_range(text: &str) -> Option<(usize, usize)> {
    RANGE_RE.find(text).map(|m| (m.start(), m.end()))
}

/// Formats minutes since midnight as `"2:20 PM"`.
pub fn format_minutes(minutes: u16) -> String {
    let hour = (minutes / 60) % 24;
    let minute = minutes % 60;
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {period}")
}
