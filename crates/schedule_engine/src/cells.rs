use std::sync::LazyLock;

use ego_tree::iter::Edge;
use schedule_core::{collapse_whitespace, find_time_range, parse_time_range, Days, TimeRange};
use scraper::node::Node;
use scraper::{ElementRef, Selector};

static ANCHOR_SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a span").expect("anchor span selector is valid"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector is valid"));
static BOLD_CANDIDATES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span[style], b, strong").expect("bold selector is valid"));

/// Text lines of a cell, split at `<br>` and block-level boundaries, each
/// whitespace-collapsed, blanks dropped.
pub(crate) fn cell_lines(cell: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut flush = |current: &mut String| {
        let line = collapse_whitespace(current);
        if !line.is_empty() {
            lines.push(line);
        }
        current.clear();
    };

    for edge in cell.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Text(text) => current.push_str(text),
                Node::Element(element) if element.name().eq_ignore_ascii_case("br") => {
                    flush(&mut current)
                }
                Node::Element(element) if is_block(element.name()) => flush(&mut current),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    if is_block(element.name()) {
                        flush(&mut current);
                    }
                }
            }
        }
    }
    flush(&mut current);
    lines
}

fn is_block(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "div" | "p" | "li" | "table" | "tr"
    )
}

/// Cell text on one line; line breaks become single spaces.
pub(crate) fn cell_text(cell: ElementRef<'_>) -> String {
    cell_lines(cell).join(" ")
}

fn is_subject_code(text: &str) -> bool {
    (2..=4).contains(&text.len()) && text.chars().all(|c| c.is_ascii_alphabetic())
}

/// Department code from the subject cell: the bold-styled label, or a leading
/// 2-4 letter token when the markup has no styling.
pub(crate) fn subject_code(cell: ElementRef<'_>) -> Option<String> {
    let styled = cell.select(&BOLD_CANDIDATES).find(|el| {
        let name = el.value().name();
        if name == "b" || name == "strong" {
            return true;
        }
        el.value().attr("style").is_some_and(|style| {
            let compact: String = style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            compact.contains("font-weight:bold") || compact.contains("font-weight:700")
        })
    });

    let candidate = match styled {
        Some(label) => collapse_whitespace(&label.text().collect::<String>()),
        None => cell_text(cell)
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    is_subject_code(&candidate).then(|| candidate.to_ascii_uppercase())
}

/// Course number from the span nested in the cell's link, falling back to the
/// link text, then to the token after the subject.
pub(crate) fn course_number(cell: ElementRef<'_>, subject: &str) -> String {
    let from_link = cell
        .select(&ANCHOR_SPAN)
        .next()
        .or_else(|| cell.select(&ANCHOR).next())
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty());

    let number = from_link.unwrap_or_else(|| {
        let text = cell_text(cell);
        let mut tokens = text.split(' ');
        match tokens.next() {
            Some(first) if first.eq_ignore_ascii_case(subject) => {
                tokens.next().unwrap_or_default().to_string()
            }
            _ => String::new(),
        }
    });
    number.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Parsed contents of a day/time cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTime {
    pub days: Days,
    /// Time text as it appeared; empty when the cell had no time line.
    pub time_raw: String,
    pub time: Option<TimeRange>,
}

/// Splits day/time cell lines into days and a time range.
///
/// The expected shape is `["TR", "02:20PM - 03:35PM"]`. A single line that
/// holds both is split at the time range. A missing or unparseable time leaves
/// `time` empty without failing.
pub fn parse_day_time(lines: &[String]) -> DayTime {
    let (days, time_raw) = match lines {
        [] => (Days::empty(), String::new()),
        [only] => match find_time_range(only) {
            Some((start, _)) => (
                Days::parse_strict(&only[..start]).unwrap_or_default(),
                only[start..].trim().to_string(),
            ),
            None => match Days::parse_strict(only) {
                Some(days) => (days, String::new()),
                None => (Days::empty(), only.clone()),
            },
        },
        [day_line, time_line, ..] => (
            Days::parse_strict(day_line).unwrap_or_default(),
            time_line.clone(),
        ),
    };
    let time = parse_time_range(&time_raw);
    DayTime {
        days,
        time_raw,
        time,
    }
}
