use std::cmp::Ordering;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::days::{Day, Days};
use crate::model::CourseRecord;

/// Grid window and scale for a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub day_start_minute: u16,
    pub day_end_minute: u16,
    pub pixels_per_minute: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            day_start_minute: 9 * 60,
            day_end_minute: 21 * 60,
            pixels_per_minute: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutConfigError {
    #[error("day window is empty: start {start} is not before end {end}")]
    EmptyWindow { start: u16, end: u16 },
    #[error("day end {0} is past midnight")]
    EndPastMidnight(u16),
    #[error("pixels per minute must be positive and finite, got {0}")]
    InvalidScale(f64),
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if self.day_end_minute > 24 * 60 {
            return Err(LayoutConfigError::EndPastMidnight(self.day_end_minute));
        }
        if self.day_start_minute >= self.day_end_minute {
            return Err(LayoutConfigError::EmptyWindow {
                start: self.day_start_minute,
                end: self.day_end_minute,
            });
        }
        if !self.pixels_per_minute.is_finite() || self.pixels_per_minute <= 0.0 {
            return Err(LayoutConfigError::InvalidScale(self.pixels_per_minute));
        }
        Ok(())
    }

    /// Pixel height of the visible day window.
    pub fn grid_height(&self) -> f64 {
        f64::from(self.day_end_minute.saturating_sub(self.day_start_minute)) * self.pixels_per_minute
    }
}

/// One weekday occurrence of a course, positioned on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBlock<'a> {
    pub day: Day,
    pub start_minute: u16,
    pub end_minute: u16,
    pub top: f64,
    pub height: f64,
    pub column: usize,
    pub column_count: usize,
    pub left_percent: f64,
    pub width_percent: f64,
    /// The block extends past the grid window; the renderer clips it.
    pub clipped: bool,
    /// Index of the owning record in the slice passed to [`layout`].
    #[serde(rename = "sourceRecord")]
    pub record_index: usize,
    #[serde(skip)]
    pub record: &'a CourseRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UnscheduledReason {
    /// No meeting days (online, arranged or TBA sections).
    NoDays,
    /// Days are known but the time text did not parse.
    NoTime,
    /// End time is not after start time.
    InvalidTimeRange,
    /// Meetings on days without a grid column.
    WeekendDays { days: Days },
}

/// A record, or part of one, that has no place on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unscheduled<'a> {
    #[serde(rename = "sourceRecord")]
    pub record_index: usize,
    pub reason: UnscheduledReason,
    #[serde(skip)]
    pub record: &'a CourseRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub total_records: usize,
    pub scheduled_records: usize,
    pub unscheduled_records: usize,
    pub block_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout<'a> {
    /// Blocks in weekday order, then in placement order within the day.
    pub blocks: Vec<RenderBlock<'a>>,
    pub unscheduled: Vec<Unscheduled<'a>>,
    record_count: usize,
}

impl<'a> Layout<'a> {
    pub fn blocks_for(&self, day: Day) -> impl Iterator<Item = &RenderBlock<'a>> {
        self.blocks.iter().filter(move |block| block.day == day)
    }

    pub fn summary(&self) -> LayoutSummary {
        let mut scheduled = vec![false; self.record_count];
        for block in &self.blocks {
            scheduled[block.record_index] = true;
        }
        let scheduled_records = scheduled.iter().filter(|s| **s).count();
        LayoutSummary {
            total_records: self.record_count,
            scheduled_records,
            unscheduled_records: self.record_count - scheduled_records,
            block_count: self.blocks.len(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    index: usize,
    record: &'a CourseRecord,
    start: u16,
    end: u16,
}

/// Places every weekday meeting of `records` on the calendar grid.
///
/// Each day is laid out independently: blocks are sorted by start, end, CRN and
/// input position, swept into transitively-overlapping groups, and coloured
/// greedily so intersecting blocks never share a column. Output is fully
/// determined by the input order and `config`.
pub fn layout<'a>(records: &'a [CourseRecord], config: &LayoutConfig) -> Layout<'a> {
    let mut per_day: [Vec<Candidate<'a>>; 5] = Default::default();
    let mut unscheduled = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let mut skip = |reason| {
            unscheduled.push(Unscheduled {
                record_index: index,
                reason,
                record,
            })
        };
        if record.days.is_empty() {
            skip(UnscheduledReason::NoDays);
            continue;
        }
        let Some(range) = record.time_range() else {
            skip(UnscheduledReason::NoTime);
            continue;
        };
        if range.end <= range.start {
            skip(UnscheduledReason::InvalidTimeRange);
            continue;
        }
        let weekend = record.days.weekend();
        if !weekend.is_empty() {
            skip(UnscheduledReason::WeekendDays { days: weekend });
        }
        for (slot, day) in Day::WEEKDAYS.iter().enumerate() {
            if record.days.contains(*day) {
                per_day[slot].push(Candidate {
                    index,
                    record,
                    start: range.start,
                    end: range.end,
                });
            }
        }
    }

    let mut blocks = Vec::new();
    for (day, mut candidates) in Day::WEEKDAYS.into_iter().zip(per_day) {
        candidates.sort_by(placement_order);
        for group in overlap_groups(&candidates) {
            let members = &candidates[group];
            let (columns, column_count) = assign_columns(members);
            let width_percent = 100.0 / column_count as f64;
            for (candidate, column) in members.iter().zip(columns) {
                blocks.push(RenderBlock {
                    day,
                    start_minute: candidate.start,
                    end_minute: candidate.end,
                    top: (f64::from(candidate.start) - f64::from(config.day_start_minute))
                        * config.pixels_per_minute,
                    height: f64::from(candidate.end - candidate.start) * config.pixels_per_minute,
                    column,
                    column_count,
                    left_percent: column as f64 * width_percent,
                    width_percent,
                    clipped: candidate.start < config.day_start_minute
                        || candidate.end > config.day_end_minute,
                    record_index: candidate.index,
                    record: candidate.record,
                });
            }
        }
    }

    Layout {
        blocks,
        unscheduled,
        record_count: records.len(),
    }
}

fn placement_order(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    a.start
        .cmp(&b.start)
        .then(a.end.cmp(&b.end))
        .then_with(|| a.record.crn.cmp(&b.record.crn))
        .then(a.index.cmp(&b.index))
}

/// Splits start-sorted candidates into connected overlap groups.
///
/// A candidate joins the open group when it starts before the furthest end
/// seen in that group, which links chains like A-B-C even if A and C are
/// disjoint.
fn overlap_groups(sorted: &[Candidate<'_>]) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut group_start = 0;
    let mut reach = 0;
    for (i, candidate) in sorted.iter().enumerate() {
        if i == 0 {
            reach = candidate.end;
            continue;
        }
        if candidate.start >= reach {
            groups.push(group_start..i);
            group_start = i;
            reach = candidate.end;
        } else {
            reach = reach.max(candidate.end);
        }
    }
    if !sorted.is_empty() {
        groups.push(group_start..sorted.len());
    }
    groups
}

/// Greedy interval colouring over a start-sorted group.
///
/// Blocks arrive in start order, so a column is free exactly when its most
/// recent occupant has ended.
fn assign_columns(group: &[Candidate<'_>]) -> (Vec<usize>, usize) {
    let mut column_ends: Vec<u16> = Vec::new();
    let mut columns = Vec::with_capacity(group.len());
    for candidate in group {
        match column_ends.iter().position(|end| *end <= candidate.start) {
            Some(column) => {
                column_ends[column] = candidate.end;
                columns.push(column);
            }
            None => {
                column_ends.push(candidate.end);
                columns.push(column_ends.len() - 1);
            }
        }
    }
    (columns, column_ends.len().max(1))
}
