use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{is_placeholder, CourseRecord};

/// Headline counts shown above the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub course_count: usize,
    pub instructor_count: usize,
}

impl ScheduleStats {
    pub fn from_records(records: &[CourseRecord]) -> Self {
        let instructors: BTreeSet<&str> = records
            .iter()
            .map(|record| record.instructor.as_str())
            .filter(|name| !is_placeholder(name))
            .collect();
        Self {
            course_count: records.len(),
            instructor_count: instructors.len(),
        }
    }
}

/// A room that hosts more than one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedRoom<'a> {
    pub building: String,
    pub room: String,
    pub courses: Vec<&'a CourseRecord>,
    /// Index pairs into `courses` that meet on a common day at intersecting times.
    pub clashes: Vec<(usize, usize)>,
}

/// Groups records by `(building, room)` and returns the rooms with two or more
/// courses, sorted by building then room. Records without a concrete location
/// are ignored.
pub fn shared_rooms(records: &[CourseRecord]) -> Vec<SharedRoom<'_>> {
    let mut by_room: BTreeMap<(&str, &str), Vec<&CourseRecord>> = BTreeMap::new();
    for record in records.iter().filter(|record| record.has_location()) {
        by_room
            .entry((record.building.as_str(), record.room.as_str()))
            .or_default()
            .push(record);
    }

    by_room
        .into_iter()
        .filter(|(_, courses)| courses.len() >= 2)
        .map(|((building, room), courses)| {
            let clashes = find_clashes(&courses);
            SharedRoom {
                building: building.to_string(),
                room: room.to_string(),
                courses,
                clashes,
            }
        })
        .collect()
}

fn find_clashes(courses: &[&CourseRecord]) -> Vec<(usize, usize)> {
    let mut clashes = Vec::new();
    for (i, a) in courses.iter().enumerate() {
        for (j, b) in courses.iter().enumerate().skip(i + 1) {
            let share_day = a.days.iter().any(|day| b.days.contains(day));
            let overlap = match (a.time_range(), b.time_range()) {
                (Some(x), Some(y)) => x.overlaps(y),
                _ => false,
            };
            if share_day && overlap {
                clashes.push((i, j));
            }
        }
    }
    clashes
}
