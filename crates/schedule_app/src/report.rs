//! Console output for a finished run.

use schedule_core::{format_minutes, shared_rooms, CourseRecord, Day, Layout, ScheduleStats};
use schedule_engine::{ExportSummary, HarvestEvent, ProgressSink};
use schedule_logging::{schedule_error, schedule_info};

const RULE: &str = "======================================================================";

/// Forwards harvest progress to the log.
pub(crate) struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: HarvestEvent) {
        match event {
            HarvestEvent::PageRequested { page } => schedule_info!("requesting page {}", page),
            HarvestEvent::PageParsed { .. } => {}
            HarvestEvent::PageFailed { page, kind } => {
                schedule_error!("page {} failed: {}", page, kind)
            }
            HarvestEvent::Finished {
                pages,
                records,
                warnings,
            } => schedule_info!(
                "harvest finished: {} pages, {} records, {} warnings",
                pages,
                records,
                warnings
            ),
        }
    }
}

pub(crate) fn render_summary(
    records: &[CourseRecord],
    grid: &Layout<'_>,
    export: &ExportSummary,
) -> String {
    let stats = ScheduleStats::from_records(records);
    let summary = grid.summary();
    let per_day: Vec<String> = Day::WEEKDAYS
        .iter()
        .map(|day| format!("{} {}", day.letter(), grid.blocks_for(*day).count()))
        .collect();
    let layout_line = export
        .layout_path
        .as_ref()
        .map(|path| format!("layout:  {}\n", path.display()))
        .unwrap_or_default();

    format!(
        "{RULE}\n\
         {} courses, {} instructors\n\
         {} scheduled, {} unscheduled; blocks per day: {}\n\
         records: {}\n\
         {layout_line}{RULE}\n",
        stats.course_count,
        stats.instructor_count,
        summary.scheduled_records,
        summary.unscheduled_records,
        per_day.join(", "),
        export.records_path.display(),
    )
}

pub(crate) fn render_shared_rooms(records: &[CourseRecord]) -> String {
    let rooms = shared_rooms(records);
    if rooms.is_empty() {
        return String::new();
    }

    let mut out = String::from("Rooms with multiple courses scheduled:\n");
    for room in rooms {
        let courses: String = room
            .courses
            .iter()
            .map(|course| {
                format!(
                    "  - {:15} {:5} {:20} {}\n",
                    course.course_code(),
                    course.days.to_string(),
                    meeting_time(course),
                    course.instructor
                )
            })
            .collect();
        let clashes: String = room
            .clashes
            .iter()
            .map(|(a, b)| {
                format!(
                    "  ! {} and {} overlap\n",
                    room.courses[*a].course_code(),
                    room.courses[*b].course_code()
                )
            })
            .collect();
        out.push_str(&format!(
            "\n{} {} ({} courses):\n{courses}{clashes}",
            room.building,
            room.room,
            room.courses.len()
        ));
    }
    out
}

fn meeting_time(record: &CourseRecord) -> String {
    match record.time_range() {
        Some(range) => format!(
            "{} - {}",
            format_minutes(range.start),
            format_minutes(range.end)
        ),
        None => record.time_raw.clone(),
    }
}

pub(crate) fn no_courses_hint(listing_url: Option<&str>) -> String {
    let url_line = listing_url
        .map(|url| format!("    {url}\n"))
        .unwrap_or_default();
    format!(
        "No courses found.\n\
         The listing may require a login. Open it in a browser, save the page,\n\
         and rerun with the saved file:\n\
         {url_line}    schedule --html-file <saved page>\n"
    )
}
