//! Schedule core: pure course-record model and calendar layout.
mod days;
mod layout;
mod model;
mod rooms;
mod time;

pub use days::{Day, Days};
pub use layout::{
    layout, Layout, LayoutConfig, LayoutConfigError, LayoutSummary, RenderBlock, Unscheduled,
    UnscheduledReason,
};
pub use model::{
    collapse_whitespace, is_placeholder, normalize_placeholder, split_building_room,
    CourseRecord, Status, NOT_SPECIFIED,
};
pub use rooms::{shared_rooms, ScheduleStats, SharedRoom};
pub use time::{
    find_time_range, format_minutes, parse_clock, parse_time_range, TimeRange,
};
