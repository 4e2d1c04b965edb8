use schedule_core::{shared_rooms, CourseRecord, Days, ScheduleStats, Status, NOT_SPECIFIED};

fn course(crn: &str, instructor: &str, location: (&str, &str), days: &str, time: (u16, u16)) -> CourseRecord {
    CourseRecord {
        status: Status::Open,
        crn: crn.to_string(),
        subject: "GEOG".to_string(),
        course_number: "2000".to_string(),
        section: "10".to_string(),
        title: "Room test".to_string(),
        credits: "3".to_string(),
        instructor: instructor.to_string(),
        days: Days::parse_lenient(days),
        time_start: Some(time.0),
        time_end: Some(time.1),
        time_raw: String::new(),
        date_range: NOT_SPECIFIED.to_string(),
        building: location.0.to_string(),
        room: location.1.to_string(),
    }
}

#[test]
fn rooms_with_several_courses_are_reported_in_order() {
    let records = vec![
        course("1", "Doe, J", ("MON", "114"), "MW", (540, 615)),
        course("2", "Roe, K", ("1957 E", "B12"), "TR", (600, 675)),
        course("3", "Doe, J", ("MON", "114"), "W", (600, 660)),
        course("4", "Poe, E", ("1957 E", "B12"), "TR", (700, 775)),
        course("5", "Poe, E", ("1957 E", "213"), "F", (700, 775)),
        course("6", "Poe, E", (NOT_SPECIFIED, NOT_SPECIFIED), "F", (700, 775)),
        course("7", "Poe, E", (NOT_SPECIFIED, NOT_SPECIFIED), "F", (700, 775)),
    ];

    let rooms = shared_rooms(&records);
    let keys: Vec<_> = rooms
        .iter()
        .map(|r| (r.building.as_str(), r.room.as_str(), r.courses.len()))
        .collect();
    assert_eq!(keys, vec![("1957 E", "B12", 2), ("MON", "114", 2)]);

    assert!(rooms[0].clashes.is_empty());
    assert_eq!(rooms[1].clashes, vec![(0, 1)]);
}

#[test]
fn stats_count_distinct_named_instructors() {
    let records = vec![
        course("1", "Doe, J", ("A", "1"), "M", (540, 600)),
        course("2", "Doe, J", ("A", "2"), "M", (540, 600)),
        course("3", NOT_SPECIFIED, ("A", "3"), "M", (540, 600)),
        course("4", "Roe, K", ("A", "4"), "M", (540, 600)),
    ];
    let stats = ScheduleStats::from_records(&records);
    assert_eq!(stats.course_count, 4);
    assert_eq!(stats.instructor_count, 2);
}

#[test]
fn split_placeholder_rooms_are_not_shared() {
    let (building, room) = schedule_core::split_building_room("MON TBA");
    let records = vec![
        course("1", "Doe, J", (&building, &room), "MW", (540, 615)),
        course("2", "Roe, K", (&building, &room), "MW", (540, 615)),
    ];
    assert!(shared_rooms(&records).is_empty());
}
