use schedule_core::{format_minutes, parse_clock, parse_time_range, TimeRange};

#[test]
fn clock_times_convert_to_minutes() {
    assert_eq!(parse_clock("02:20PM"), Some(860));
    assert_eq!(parse_clock("12:00AM"), Some(0));
    assert_eq!(parse_clock("12:00PM"), Some(720));
    assert_eq!(parse_clock("09:35AM"), Some(9 * 60 + 35));
    assert_eq!(parse_clock("11:59PM"), Some(23 * 60 + 59));
    assert_eq!(parse_clock("7:10pm"), Some(19 * 60 + 10));
}

#[test]
fn every_valid_clock_matches_reference() {
    for hour in 1..=12u16 {
        for minute in [0u16, 15, 30, 59] {
            for (suffix, pm) in [("AM", false), ("PM", true)] {
                let text = format!("{hour:02}:{minute:02}{suffix}");
                let expected = hour % 12 * 60 + minute + if pm { 720 } else { 0 };
                assert_eq!(parse_clock(&text), Some(expected), "{text}");
            }
        }
    }
}

#[test]
fn malformed_clocks_are_rejected() {
    for text in ["", "TBD", "13:00PM", "00:30AM", "10:60AM", "1000AM", "10:00", "10:00XM"] {
        assert_eq!(parse_clock(text), None, "{text:?}");
    }
}

#[test]
fn ranges_accept_dash_like_separators() {
    let expected = Some(TimeRange::new(860, 935));
    assert_eq!(parse_time_range("02:20PM - 03:35PM"), expected);
    assert_eq!(parse_time_range("02:20PM-03:35PM"), expected);
    assert_eq!(parse_time_range("02:20PM \u{2013} 03:35PM"), expected);
}

#[test]
fn unparseable_ranges_are_none() {
    assert_eq!(parse_time_range("TBA"), None);
    assert_eq!(parse_time_range("ARR 02:20PM - 03:35PM"), None);
    assert_eq!(parse_time_range("02:20PM"), None);
    assert_eq!(parse_time_range("02:20PM - 13:35PM"), None);
}

#[test]
fn half_open_overlap() {
    let a = TimeRange::new(540, 600);
    assert!(a.overlaps(TimeRange::new(599, 650)));
    assert!(!a.overlaps(TimeRange::new(600, 650)));
    assert!(!TimeRange::new(600, 650).overlaps(a));
    assert_eq!(a.duration(), 60);
}

#[test]
fn minutes_format_for_display() {
    assert_eq!(format_minutes(0), "12:00 AM");
    assert_eq!(format_minutes(720), "12:00 PM");
    assert_eq!(format_minutes(860), "2:20 PM");
}
