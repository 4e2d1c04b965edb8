use pretty_assertions::assert_eq;
use schedule_engine::{ListingError, ListingQuery, Semester, TermId, DEFAULT_LISTING_URL};

#[test]
fn first_page_url_has_no_page_param() {
    let query = ListingQuery::new("1", "202601", " geog ").unwrap();
    assert_eq!(query.base_url, DEFAULT_LISTING_URL);
    assert_eq!(query.subject, "GEOG");
    assert_eq!(
        query.url().unwrap().as_str(),
        "https://my.gwu.edu/mod/pws/courses.cfm?campId=1&termId=202601&subjId=GEOG"
    );
}

#[test]
fn later_pages_carry_page_number() {
    let query = ListingQuery::new("1", "202608", "CSCI")
        .unwrap()
        .with_base_url("http://localhost:8080/list");
    assert_eq!(
        query.page_url(3).unwrap().as_str(),
        "http://localhost:8080/list?campId=1&termId=202608&subjId=CSCI&pageNum=3"
    );
    assert_eq!(query.page_url(0), Err(ListingError::PageZero));
}

#[test]
fn subject_must_be_a_short_code() {
    assert_eq!(
        ListingQuery::new("1", "202601", "  "),
        Err(ListingError::EmptySubject)
    );
    assert_eq!(
        ListingQuery::new("1", "202601", "GEOGRAPHY"),
        Err(ListingError::InvalidSubject("GEOGRAPHY".to_string()))
    );
    assert_eq!(
        ListingQuery::new("1", "202601", "G3"),
        Err(ListingError::InvalidSubject("G3".to_string()))
    );
}

#[test]
fn bad_base_url_is_rejected() {
    let query = ListingQuery::new("1", "202601", "GEOG")
        .unwrap()
        .with_base_url("not a url");
    assert!(matches!(query.validate(), Err(ListingError::InvalidBaseUrl(_))));
}

#[test]
fn term_ids_combine_year_and_semester() {
    assert_eq!(TermId::new(2026, Semester::Spring).as_str(), "202601");
    assert_eq!(TermId::new(2025, Semester::Summer).to_string(), "202506");
    assert_eq!("Fall".parse::<Semester>(), Ok(Semester::Fall));
    assert_eq!("08".parse::<Semester>(), Ok(Semester::Fall));
    assert_eq!(
        "winter".parse::<Semester>(),
        Err(ListingError::UnknownSemester("winter".to_string()))
    );
}
