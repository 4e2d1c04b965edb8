#![allow(dead_code)]

use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(schedule_logging::initialize_for_tests);
}

/// One listing row; cells default to a typical open section.
pub struct Row {
    pub class: &'static str,
    pub status: &'static str,
    pub crn: String,
    pub subject: String,
    pub section: &'static str,
    pub title: &'static str,
    pub credits: &'static str,
    pub instructor: &'static str,
    pub location: &'static str,
    pub day_time: String,
    pub dates: &'static str,
}

impl Row {
    pub fn new(crn: &str, days: &str, time: &str) -> Self {
        Self {
            class: "tableRowDDFont crseRow1",
            status: "OPEN",
            crn: crn.to_string(),
            subject: r#"<span style="font-weight:bold;">GEOG</span> <a href="/course?id=1001"><span>1001</span></a>"#
                .to_string(),
            section: "10",
            title: "Introduction to  Human Geography",
            credits: "3.00",
            instructor: "Smith, J",
            location: "<a href='/map'>MON</a> 114",
            day_time: format!("{days}<br>{time}"),
            dates: "01/12/26 - 04/27/26",
        }
    }

    pub fn html(&self) -> String {
        format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            self.class,
            self.status,
            self.crn,
            self.subject,
            self.section,
            self.title,
            self.credits,
            self.instructor,
            self.location,
            self.day_time,
            self.dates,
        )
    }
}

/// A listing page with the given rows and `goToPage` links up to `pages`.
pub fn listing_page(rows: &[Row], pages: u32) -> String {
    let body: String = rows.iter().map(Row::html).collect();
    let pager: String = (2..=pages)
        .map(|page| format!("<a href=\"javascript:goToPage('{page}')\">{page}</a> "))
        .collect();
    format!(
        "<html><body><div class=\"pager\">{pager}</div>\
         <table class=\"courseListing basicTable\"><tbody>{body}</tbody></table>\
         </body></html>"
    )
}
