use std::fs;

use pretty_assertions::assert_eq;
use schedule_core::{layout, LayoutConfig};
use schedule_engine::{
    ensure_output_dir, export_schedule, extract_page, records_to_json, AtomicFileWriter,
    ExportOptions, Extraction,
};
use serde_json::Value;
use tempfile::TempDir;

mod common;
use common::{listing_page, Row};

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("courses.json", "[]").unwrap();
    assert_eq!(first.file_name().unwrap(), "courses.json");
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = writer.write("courses.json", "[1]").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "[1]");
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("courses.json", "{}").is_err());
    assert!(!file_path.with_file_name("courses.json").exists());
}

fn sample_extraction() -> Extraction {
    let html = listing_page(
        &[
            Row::new("41234", "TR", "02:20PM - 03:35PM"),
            Row::new("41235", "", "TBA"),
        ],
        1,
    );
    let page = extract_page(&html, 1);
    Extraction {
        records: page.records,
        warnings: page.warnings,
        pages_parsed: 1,
    }
}

#[test]
fn export_writes_records_and_layout() {
    let temp = TempDir::new().unwrap();
    let extraction = sample_extraction();
    let config = LayoutConfig::default();
    let grid = layout(&extraction.records, &config);
    let options = ExportOptions {
        generated_utc: "2026-01-05T12:00:00Z".to_string(),
        ..ExportOptions::default()
    };

    let summary = export_schedule(temp.path(), &extraction, &grid, &config, &options).unwrap();
    assert_eq!(summary.record_count, 2);
    assert_eq!(summary.block_count, 2);

    let records: Value =
        serde_json::from_str(&fs::read_to_string(&summary.records_path).unwrap()).unwrap();
    assert_eq!(records["generatedUtc"], "2026-01-05T12:00:00Z");
    assert_eq!(records["recordCount"], 2);
    assert_eq!(records["records"][0]["crn"], "41234");
    assert_eq!(records["records"][0]["days"], "TR");
    assert_eq!(records["records"][0]["timeStart"], 860);
    assert_eq!(records["records"][1]["timeStart"], Value::Null);
    assert_eq!(records["records"][1]["timeRaw"], "TBA");

    let layout_path = summary.layout_path.expect("layout file written");
    let laid_out: Value = serde_json::from_str(&fs::read_to_string(layout_path).unwrap()).unwrap();
    assert_eq!(laid_out["summary"]["blockCount"], 2);
    assert_eq!(laid_out["config"]["dayStartMinute"], 540);
    let blocks = laid_out["blocks"].as_array().unwrap();
    assert_eq!(blocks[0]["day"], "T");
    assert_eq!(blocks[1]["day"], "R");
    assert!(blocks.iter().all(|block| block["sourceRecord"] == 0));
    assert_eq!(laid_out["unscheduled"][0]["sourceRecord"], 1);
    assert_eq!(laid_out["unscheduled"][0]["reason"]["kind"], "noDays");
}

#[test]
fn layout_file_is_optional() {
    let temp = TempDir::new().unwrap();
    let extraction = sample_extraction();
    let config = LayoutConfig::default();
    let grid = layout(&extraction.records, &config);
    let options = ExportOptions {
        layout_filename: None,
        ..ExportOptions::default()
    };

    let summary = export_schedule(temp.path(), &extraction, &grid, &config, &options).unwrap();
    assert!(summary.layout_path.is_none());
    assert!(!temp.path().join("layout.json").exists());
}

#[test]
fn records_json_lists_warnings() {
    let mut extraction = sample_extraction();
    extraction
        .warnings
        .push(schedule_engine::ExtractWarning::NoListingTable { page: 2 });
    let json: Value = serde_json::from_str(&records_to_json(&extraction, "t").unwrap()).unwrap();
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
    assert!(json["warnings"][0].as_str().unwrap().contains("page 2"));
}
