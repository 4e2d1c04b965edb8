use std::path::{Path, PathBuf};

use schedule_core::{CourseRecord, Layout, LayoutConfig, LayoutSummary, RenderBlock, Unscheduled};
use schedule_logging::schedule_info;
use serde::Serialize;

use crate::extract::Extraction;
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub records_filename: String,
    /// `None` skips the layout file.
    pub layout_filename: Option<String>,
    /// RFC 3339 timestamp stamped into every envelope.
    pub generated_utc: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            records_filename: "courses.json".to_string(),
            layout_filename: Some("layout.json".to_string()),
            generated_utc: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub record_count: usize,
    pub block_count: usize,
    pub records_path: PathBuf,
    pub layout_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordsEnvelope<'a> {
    generated_utc: &'a str,
    record_count: usize,
    pages_parsed: u32,
    warnings: Vec<String>,
    records: &'a [CourseRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutEnvelope<'a, 'r> {
    generated_utc: &'a str,
    config: &'a LayoutConfig,
    summary: LayoutSummary,
    blocks: &'a [RenderBlock<'r>],
    unscheduled: &'a [Unscheduled<'r>],
}

fn records_envelope<'a>(extraction: &'a Extraction, generated_utc: &'a str) -> RecordsEnvelope<'a> {
    RecordsEnvelope {
        generated_utc,
        record_count: extraction.records.len(),
        pages_parsed: extraction.pages_parsed,
        warnings: extraction.warning_messages(),
        records: &extraction.records,
    }
}

/// The records envelope as pretty JSON, without touching the filesystem.
pub fn records_to_json(extraction: &Extraction, generated_utc: &str) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&records_envelope(
        extraction,
        generated_utc,
    ))?)
}

/// Writes the records file and, when configured, the layout file into
/// `output_dir`. Block `sourceRecord` values index into the exported records.
pub fn export_schedule(
    output_dir: &Path,
    extraction: &Extraction,
    layout: &Layout<'_>,
    config: &LayoutConfig,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());

    let records_path = writer.write_json(
        &options.records_filename,
        &records_envelope(extraction, &options.generated_utc),
    )?;
    schedule_info!(
        "wrote {} records to {}",
        extraction.records.len(),
        records_path.display()
    );

    let layout_path = match &options.layout_filename {
        Some(filename) => {
            let envelope = LayoutEnvelope {
                generated_utc: &options.generated_utc,
                config,
                summary: layout.summary(),
                blocks: &layout.blocks,
                unscheduled: &layout.unscheduled,
            };
            let path = writer.write_json(filename, &envelope)?;
            schedule_info!("wrote {} blocks to {}", layout.blocks.len(), path.display());
            Some(path)
        }
        None => None,
    };

    Ok(ExportSummary {
        record_count: extraction.records.len(),
        block_count: layout.blocks.len(),
        records_path,
        layout_path,
    })
}
