//! `schedule`: scrape a course listing and lay it out as a weekly calendar.

mod config;
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{SecondsFormat, Utc};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use schedule_core::{layout, LayoutConfig};
use schedule_engine::{
    decode_html, export_schedule, extract, harvest_blocking, ExportOptions, Extraction,
    HarvestSettings, ListingQuery, ListingSource, ReqwestFetcher, Semester, TermId,
};
use schedule_logging::{
    schedule_debug, schedule_info, schedule_warn, LogDestination, DEFAULT_LOG_FILE,
};

use crate::config::AppConfig;
use crate::report::LogSink;

/// Scrape a course schedule listing and lay it out as a weekly calendar.
#[derive(Debug, Parser)]
#[command(name = "schedule", version)]
struct Cli {
    /// Verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// RON settings file with `layout`, `fetch` and `listing` sections
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Department code, e.g. GEOG
    #[arg(long)]
    subject: Option<String>,

    /// Campus id
    #[arg(long)]
    campus: Option<String>,

    /// Term id, e.g. 202601
    #[arg(long, conflicts_with_all = ["year", "semester"])]
    term: Option<String>,

    /// Term year, combined with --semester
    #[arg(long, requires = "semester")]
    year: Option<u16>,

    /// spring, summer or fall (or 01/06/08)
    #[arg(long, requires = "year")]
    semester: Option<Semester>,

    /// Listing endpoint
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Read saved listing pages (in page order) instead of fetching
    #[arg(long = "html-file", value_name = "PATH")]
    html_files: Vec<PathBuf>,

    /// Upper bound on pages fetched
    #[arg(long)]
    max_pages: Option<u32>,

    #[arg(short, long, default_value = "schedule_out")]
    output_dir: PathBuf,

    /// Skip writing layout.json
    #[arg(long)]
    no_layout_file: bool,

    /// Also log to a file (default ./schedule.log)
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = DEFAULT_LOG_FILE)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// File settings with command-line overrides applied.
    fn settings(&self) -> anyhow::Result<AppConfig> {
        let mut settings = match &self.config {
            Some(path) => config::load(path)?,
            None => AppConfig::default(),
        };
        let listing = &mut settings.listing;
        if let Some(subject) = &self.subject {
            listing.subject = Some(subject.clone());
        }
        if let Some(campus) = &self.campus {
            listing.campus = campus.clone();
        }
        if let Some(term) = &self.term {
            listing.term = Some(term.clone());
        }
        if let (Some(year), Some(semester)) = (self.year, self.semester) {
            listing.term = Some(TermId::new(year, semester).to_string());
        }
        if let Some(base_url) = &self.base_url {
            listing.base_url = base_url.clone();
        }
        if let Some(max_pages) = self.max_pages {
            listing.max_pages = max_pages;
        }
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    schedule_logging::initialize(destination, cli.log_level());
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = cli.settings()?;
    settings
        .layout
        .validate()
        .context("invalid layout configuration")?;

    let (extraction, listing_url) = if cli.html_files.is_empty() {
        let query = listing_query(&settings)?;
        let url = query.url()?.to_string();
        (fetch_listing(query, &settings)?, Some(url))
    } else {
        (read_saved_pages(&cli.html_files)?, None)
    };

    for warning in &extraction.warnings {
        schedule_warn!("{}", warning);
    }
    if extraction.records.is_empty() {
        eprint!("{}", report::no_courses_hint(listing_url.as_deref()));
    }

    write_outputs(cli, &extraction, &settings.layout)
}

fn listing_query(settings: &AppConfig) -> anyhow::Result<ListingQuery> {
    let listing = &settings.listing;
    let Some(subject) = listing.subject.as_deref() else {
        bail!("--subject is required unless --html-file is given");
    };
    let Some(term) = listing.term.as_deref() else {
        bail!("--term (or --year with --semester) is required unless --html-file is given");
    };
    let query = ListingQuery::new(listing.campus.clone(), term, subject)
        .context("invalid listing query")?
        .with_base_url(listing.base_url.clone());
    query.validate().context("invalid listing query")?;
    Ok(query)
}

fn fetch_listing(query: ListingQuery, settings: &AppConfig) -> anyhow::Result<Extraction> {
    let source = ListingSource::new(ReqwestFetcher::new(settings.fetch.clone()), query);
    schedule_info!(
        "fetching {} {} (term {}, campus {})",
        source.query().base_url,
        source.query().subject,
        source.query().term,
        source.query().campus
    );
    let harvest_settings = HarvestSettings {
        max_pages: settings.listing.max_pages,
    };
    harvest_blocking(&source, &LogSink, &harvest_settings).context("starting async runtime")
}

fn read_saved_pages(paths: &[PathBuf]) -> anyhow::Result<Extraction> {
    let mut pages = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let decoded =
            decode_html(&bytes, None).with_context(|| format!("decoding {}", path.display()))?;
        schedule_debug!("{} decoded as {}", path.display(), decoded.encoding_label);
        pages.push(decoded.html);
    }
    schedule_info!("extracting {} saved page(s)", pages.len());
    Ok(extract(&pages))
}

fn write_outputs(
    cli: &Cli,
    extraction: &Extraction,
    layout_config: &LayoutConfig,
) -> anyhow::Result<()> {
    let grid = layout(&extraction.records, layout_config);
    let summary = grid.summary();
    schedule_debug!(
        "layout: {} blocks, {} scheduled, {} unscheduled",
        summary.block_count,
        summary.scheduled_records,
        summary.unscheduled_records
    );

    let options = ExportOptions {
        layout_filename: if cli.no_layout_file {
            None
        } else {
            ExportOptions::default().layout_filename
        },
        generated_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ..ExportOptions::default()
    };
    let export = export_schedule(
        &cli.output_dir,
        extraction,
        &grid,
        layout_config,
        &options,
    )
    .with_context(|| format!("writing results to {}", cli.output_dir.display()))?;

    print!(
        "{}",
        report::render_summary(&extraction.records, &grid, &export)
    );
    print!("{}", report::render_shared_rooms(&extraction.records));
    Ok(())
}
