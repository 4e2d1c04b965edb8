//! Optional RON settings file; command-line flags take precedence.

use std::fs;
use std::path::Path;

use anyhow::Context;
use schedule_core::LayoutConfig;
use schedule_engine::{FetchSettings, DEFAULT_LISTING_URL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub layout: LayoutConfig,
    pub fetch: FetchSettings,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListingConfig {
    pub base_url: String,
    pub campus: String,
    pub term: Option<String>,
    pub subject: Option<String>,
    pub max_pages: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LISTING_URL.to_string(),
            campus: "1".to_string(),
            term: None,
            subject: None,
            max_pages: 50,
        }
    }
}

pub(crate) fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    parse(&content).with_context(|| format!("parsing config file {}", path.display()))
}

fn parse(content: &str) -> anyhow::Result<AppConfig> {
    Ok(ron::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("()").unwrap(), AppConfig::default());
    }

    #[test]
    fn sections_override_defaults_independently() {
        let config = parse(
            r#"(
                layout: (dayStartMinute: 480, pixelsPerMinute: 1.5),
                fetch: (request_timeout: 12.5, max_bytes: 1024),
                listing: (term: Some("202601"), subject: Some("GEOG"), max_pages: 5),
            )"#,
        )
        .unwrap();

        assert_eq!(config.layout.day_start_minute, 480);
        assert_eq!(config.layout.day_end_minute, 1260);
        assert_eq!(config.layout.pixels_per_minute, 1.5);
        assert_eq!(config.fetch.request_timeout, Duration::from_millis(12_500));
        assert_eq!(config.fetch.max_bytes, 1024);
        assert_eq!(config.fetch.redirect_limit, 5);
        assert_eq!(config.listing.term.as_deref(), Some("202601"));
        assert_eq!(config.listing.subject.as_deref(), Some("GEOG"));
        assert_eq!(config.listing.campus, "1");
        assert_eq!(config.listing.max_pages, 5);
    }

    #[test]
    fn load_reports_the_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("schedule.ron");
        fs::write(&path, "(layout: (dayStartMinute: \"nine\"))").unwrap();

        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("schedule.ron"), "{err:#}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(load(&temp.path().join("absent.ron")).is_err());
    }
}
