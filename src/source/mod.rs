//! Loading the retailer list at startup.
//!
//! The list comes from a local file or an http(s) URL, as JSON or CSV, and
//! is fetched exactly once. There is no retry: a failure is reported to the
//! caller, which decides how to degrade.

mod delimited;
mod error;
mod json;
mod priority;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SourceConfig;
use crate::retailer::Retailer;

pub use delimited::parse_csv;
pub use error::LoadError;
pub use json::parse_json;
pub use priority::{city_tier, sort_by_city_priority};

/// Encoding of the retailer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    /// Guesses the format from a file name or URL path suffix.
    pub fn from_extension(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Falls back to content sniffing: a leading `[` means JSON.
    pub fn sniff(text: &str) -> Self {
        if text.trim_start_matches('\u{feff}').trim_start().starts_with('[') {
            Self::Json
        } else {
            Self::Csv
        }
    }
}

/// Where the retailer list lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl SourceLocation {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    fn format_hint(&self) -> Option<SourceFormat> {
        match self {
            Self::File(path) => SourceFormat::from_extension(&path.to_string_lossy()),
            Self::Url(url) => SourceFormat::from_extension(url),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Records that survived parsing plus the count of dropped ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRetailers {
    pub retailers: Vec<Retailer>,
    pub dropped: usize,
}

/// Outcome of a successful load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub retailers: Vec<Retailer>,
    pub dropped: usize,
    pub format: SourceFormat,
}

/// Configured retailer source.
#[derive(Debug, Clone)]
pub struct RetailerSource {
    location: SourceLocation,
    format: Option<SourceFormat>,
    sort_by_city_priority: bool,
    timeout: Duration,
}

impl RetailerSource {
    pub fn new(location: SourceLocation) -> Self {
        Self {
            location,
            format: None,
            sort_by_city_priority: false,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self {
            location: SourceLocation::parse(&config.location),
            format: config.format,
            sort_by_city_priority: config.sort_by_city_priority,
            timeout: Duration::from_secs(u64::from(config.timeout_seconds)),
        }
    }

    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_city_priority(mut self, enabled: bool) -> Self {
        self.sort_by_city_priority = enabled;
        self
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Fetches and parses the list.
    pub async fn load(&self) -> Result<LoadReport, LoadError> {
        let text = self.fetch_text().await?;
        let format = self
            .format
            .or_else(|| self.location.format_hint())
            .unwrap_or_else(|| SourceFormat::sniff(&text));

        let ParsedRetailers {
            mut retailers,
            dropped,
        } = parse_retailers(&text, format)?;

        if self.sort_by_city_priority {
            sort_by_city_priority(&mut retailers);
        }

        if dropped > 0 {
            tracing::debug!(dropped, source = %self.location, "Skipped malformed retailer records");
        }
        tracing::info!(
            count = retailers.len(),
            format = ?format,
            source = %self.location,
            "Loaded retailers"
        );

        Ok(LoadReport {
            retailers,
            dropped,
            format,
        })
    }

    async fn fetch_text(&self) -> Result<String, LoadError> {
        match &self.location {
            SourceLocation::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Read {
                        path: path.clone(),
                        source,
                    })
            }
            SourceLocation::Url(url) => {
                let request_error = |source| LoadError::Request {
                    url: url.clone(),
                    source,
                };
                let client = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(request_error)?;
                let response = client.get(url).send().await.map_err(request_error)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                response.text().await.map_err(request_error)
            }
        }
    }
}

pub fn parse_retailers(text: &str, format: SourceFormat) -> Result<ParsedRetailers, LoadError> {
    match format {
        SourceFormat::Json => parse_json(text),
        SourceFormat::Csv => parse_csv(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parse_distinguishes_urls() {
        assert_eq!(
            SourceLocation::parse("https://example.com/retailers.json"),
            SourceLocation::Url("https://example.com/retailers.json".to_string())
        );
        assert_eq!(
            SourceLocation::parse("data/retailers.csv"),
            SourceLocation::File(PathBuf::from("data/retailers.csv"))
        );
    }

    #[test]
    fn format_from_extension_ignores_query() {
        assert_eq!(
            SourceFormat::from_extension("https://x/retailers.CSV?v=2"),
            Some(SourceFormat::Csv)
        );
        assert_eq!(SourceFormat::from_extension("retailers.json"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_extension("retailers"), None);
    }

    #[test]
    fn sniff_detects_json_arrays() {
        assert_eq!(SourceFormat::sniff("  [{\"name\": \"a\"}]"), SourceFormat::Json);
        assert_eq!(SourceFormat::sniff("name,area\n"), SourceFormat::Csv);
    }
}
