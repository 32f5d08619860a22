use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::source::SourceFormat;

#[derive(Parser, Debug)]
#[command(name = "retail-directory")]
#[command(about = "Browse and search a retailer directory in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Retailer list to load (file path or http(s) URL)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Format of the retailer list
    #[arg(short, long)]
    pub format: Option<SourceFormat>,

    /// Retailers per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Render every page on the UI thread instead of pre-rendering
    #[arg(long)]
    pub no_background: bool,

    /// Order retailers by city priority after loading
    #[arg(long)]
    pub sort_by_city: bool,

    /// Log file path
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Print the first page as JSON and exit
    #[arg(long)]
    pub dump: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(source) = &self.source {
            config.source.location = source.clone();
        }
        if let Some(format) = self.format {
            config.source.format = Some(format);
        }
        if let Some(page_size) = self.page_size {
            config.directory.page_size = page_size;
        }
        if self.no_background {
            config.directory.background_render = false;
        }
        if self.sort_by_city {
            config.source.sort_by_city_priority = true;
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_and_format() {
        let cli = Cli::try_parse_from([
            "retail-directory",
            "--source",
            "https://example.com/list.csv",
            "--format",
            "csv",
            "--page-size",
            "10",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.source.location, "https://example.com/list.csv");
        assert_eq!(config.source.format, Some(SourceFormat::Csv));
        assert_eq!(config.directory.page_size, 10);
        assert!(config.directory.background_render);
    }

    #[test]
    fn flags_only_override_when_set() {
        let cli = Cli::try_parse_from(["retail-directory", "--no-background", "--sort-by-city"])
            .unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(!config.directory.background_render);
        assert!(config.source.sort_by_city_priority);
        assert_eq!(config.source.location, "retailers.json");
        assert_eq!(config.directory.page_size, 20);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["retail-directory", "--format", "xml"]).is_err());
    }
}
