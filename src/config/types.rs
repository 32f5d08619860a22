use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::source::SourceFormat;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Paging, search and pre-render settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Items per page (default: 20).
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Quiet period before a search is evaluated (default: 300).
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Delay between a scroll trigger and the page append (default: 300).
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,
    /// Longest wait for an idle period before a pre-render is forced (default: 2000).
    #[serde(default = "default_prefetch_timeout_ms")]
    pub prefetch_timeout_ms: u64,
    /// How many pages past the current one may be pre-rendered (default: 1).
    #[serde(default = "default_prefetch_depth")]
    pub prefetch_depth: usize,
    /// Pre-render pages on a worker thread (default: true).
    #[serde(default = "default_background_render")]
    pub background_render: bool,
}

/// Where the retailer list comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// File path or http(s) URL.
    #[serde(default = "default_source_location")]
    pub location: String,
    /// Explicit format; guessed from the extension or content when unset.
    #[serde(default)]
    pub format: Option<SourceFormat>,
    /// Order records by city tier, city and name after loading.
    #[serde(default)]
    pub sort_by_city_priority: bool,
    /// Request timeout for URL sources in seconds (default: 30).
    #[serde(default = "default_source_timeout")]
    pub timeout_seconds: u32,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Input thread tick rate in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Event loop wait; a wait that ends without input counts as idle (default: 50).
    #[serde(default = "default_idle_poll_ms")]
    pub idle_poll_ms: u64,
    /// Cards before the end of the list at which the sentinel counts as visible (default: 1).
    #[serde(default = "default_sentinel_margin")]
    pub sentinel_margin: usize,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; defaults to the user cache directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_page_size() -> usize {
    20
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_load_delay_ms() -> u64 {
    300
}

fn default_prefetch_timeout_ms() -> u64 {
    2000
}

fn default_prefetch_depth() -> usize {
    1
}

fn default_background_render() -> bool {
    true
}

fn default_source_location() -> String {
    "retailers.json".to_string()
}

fn default_source_timeout() -> u32 {
    30
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_idle_poll_ms() -> u64 {
    50
}

fn default_sentinel_margin() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DirectoryConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn prefetch_timeout(&self) -> Duration {
        Duration::from_millis(self.prefetch_timeout_ms)
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            load_delay_ms: default_load_delay_ms(),
            prefetch_timeout_ms: default_prefetch_timeout_ms(),
            prefetch_depth: default_prefetch_depth(),
            background_render: default_background_render(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_source_location(),
            format: None,
            sort_by_city_priority: false,
            timeout_seconds: default_source_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            idle_poll_ms: default_idle_poll_ms(),
            sentinel_margin: default_sentinel_margin(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
