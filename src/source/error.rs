use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the retailer list.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read retailer file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch retailers from '{url}': {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Retailer source '{url}' responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to parse retailer JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse retailer CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Retailer CSV is missing a '{column}' column")]
    MissingColumn { column: &'static str },
}
