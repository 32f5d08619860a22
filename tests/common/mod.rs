//! Shared test fixtures.

#![allow(dead_code, unused_imports)]

use retail_directory::config::DirectoryConfig;
use retail_directory::directory::{Directory, RenderWorker, RenderedPage};
use retail_directory::retailer::Retailer;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use tempfile::TempDir;

/// Upper bound for waiting on the render worker.
pub const WORKER_WAIT: Duration = Duration::from_secs(2);

/// `count` retailers; the first `in_chennai` have city Chennai, the rest Bangalore.
pub fn retailers(count: usize, in_chennai: usize) -> Vec<Retailer> {
    (0..count)
        .map(|i| {
            let city = if i < in_chennai { "Chennai" } else { "Bangalore" };
            Retailer::new(format!("Retailer {i:02}"), format!("AREA {}", i % 7))
                .with_city(city)
                .with_contact(&format!("98400{i:05}"))
        })
        .collect()
}

/// Directory with a live render worker whose pages arrive on the receiver.
pub fn directory_with_worker(settings: &DirectoryConfig) -> (Directory, Receiver<RenderedPage>) {
    let (tx, rx) = mpsc::channel();
    let worker = RenderWorker::spawn(move |page| {
        let _ = tx.send(page);
    })
    .expect("Failed to spawn render worker");
    (Directory::new(settings, Some(worker)), rx)
}

pub fn directory_without_worker(settings: &DirectoryConfig) -> Directory {
    Directory::new(settings, None)
}

/// Write `content` to `name` in a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (temp_dir, path)
}

pub const SAMPLE_JSON: &str = r#"[
  {"sapCode": "1001", "name": "Vision Plus", "area": "ADYAR", "city": "Chennai",
   "contact": "tel:9840012345", "contact2": "9840012345", "mapLink": "https://maps.app.goo.gl/a"},
  {"name": "Eye World", "area": "KORAMANGALA", "city": "Bangalore", "contact": "080 4123 4567"},
  {"area": "NO NAME"},
  {"name": "Clear Sight", "area": "CONNAUGHT PLACE", "city": "Delhi", "latitude": 28.63, "longitude": 77.21}
]"#;

pub const SAMPLE_CSV: &str = "SAP Code,Retailer Name,Location,city,Contact Number,Google Map Link\n\
1001,Vision Plus,ADYAR,Chennai,9840012345,https://maps.app.goo.gl/a\n\
1002,\"Optics, Lens & Co\",T NAGAR,Chennai,tel:9840099999,\n\
1003,Broken Row,ANNA NAGAR\n\
1004,Clear Sight,CONNAUGHT PLACE,Delhi,011 2345 6789,\n";
