pub mod cli;
pub mod config;
pub mod directory;
pub mod logging;
pub mod retailer;
pub mod shutdown;
pub mod source;
pub mod ui;
