// src/lib.rs
pub mod aggregator;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod orchestrator;
pub mod registry;
pub mod render;
pub mod scanner;
pub mod schema;

pub use aggregator::RecordAggregator;
pub use config::{AppConfig, ConfigError};
pub use error::{ScanError, ScanResult};
pub use extract::{extract, FieldExtractor};
pub use models::*;
pub use orchestrator::{scan_once, Orchestrator, ScanReport};
pub use render::{render, RenderOptions, SortState, TableRenderer, TableView};
