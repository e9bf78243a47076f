pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::manifest::{CollectionManifest, CollectionReport, ManifestSession};
pub use config::TicketConfig;
pub use core::{filter::TicketFilter, plugin::TicketPlugin};
pub use utils::error::{Result, TicketError};
