pub mod toml_config;

pub use toml_config::TicketConfig;

#[cfg(feature = "cli")]
use crate::domain::model::{FilterList, ToolSet};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_tools, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One selected node id per line
    Text,
    /// Selected and deselected items with report extras
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ticket-filter")]
#[command(about = "Select collected tests by the issue-tracker tickets they are marked with")]
pub struct CliConfig {
    /// Collection manifest (JSON) describing the collected tests
    pub manifest: PathBuf,

    /// Config file; defaults to ./ticket-filter.toml when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Filter tests by ticket (tool#id), e.g. gh#1234, can be set multiple times
    #[arg(long = "ticket", value_name = "TOOL#ID", action = clap::ArgAction::Append)]
    pub tickets: Vec<String>,

    /// Comma separated list of ticket tools, overrides the config file
    #[arg(long)]
    pub tools: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Tools from `--tools` when given, otherwise from the config file.
    /// Only the source actually used is validated.
    pub fn resolve_tools(&self, file_config: &TicketConfig) -> Result<ToolSet> {
        match &self.tools {
            Some(raw) => {
                let tools = ToolSet::from_comma_separated(raw);
                validate_tools("tools", tools.names())?;
                Ok(tools)
            }
            None => {
                file_config.validate()?;
                Ok(file_config.tools())
            }
        }
    }

    pub fn filter_list(&self) -> FilterList {
        FilterList::new(self.tickets.iter().cloned())
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("manifest", &self.manifest.to_string_lossy())?;
        if let Some(config) = &self.config {
            validate_path("config", &config.to_string_lossy())?;
        }
        if let Some(raw) = &self.tools {
            validate_tools("tools", ToolSet::from_comma_separated(raw).names())?;
        }
        Ok(())
    }
}
