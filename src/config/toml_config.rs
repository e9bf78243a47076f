use crate::domain::model::ToolSet;
use crate::utils::error::{Result, TicketError};
use crate::utils::validation::{validate_tools, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "ticket-filter.toml";

/// Project configuration, e.g.
///
/// ```toml
/// [ticket]
/// tools = "bz, gh"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketConfig {
    #[serde(default)]
    pub ticket: TicketSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketSection {
    /// Comma separated list of ticket tools used by this project.
    #[serde(default)]
    pub tools: String,
}

impl TicketConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given; otherwise the default file if it exists,
    /// falling back to an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading ticket config from {}", path.display());
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!("Loading ticket config from {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                tracing::debug!("No {} found, no ticket tools configured", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| TicketError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn tools(&self) -> ToolSet {
        ToolSet::from_comma_separated(&self.ticket.tools)
    }
}

impl Validate for TicketConfig {
    fn validate(&self) -> Result<()> {
        validate_tools("ticket.tools", self.tools().names())
    }
}
