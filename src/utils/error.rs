use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicketError {
    #[error(
        "Ticket tool \"{tool}\" is not among configured tools {configured:?}, add it to the ticket tools option"
    )]
    UnknownTool {
        tool: String,
        configured: Vec<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Manifest error: {message}")]
    ManifestError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
}

impl TicketError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TicketError::UnknownTool { .. }
            | TicketError::TomlError(_)
            | TicketError::ConfigError { .. }
            | TicketError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TicketError::IoError(_)
            | TicketError::SerializationError(_)
            | TicketError::ManifestError { .. } => ErrorCategory::Input,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TicketError::UnknownTool { tool, .. } => {
                format!("Tests are annotated with ticket tool '{}' which is not configured", tool)
            }
            TicketError::IoError(e) => format!("Could not read input: {}", e),
            TicketError::SerializationError(e) => format!("Collection manifest is not valid JSON: {}", e),
            TicketError::TomlError(e) => format!("Configuration file is not valid TOML: {}", e),
            TicketError::ConfigError { message } => format!("Configuration problem: {}", message),
            TicketError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            TicketError::ManifestError { message } => format!("Collection manifest problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TicketError::UnknownTool { .. } => {
                "Add the tool to `tools` under [ticket] in the config file, or pass it with --tools"
            }
            TicketError::IoError(_) => "Check that the file exists and is readable",
            TicketError::SerializationError(_) | TicketError::ManifestError { .. } => {
                "Regenerate the collection manifest from the test run"
            }
            TicketError::TomlError(_) | TicketError::ConfigError { .. } => {
                "Check the config file syntax, e.g. `[ticket]` followed by `tools = \"gh, jira\"`"
            }
            TicketError::InvalidConfigValueError { .. } => {
                "Tool names must be unique and must not contain '#' or whitespace"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TicketError>;
