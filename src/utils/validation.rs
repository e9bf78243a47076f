use crate::utils::error::{TicketError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A tool name ends up on the left of `tool#id`, so it cannot carry the
/// separator itself.
pub fn validate_tool_name(field_name: &str, tool: &str) -> Result<()> {
    validate_non_empty_string(field_name, tool)?;

    if tool.contains('#') {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: tool.to_string(),
            reason: "Tool name cannot contain '#'".to_string(),
        });
    }

    if tool.chars().any(char::is_whitespace) {
        return Err(TicketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: tool.to_string(),
            reason: "Tool name cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

pub fn validate_unique(field_name: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(TicketError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "Value is listed more than once".to_string(),
            });
        }
    }
    Ok(())
}

/// Checks a configured tool list, whichever source it came from.
pub fn validate_tools(field_name: &str, tools: &[String]) -> Result<()> {
    for tool in tools {
        validate_tool_name(field_name, tool)?;
    }
    validate_unique(field_name, tools)
}
