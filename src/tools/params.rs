// ABOUTME: Typed accessors for tools/call argument objects
// ABOUTME: Missing or mistyped arguments become ToolError values naming the tool and parameter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::ToolError;

/// Calendar date format Mealie uses for meal plans
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A required, non-empty string argument
///
/// # Errors
///
/// Returns `MissingParameter` when absent or blank, `InvalidParameter` when not a string
pub fn required_str(args: &Value, tool: &str, key: &str) -> Result<String, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Err(ToolError::missing_parameter(tool, key)),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(ToolError::missing_parameter(tool, key))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ToolError::invalid_parameter(tool, key, "expected a string")),
    }
}

/// An optional string argument; blank strings count as absent
///
/// # Errors
///
/// Returns `InvalidParameter` when present but not a string
pub fn optional_str(args: &Value, tool: &str, key: &str) -> Result<Option<String>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::invalid_parameter(tool, key, "expected a string")),
    }
}

/// An optional boolean argument
///
/// # Errors
///
/// Returns `InvalidParameter` when present but not a boolean
pub fn optional_bool(args: &Value, tool: &str, key: &str) -> Result<Option<bool>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ToolError::invalid_parameter(tool, key, "expected a boolean")),
    }
}

/// An optional non-negative integer argument
///
/// # Errors
///
/// Returns `InvalidParameter` when present but not an integer in `u32` range
pub fn optional_u32(args: &Value, tool: &str, key: &str) -> Result<Option<u32>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| ToolError::invalid_parameter(tool, key, "expected a positive integer")),
    }
}

fn parse_date(value: String, tool: &str, key: &str) -> Result<String, ToolError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|e| ToolError::invalid_parameter(tool, key, format!("expected YYYY-MM-DD: {e}")))
}

/// A required `YYYY-MM-DD` date argument, normalized
///
/// # Errors
///
/// Returns `MissingParameter` when absent, `InvalidParameter` when not a valid date
pub fn required_date(args: &Value, tool: &str, key: &str) -> Result<String, ToolError> {
    parse_date(required_str(args, tool, key)?, tool, key)
}

/// An optional `YYYY-MM-DD` date argument, normalized
///
/// # Errors
///
/// Returns `InvalidParameter` when present but not a valid date
pub fn optional_date(args: &Value, tool: &str, key: &str) -> Result<Option<String>, ToolError> {
    optional_str(args, tool, key)?
        .map(|value| parse_date(value, tool, key))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let args = json!({"slug": "soup", "blank": " ", "n": 3});
        assert_eq!(required_str(&args, "t", "slug").unwrap(), "soup");
        assert!(matches!(
            required_str(&args, "t", "blank"),
            Err(ToolError::MissingParameter { .. })
        ));
        assert!(matches!(
            required_str(&args, "t", "n"),
            Err(ToolError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_optional_values() {
        let args = json!({"page": 2, "tags": true, "neg": -1});
        assert_eq!(optional_u32(&args, "t", "page").unwrap(), Some(2));
        assert_eq!(optional_u32(&args, "t", "missing").unwrap(), None);
        assert!(optional_u32(&args, "t", "neg").is_err());
        assert_eq!(optional_bool(&args, "t", "tags").unwrap(), Some(true));
        assert_eq!(optional_str(&args, "t", "missing").unwrap(), None);
    }

    #[test]
    fn test_dates_are_validated() {
        let args = json!({"date": " 2025-03-01 ", "bad": "03/01/2025", "feb": "2025-02-30"});
        assert_eq!(required_date(&args, "t", "date").unwrap(), "2025-03-01");
        assert!(matches!(
            required_date(&args, "t", "bad"),
            Err(ToolError::InvalidParameter { .. })
        ));
        assert!(optional_date(&args, "t", "feb").is_err());
        assert_eq!(optional_date(&args, "t", "missing").unwrap(), None);
    }
}
