// ABOUTME: Tool-specific error types for the MCP tool gateway
// ABOUTME: Provides structured errors that integrate with the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Error Types
//!
//! Structured errors for tool registration, argument parsing, execution and
//! proxied sub-servers. Converted into `AppError` for HTTP formatting and into
//! `isError` tool results for MCP clients.

use std::error::Error;
use std::fmt;

/// Errors specific to tool operations.
#[derive(Debug, Clone)]
pub enum ToolError {
    /// Tool was not found in the gateway
    NotFound {
        /// Name of the requested tool
        tool_name: String,
    },
    /// Tool parameter validation failed
    InvalidParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Reason the parameter is invalid
        reason: String,
    },
    /// Required parameter is missing
    MissingParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the missing parameter
        parameter: String,
    },
    /// Tool execution failed
    ExecutionFailed {
        /// Name of the tool that failed
        tool_name: String,
        /// Details about the failure
        details: String,
    },
    /// Tool is already registered
    AlreadyRegistered {
        /// Name of the already-registered tool
        tool_name: String,
    },
    /// The mounted sub-server backing this tool is not reachable
    ProxyUnavailable {
        /// Name of the tool
        tool_name: String,
        /// Mount prefix of the sub-server
        prefix: String,
    },
}

impl ToolError {
    /// Create a "not found" error
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::NotFound {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "invalid parameter" error
    #[must_use]
    pub fn invalid_parameter(
        tool_name: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a "missing parameter" error
    #[must_use]
    pub fn missing_parameter(tool_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an "execution failed" error
    #[must_use]
    pub fn execution_failed(tool_name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool_name: tool_name.into(),
            details: details.into(),
        }
    }

    /// Create an "already registered" error
    #[must_use]
    pub fn already_registered(tool_name: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            tool_name: tool_name.into(),
        }
    }

    /// Create a "proxy unavailable" error
    #[must_use]
    pub fn proxy_unavailable(tool_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::ProxyUnavailable {
            tool_name: tool_name.into(),
            prefix: prefix.into(),
        }
    }

    /// Get the tool name associated with this error
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool_name }
            | Self::InvalidParameter { tool_name, .. }
            | Self::MissingParameter { tool_name, .. }
            | Self::ExecutionFailed { tool_name, .. }
            | Self::AlreadyRegistered { tool_name }
            | Self::ProxyUnavailable { tool_name, .. } => tool_name,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { tool_name } => {
                write!(f, "Tool '{tool_name}' not found")
            }
            Self::InvalidParameter {
                tool_name,
                parameter,
                reason,
            } => {
                write!(
                    f,
                    "Invalid parameter '{parameter}' for tool '{tool_name}': {reason}"
                )
            }
            Self::MissingParameter {
                tool_name,
                parameter,
            } => {
                write!(
                    f,
                    "Missing required parameter '{parameter}' for tool '{tool_name}'"
                )
            }
            Self::ExecutionFailed { tool_name, details } => {
                write!(f, "Tool '{tool_name}' execution failed: {details}")
            }
            Self::AlreadyRegistered { tool_name } => {
                write!(f, "Tool '{tool_name}' is already registered")
            }
            Self::ProxyUnavailable { tool_name, prefix } => {
                write!(
                    f,
                    "Tool '{tool_name}' is served by the '{prefix}' sub-server, which is not running"
                )
            }
        }
    }
}

impl Error for ToolError {}
