// ABOUTME: Pluggable local tool architecture for the MCP gateway
// ABOUTME: Tool trait, registry, execution context, argument helpers, and implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Execution context shared by all tools
pub mod context;
/// Tool implementations
pub mod implementations;
/// Argument accessors
pub mod params;
/// Tool registry
pub mod registry;
/// Tool results
pub mod result;
/// Tool trait and capabilities
pub mod traits;

pub use context::ToolContext;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
