// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for the agent, credential bootstrap, gateway, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the external system they describe rather than
//! kept in a single flat file.

/// Chef agent persona text
pub mod persona;

pub use persona::CHEF_PERSONA;

/// Agent platform (Letta) constants
pub mod agent {
    /// Name of the chef agent; unique lookup key on the platform
    pub const CHEF_AGENT_NAME: &str = "chef-agent";
    /// Default chat model handle
    pub const DEFAULT_MODEL: &str = "letta/letta-free";
    /// Default embedding model handle
    pub const DEFAULT_EMBEDDING: &str = "letta/letta-free";
    /// Timezone the agent is created with
    pub const AGENT_TIMEZONE: &str = "UTC";
    /// Name the tool gateway is registered under as an MCP server
    pub const MCP_SERVER_NAME: &str = "recipellm-mcp";
    /// Tools attached to the chef agent at creation time
    pub const REQUESTED_TOOLS: &[&str] = &[
        "find_recipes_in_mealie",
        "add_recipe_to_mealie_from_url",
        "get_recipe_in_mealie",
    ];
    /// Memory block label for the human block
    pub const HUMAN_BLOCK_LABEL: &str = "human";
    /// Memory block label for the persona block
    pub const PERSONA_BLOCK_LABEL: &str = "persona";
    /// Minimum memory block capacity in characters
    pub const BLOCK_LIMIT_FLOOR: usize = 5000;
    /// Headroom added on top of the content length
    pub const BLOCK_LIMIT_MARGIN: usize = 1000;
}

/// Recipe backend (Mealie) REST surface
pub mod mealie {
    /// Identity check used to validate a bearer token
    pub const SELF_PATH: &str = "/api/users/self";
    /// Password grant endpoint returning a session token
    pub const AUTH_TOKEN_PATH: &str = "/api/auth/token";
    /// Long-lived API token creation endpoint
    pub const API_TOKENS_PATH: &str = "/api/users/api-tokens";
    /// Name the minted API token is created under
    pub const API_TOKEN_NAME: &str = "recipellm";
    /// Integration id declared for the minted API token
    pub const API_TOKEN_INTEGRATION_ID: &str = "generic";
    /// Mealie's out-of-the-box administrator login
    pub const DEFAULT_USERNAME: &str = "changeme@example.com";
    /// Mealie's out-of-the-box administrator password
    pub const DEFAULT_PASSWORD: &str = "MyPassword";
    /// Page size for recipe searches
    pub const SEARCH_PAGE_SIZE: u32 = 10;
}

/// Tool gateway (MCP) constants
pub mod gateway {
    /// MCP protocol version advertised on initialize
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
    /// Server name advertised on initialize
    pub const SERVER_NAME: &str = "recipellm-mcp-server";
    /// Prefix the proxied Mealie sub-server is mounted under
    pub const MEALIE_PROXY_PREFIX: &str = "mealie";
    /// Instructions returned to MCP clients on initialize
    pub const SERVER_INSTRUCTIONS: &str = "This server provides Mealie recipe management, \
        meal planning and notification tools. Use mealie_ prefixed tools to interact with \
        the Mealie MCP sub-server directly.";
}

/// Configuration defaults
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8000;
    /// Default bind host
    pub const HOST: &str = "0.0.0.0";
    /// Default persisted credential file
    pub const TOKEN_FILE: &str = "./data/mealie_token.json";
    /// Default command used to start the Mealie MCP sub-server
    pub const MEALIE_MCP_COMMAND: &str = "uv run src/server.py";
    /// Default working directory of the Mealie MCP sub-server
    pub const MEALIE_MCP_DIR: &str = "./mealie-mcp-server";
}

/// Service names for logging
pub mod service_names {
    /// This server
    pub const RECIPELLM_MCP_SERVER: &str = "recipellm-mcp-server";
    /// Recipe backend, used in error messages
    pub const MEALIE: &str = "Mealie API";
    /// Agent platform, used in error messages
    pub const LETTA: &str = "Letta API";
    /// Notification backend, used in error messages
    pub const NOTIFICATIONS: &str = "Notification API";
}

/// JSON-RPC error codes
pub mod json_rpc {
    /// Invalid JSON was received
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid request object
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method does not exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameters
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;
}
