//! Runtime tool path resolution
//!
//! For each external tool (e.g., `docker`) we:
//! 1. Check for an environment variable `{TOOL}_BIN` (e.g., `DOCKER_BIN`)
//! 2. Fall back to PATH-based invocation if the envvar is not set
//!
//! This lets CI images pin an exact binary while keeping plain PATH lookup
//! for local runs.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Get the path to an external tool
///
/// Checks for an environment variable `{TOOL}_BIN` (uppercase tool name + "_BIN").
/// Falls back to the tool name itself if the envvar is not set, which relies on PATH.
///
/// ```rust,ignore
/// // With DOCKER_BIN="/usr/local/bin/docker"
/// assert_eq!(get_tool_path("docker"), "/usr/local/bin/docker");
/// ```
pub fn get_tool_path(tool: &str) -> String {
    let env_var = format!("{}_BIN", tool.to_uppercase().replace('-', "_"));
    env::var(&env_var).unwrap_or_else(|_| tool.to_string())
}

/// Resolve a tool to an absolute path, failing if it cannot be found
pub fn locate(tool: &str) -> Result<PathBuf> {
    let path = get_tool_path(tool);
    let resolved = which::which(&path).with_context(|| {
        format!(
            "{} not found (looked for {:?}; set {}_BIN to override)",
            tool,
            path,
            tool.to_uppercase()
        )
    })?;
    debug!("Resolved {} -> {}", tool, resolved.display());
    Ok(resolved)
}

/// Check that every tool a run needs is available before anything is executed
pub fn ensure_available(required: &[&str]) -> Result<()> {
    for tool in required {
        locate(tool)?;
    }
    Ok(())
}

/// Tool names used by the orchestrators
pub mod tools {
    pub const DOCKER: &str = "docker";
    pub const AWS: &str = "aws";
    pub const GIT: &str = "git";
}
