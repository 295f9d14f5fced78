//! Centralized error types for container-builder
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.

use std::path::PathBuf;
use thiserror::Error;

/// External command errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("command failed ({status}): {command}\n  stderr: {stderr}\n  stdout: {stdout}")]
    Execution {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to spawn {tool}: {source}. Is it installed and on PATH?")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open output file {path}: {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// Captured stderr of a failed command, if the command ran at all
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Execution { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Reasons a well-formed tag is rejected
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidTag {
    #[error(
        "Could not find directory corresponding to container {container} in {dir}. \
         Please check the container name in tag"
    )]
    UnknownContainer { container: String, dir: PathBuf },

    #[error("versions should start with v, got {version}")]
    VersionPrefix { version: String },
}

/// Tag discovery and validation errors
#[derive(Error, Debug)]
pub enum TagError {
    #[error(
        "Tag {tag} is not formatted correctly. The tags should start with container name \
         followed by version and separated by -. Example: bwa-v0.0.1"
    )]
    Format { tag: String },

    #[error("No tags found in repository")]
    NoTags,

    #[error("Could not parse commit date {value:?} of tag {tag}")]
    Timestamp { tag: String, value: String },

    #[error("Invalid tag: {0}")]
    Invalid(#[from] InvalidTag),

    #[error("Container name {name} must have the form namespace/container")]
    MalformedNamespace { name: String },

    #[error("Failed to list directories in {path}: {source}")]
    Layout {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Registry authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Required credential {var} is not set in the environment")]
    MissingCredential { var: String },

    #[error("Expected exactly one line of ECR login output in {path}, found {lines}")]
    LoginOutput { path: PathBuf, lines: usize },

    #[error("ECR login output in {path} is empty")]
    EmptyLoginCommand { path: PathBuf },

    #[error("Failed to prepare {path}: {source}")]
    Workdir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },
}
