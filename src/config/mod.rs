//! Configuration for container-builder
//!
//! Flags come from clap (with env fallbacks); the optional
//! `container-builder.yaml` at the repository root tunes the layout.

mod environment;

pub use environment::Environment;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;

/// Config file looked up in the repository root when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "container-builder.yaml";

/// Repository layout and scratch file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Directory holding one subdirectory per buildable container
    #[serde(default = "default_dockerfiles_dir")]
    pub dockerfiles_dir: PathBuf,

    /// File name (inside --tempdir) capturing `aws ecr get-login` output
    #[serde(default = "default_aws_login_output")]
    pub aws_login_output: String,
}

fn default_dockerfiles_dir() -> PathBuf {
    PathBuf::from("dockerfiles")
}

fn default_aws_login_output() -> String {
    "aws_login_output.txt".to_string()
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            dockerfiles_dir: default_dockerfiles_dir(),
            aws_login_output: default_aws_login_output(),
        }
    }
}

impl BuilderConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `<repo_root>/container-builder.yaml`
    /// is used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>, repo_root: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = repo_root.join(DEFAULT_CONFIG_FILE);
                if !candidate.exists() {
                    debug!("No {} found, using defaults", candidate.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_yaml(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.dockerfiles_dir, PathBuf::from("dockerfiles"));
        assert_eq!(config.aws_login_output, "aws_login_output.txt");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = BuilderConfig::from_yaml("dockerfiles_dir: images\n").unwrap();
        assert_eq!(config.dockerfiles_dir, PathBuf::from("images"));
        assert_eq!(config.aws_login_output, "aws_login_output.txt");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(BuilderConfig::from_yaml("").unwrap(), BuilderConfig::default());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuilderConfig::load(None, dir.path()).unwrap();
        assert_eq!(config, BuilderConfig::default());
    }

    #[test]
    fn test_load_from_repo_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "aws_login_output: ecr.txt\n",
        )
        .unwrap();
        let config = BuilderConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.aws_login_output, "ecr.txt");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = BuilderConfig::load(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "dockerfiles_dir: [unclosed\n").unwrap();
        let err = BuilderConfig::load(Some(&path), dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError { .. })
        ));
    }
}
