//! Tag domain types
//!
//! A git tag `<container>-<version>` names the container to build and the
//! version to publish it under.

use std::fmt;

use crate::error::{InvalidTag, TagError};

/// Container name and version parsed from a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    /// Lowercased container name (may contain a `namespace/` prefix)
    pub name: String,
    /// Version as written in the tag, e.g. `v1.9`
    pub version: String,
}

impl ContainerRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse `<container>-<version>`; exactly one `-` is allowed
    pub fn parse(tag: &str) -> Result<Self, TagError> {
        let parts: Vec<&str> = tag.split('-').collect();
        match parts.as_slice() {
            [name, version] => Ok(Self::new(name.to_lowercase(), *version)),
            _ => Err(TagError::Format {
                tag: tag.to_string(),
            }),
        }
    }

    /// Full image reference of this container in `registry`
    pub fn image(&self, registry: &str) -> String {
        image_reference(registry, &self.name, &self.version)
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

/// `<registry>/<container>:<version>` with leading/trailing `/` stripped
///
/// An empty registry yields a bare `<container>:<version>`.
pub fn image_reference(registry: &str, container: &str, version: &str) -> String {
    format!("{}/{}:{}", registry, container, version)
        .trim_matches('/')
        .to_string()
}

/// Split `namespace/container` into its two segments
pub fn split_namespace(name: &str) -> Result<(&str, &str), TagError> {
    let segments: Vec<&str> = name.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        [namespace, container] => Ok((*namespace, *container)),
        _ => Err(TagError::MalformedNamespace {
            name: name.to_string(),
        }),
    }
}

/// Versions must start with a literal `v`
pub fn check_version_prefix(version: &str) -> Result<(), InvalidTag> {
    if version.starts_with('v') {
        Ok(())
    } else {
        Err(InvalidTag::VersionPrefix {
            version: version.to_string(),
        })
    }
}

/// False when a version has more than three dot components and the extra
/// one is not a release candidate marker (`v1.2.3.rc1` is fine, `v1.2.3.4` is not)
pub fn follows_semver_guideline(version: &str) -> bool {
    let components: Vec<&str> = version.split('.').collect();
    match components.last() {
        Some(last) if components.len() > 3 => last.starts_with("rc"),
        _ => true,
    }
}
