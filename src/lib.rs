//! Build, tag and mirror container images from git tag metadata
//!
//! A tag `<container>-<version>` selects the container to build from
//! `dockerfiles/<container>` (or, when mirroring, every tagged container)
//! and the registries are driven through the docker and aws CLIs.

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod services;
pub mod tools;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
