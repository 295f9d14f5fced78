//! CLI definitions for container-build and container-mirror
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Args, Parser};
use std::path::PathBuf;

/// Flags shared by both binaries
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Repository root (contains the container directories and git tags)
    #[arg(long, env = "REPO_ROOT", default_value = ".")]
    pub repo_root: PathBuf,

    /// Config file (default: <repo-root>/container-builder.yaml if present)
    #[arg(long, env = "CONTAINER_BUILDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "container-build",
    version,
    about = "Build the container named by the latest git tag and push it to every remote",
    long_about = "Reads the most recent <container>-<version> git tag, logs into each remote \
                  (Azure ACR, AWS ECR or Dockerhub) with credentials from the environment, \
                  builds dockerfiles/<container> and pushes <remote>/<container>:<version>."
)]
pub struct BuildCli {
    /// Directory for temporary files (registry login output)
    #[arg(long, required = true)]
    pub tempdir: PathBuf,

    /// Registries to push to
    #[arg(long, required = true, num_args = 0..)]
    pub remotes: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "container-mirror",
    version,
    about = "Copy every tagged container from one registry to another"
)]
pub struct MirrorCli {
    /// Registry to pull from
    #[arg(long, required = true)]
    pub source: String,

    /// Registry to push to
    #[arg(long, required = true)]
    pub destination: String,

    /// Keep mirroring after a container fails and report all failures at the end
    #[arg(long)]
    pub keep_going: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}
