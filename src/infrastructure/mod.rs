//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - Child processes (docker, aws, git)
//! - Git tags
//! - Repository directory layout
//! - Registry logins and AWS ECR repositories

pub mod command;
pub mod ecr;
pub mod git;
pub mod layout;
pub mod registry;

// Re-export commonly used types
pub use command::{CommandOutput, CommandRunner, CommandSpec, ProcessRunner};
pub use ecr::EcrClient;
pub use git::GitClient;
pub use layout::RepositoryLayout;
pub use registry::{AwsEnv, RegistryAuthenticator, RegistryCredentials, RegistrySession};
