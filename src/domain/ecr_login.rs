//! ECR login output adapter
//!
//! `aws ecr get-login --no-include-email` prints a single `docker login ...`
//! command line. Everything we assume about that text lives here.

use std::path::Path;

use crate::error::AuthError;

/// A login command recovered from `aws ecr get-login` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcrLogin {
    /// Whitespace-split argv, program first
    pub argv: Vec<String>,
    /// Registry host with any `https://` prefix removed
    pub registry: String,
}

impl EcrLogin {
    /// Parse the captured output; exactly one line is accepted
    pub fn parse(content: &str, source: &Path) -> Result<Self, AuthError> {
        let lines: Vec<&str> = content.lines().collect();
        let [line] = lines.as_slice() else {
            return Err(AuthError::LoginOutput {
                path: source.to_path_buf(),
                lines: lines.len(),
            });
        };

        let argv: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let registry = argv
            .last()
            .ok_or_else(|| AuthError::EmptyLoginCommand {
                path: source.to_path_buf(),
            })?
            // docker rejects a scheme in the registry name
            .replace("https://", "");

        Ok(Self { argv, registry })
    }
}
