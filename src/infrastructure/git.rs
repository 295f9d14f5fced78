//! Git operations
//!
//! Lists repository tags in the order their commits were made.

use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;
use tracing::debug;

use crate::error::TagError;
use crate::infrastructure::command::{CommandRunner, CommandSpec};
use crate::tools::tools::GIT;

/// `for-each-ref` format: bare tag name, peeled commit date (annotated tags),
/// direct commit date (lightweight tags)
///
/// `strip=2` rather than `short`: a tag that shares its name with a branch
/// would otherwise be listed as `tags/<name>`.
const TAG_FORMAT: &str = "--format=%(refname:strip=2)%09%(*committerdate:iso-strict)%09%(committerdate:iso-strict)";

/// A tag and the committer date of the commit it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub committed: DateTime<FixedOffset>,
}

/// Client for git operations
pub struct GitClient<R> {
    runner: R,
    /// Working directory for git commands
    working_dir: PathBuf,
}

impl<R: CommandRunner> GitClient<R> {
    /// Create a git client for a specific directory
    pub fn in_dir(runner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            working_dir: path.into(),
        }
    }

    /// All tags, oldest commit first
    ///
    /// Tags on the same commit keep git's listing order (by refname).
    pub async fn tags_by_commit_time(&self) -> anyhow::Result<Vec<TagRef>> {
        let cmd = CommandSpec::new(GIT)
            .args(["for-each-ref", TAG_FORMAT, "refs/tags"])
            .current_dir(&self.working_dir);

        let output = self.runner.run(&cmd).await?;
        let mut tags = parse_tag_refs(&output.stdout)?;
        // sort_by_key is stable
        tags.sort_by_key(|t| t.committed);

        debug!("Found {} tag(s) in {}", tags.len(), self.working_dir.display());
        Ok(tags)
    }
}

/// Parse the tab-separated `for-each-ref` listing
pub fn parse_tag_refs(listing: &str) -> Result<Vec<TagRef>, TagError> {
    listing
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or_default().to_string();
            let peeled = fields.next().unwrap_or_default();
            let direct = fields.next().unwrap_or_default();
            let date = if peeled.is_empty() { direct } else { peeled };

            let committed =
                DateTime::parse_from_rfc3339(date).map_err(|_| TagError::Timestamp {
                    tag: name.clone(),
                    value: date.to_string(),
                })?;
            Ok(TagRef { name, committed })
        })
        .collect()
}
