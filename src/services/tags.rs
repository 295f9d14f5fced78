//! Tag resolution - which containers a run acts on

use anyhow::Result;
use tracing::info;

use crate::domain::ContainerRef;
use crate::error::TagError;
use crate::infrastructure::command::CommandRunner;
use crate::infrastructure::git::GitClient;

/// Turns repository tags into container references
pub struct TagResolver<R> {
    git: GitClient<R>,
}

impl<R: CommandRunner> TagResolver<R> {
    pub fn new(git: GitClient<R>) -> Self {
        Self { git }
    }

    /// The most recently committed tag, parsed
    pub async fn get_latest_tag(&self) -> Result<ContainerRef> {
        let tags = self.git.tags_by_commit_time().await?;
        let latest = tags.last().ok_or(TagError::NoTags)?;
        let container = ContainerRef::parse(&latest.name)?;
        info!("🏷️  Latest tag: {} ({})", latest.name, latest.committed);
        Ok(container)
    }

    /// Every tag, oldest first; one malformed tag fails the whole listing
    pub async fn get_containers(&self) -> Result<Vec<ContainerRef>> {
        let tags = self.git.tags_by_commit_time().await?;
        let containers = tags
            .iter()
            .map(|t| ContainerRef::parse(&t.name))
            .collect::<Result<Vec<_>, _>>()?;
        info!("🏷️  Found {} tagged container(s)", containers.len());
        Ok(containers)
    }
}
