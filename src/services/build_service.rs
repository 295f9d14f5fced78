//! Build service - builds one container and pushes it to every remote

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::{ContainerRef, Remote};
use crate::infrastructure::command::{CommandRunner, CommandSpec};
use crate::infrastructure::ecr::EcrClient;
use crate::infrastructure::layout::RepositoryLayout;
use crate::infrastructure::registry::RegistrySession;
use crate::tools::tools::DOCKER;

/// Service for building and pushing tagged containers
pub struct BuildService<R> {
    runner: R,
    layout: RepositoryLayout,
}

impl<R: CommandRunner> BuildService<R> {
    pub fn new(runner: R, layout: RepositoryLayout) -> Self {
        Self { runner, layout }
    }

    /// Build `container` from its directory, then tag and push it to each
    /// remote in order
    ///
    /// The first failure stops the run; images already pushed stay pushed.
    /// Returns the pushed image references.
    pub async fn docker_build_and_push_container(
        &self,
        container: &ContainerRef,
        remotes: &[Remote],
        session: &RegistrySession,
    ) -> Result<Vec<String>> {
        self.layout.check_if_tag_valid(container)?;

        let context_dir = self.layout.container_dir(&container.name)?;
        info!("🔨 Building {} in {}", container.name, context_dir.display());
        let build = CommandSpec::new(DOCKER)
            .args(["build", "-t", container.name.as_str(), "."])
            .current_dir(&context_dir);
        self.runner
            .run(&build)
            .await
            .with_context(|| format!("Failed to build {}", container.name))?;

        let ecr = EcrClient::new(&self.runner, session.aws_env());
        let mut pushed = Vec::with_capacity(remotes.len());

        for remote in remotes {
            if remote.is_aws() {
                ecr.check_if_aws_repository_exist(&container.name)
                    .await
                    .with_context(|| {
                        format!("Failed to create ECR repository {}", container.name)
                    })?;
            }

            let image = container.image(remote.url());
            info!("📤 Pushing {}", image);

            let tag = CommandSpec::new(DOCKER).args([
                "tag",
                container.name.as_str(),
                image.as_str(),
            ]);
            self.runner
                .run(&tag)
                .await
                .with_context(|| format!("Failed to tag {}", image))?;

            let push = CommandSpec::new(DOCKER).args(["push", image.as_str()]);
            self.runner
                .run(&push)
                .await
                .with_context(|| format!("Failed to push {}", image))?;

            pushed.push(image);
        }

        Ok(pushed)
    }
}
