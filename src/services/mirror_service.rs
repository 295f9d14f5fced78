//! Mirror service - copies tagged containers between registries

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::domain::ContainerRef;
use crate::infrastructure::command::{CommandRunner, CommandSpec};
use crate::infrastructure::layout::RepositoryLayout;
use crate::tools::tools::DOCKER;

/// Outcome of mirroring one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Pushed to this destination reference
    Pushed(String),
    /// Failed with this error chain
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorResult {
    pub container: ContainerRef,
    pub outcome: MirrorOutcome,
}

/// Per-container results of a mirror run, in tag order
#[derive(Debug, Clone, Default)]
pub struct MirrorReport {
    pub results: Vec<MirrorResult>,
}

impl MirrorReport {
    pub fn failures(&self) -> impl Iterator<Item = &MirrorResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, MirrorOutcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn print_summary(&self) {
        println!();
        for result in &self.results {
            match &result.outcome {
                MirrorOutcome::Pushed(image) => {
                    println!("   {} {} → {}", "✅".green(), result.container, image)
                }
                MirrorOutcome::Failed(reason) => {
                    println!("   {} {}: {}", "❌".red(), result.container, reason)
                }
            }
        }
        println!();
    }
}

/// Service for mirroring containers from one registry to another
pub struct MirrorService<R> {
    runner: R,
    layout: RepositoryLayout,
    keep_going: bool,
}

impl<R: CommandRunner> MirrorService<R> {
    pub fn new(runner: R, layout: RepositoryLayout) -> Self {
        Self {
            runner,
            layout,
            keep_going: false,
        }
    }

    /// Continue with the next container after a failure instead of aborting
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Pull every container from `source`, retag and push it to `destination`
    ///
    /// Without `keep_going` the first failure is returned as the error.
    /// With it, failures are recorded in the report and the loop continues.
    pub async fn docker_pull_and_push(
        &self,
        source: &str,
        destination: &str,
        containers: &[ContainerRef],
    ) -> Result<MirrorReport> {
        let pb = ProgressBar::new(containers.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut report = MirrorReport::default();
        for container in containers {
            pb.set_message(format!("Mirroring {}", container));

            let outcome = match self.mirror_one(source, destination, container).await {
                Ok(image) => MirrorOutcome::Pushed(image),
                Err(e) if self.keep_going => {
                    warn!("Mirroring {} failed: {:#}", container, e);
                    MirrorOutcome::Failed(format!("{:#}", e))
                }
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };

            report.results.push(MirrorResult {
                container: container.clone(),
                outcome,
            });
            pb.inc(1);
        }

        pb.finish_with_message("Mirror complete");
        Ok(report)
    }

    async fn mirror_one(
        &self,
        source: &str,
        destination: &str,
        container: &ContainerRef,
    ) -> Result<String> {
        self.layout.check_if_tag_valid(container)?;

        let source_image = container.image(source);
        let dest_image = container.image(destination);
        info!("🔁 {} → {}", source_image, dest_image);

        let pull = CommandSpec::new(DOCKER).args(["pull", source_image.as_str()]);
        self.runner
            .run(&pull)
            .await
            .with_context(|| format!("Failed to pull {}", source_image))?;

        let tag = CommandSpec::new(DOCKER).args([
            "tag",
            source_image.as_str(),
            dest_image.as_str(),
        ]);
        self.runner
            .run(&tag)
            .await
            .with_context(|| format!("Failed to tag {}", dest_image))?;

        let push = CommandSpec::new(DOCKER).args(["push", dest_image.as_str()]);
        self.runner
            .run(&push)
            .await
            .with_context(|| format!("Failed to push {}", dest_image))?;

        Ok(dest_image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CommandError, TagError};
    use crate::testing::RecordingRunner;

    fn repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bio/bwa")).unwrap();
        std::fs::create_dir_all(dir.path().join("bio/samtools")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_pull_tag_push() {
        let repo = repo();
        let runner = RecordingRunner::new();
        let report = MirrorService::new(&runner, RepositoryLayout::namespaced(repo.path()))
            .docker_pull_and_push(
                "oldreg.io",
                "newreg.io",
                &[ContainerRef::new("bio/bwa", "v0.0.1")],
            )
            .await
            .unwrap();

        assert_eq!(
            runner.commands(),
            vec![
                "docker pull oldreg.io/bio/bwa:v0.0.1",
                "docker tag oldreg.io/bio/bwa:v0.0.1 newreg.io/bio/bwa:v0.0.1",
                "docker push newreg.io/bio/bwa:v0.0.1",
            ]
        );
        assert_eq!(
            report.results[0].outcome,
            MirrorOutcome::Pushed("newreg.io/bio/bwa:v0.0.1".to_string())
        );
        assert!(!report.has_failures());
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_containers() {
        let repo = repo();
        let runner = RecordingRunner::new().fail_when("pull oldreg.io/bio/bwa", "manifest unknown");

        let err = MirrorService::new(&runner, RepositoryLayout::namespaced(repo.path()))
            .docker_pull_and_push(
                "oldreg.io",
                "newreg.io",
                &[
                    ContainerRef::new("bio/bwa", "v0.0.1"),
                    ContainerRef::new("bio/samtools", "v1.9"),
                ],
            )
            .await
            .unwrap_err();

        let cmd_err = err.downcast_ref::<CommandError>().expect("command error");
        assert_eq!(cmd_err.stderr(), Some("manifest unknown"));
        assert_eq!(runner.commands(), vec!["docker pull oldreg.io/bio/bwa:v0.0.1"]);
    }

    #[tokio::test]
    async fn test_keep_going_reports_failures() {
        let repo = repo();
        let runner = RecordingRunner::new().fail_when("pull oldreg.io/bio/bwa", "manifest unknown");

        let report = MirrorService::new(&runner, RepositoryLayout::namespaced(repo.path()))
            .keep_going(true)
            .docker_pull_and_push(
                "oldreg.io",
                "newreg.io",
                &[
                    ContainerRef::new("bio/bwa", "v0.0.1"),
                    ContainerRef::new("bio/samtools", "v1.9"),
                ],
            )
            .await
            .unwrap();

        assert!(report.has_failures());
        assert_eq!(report.failures().count(), 1);
        match &report.results[0].outcome {
            MirrorOutcome::Failed(reason) => assert!(reason.contains("manifest unknown")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            report.results[1].outcome,
            MirrorOutcome::Pushed("newreg.io/bio/samtools:v1.9".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_container_fails_validation() {
        let repo = repo();
        let runner = RecordingRunner::new();

        let err = MirrorService::new(&runner, RepositoryLayout::namespaced(repo.path()))
            .docker_pull_and_push("oldreg.io", "newreg.io", &[ContainerRef::new("bwa", "v1")])
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TagError>(),
            Some(TagError::MalformedNamespace { .. })
        ));
        assert!(runner.commands().is_empty());
    }
}
