use anyhow::Result;
use tracing::info;

use crate::cli::MirrorCli;
use crate::config::BuilderConfig;
use crate::infrastructure::{GitClient, ProcessRunner, RepositoryLayout};
use crate::services::{MirrorService, TagResolver};
use crate::tools::{ensure_available, tools};
use crate::ui;

/// Enumerate tagged containers → pull, retag and push each
///
/// No registry login happens here; docker must already be logged into
/// both registries.
pub async fn execute(cli: MirrorCli) -> Result<()> {
    ui::print_header("Mirror Containers");
    ensure_available(&[tools::GIT, tools::DOCKER])?;

    let repo_root = cli.common.repo_root;
    // Fail early on a bad --config
    BuilderConfig::load(cli.common.config.as_deref(), &repo_root)?;
    let runner = ProcessRunner;

    let containers = TagResolver::new(GitClient::in_dir(runner, &repo_root))
        .get_containers()
        .await?;

    info!("📥 Source: {}", cli.source);
    info!("📤 Destination: {}", cli.destination);
    println!();

    let report = MirrorService::new(runner, RepositoryLayout::namespaced(&repo_root))
        .keep_going(cli.keep_going)
        .docker_pull_and_push(&cli.source, &cli.destination, &containers)
        .await?;

    report.print_summary();

    if report.has_failures() {
        let failed = report.failures().count();
        ui::print_error(&format!(
            "{} of {} container(s) failed to mirror",
            failed,
            report.results.len()
        ));
        anyhow::bail!("{} container(s) failed to mirror", failed);
    }

    ui::print_success(&format!("Mirrored {} container(s)", report.results.len()));
    Ok(())
}
