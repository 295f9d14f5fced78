use anyhow::{Context, Result};
use tracing::info;

use crate::cli::BuildCli;
use crate::config::{BuilderConfig, Environment};
use crate::domain::Remote;
use crate::infrastructure::{
    GitClient, ProcessRunner, RegistryAuthenticator, RepositoryLayout,
};
use crate::services::{BuildService, TagResolver};
use crate::tools::{ensure_available, tools};
use crate::ui;

/// Resolve latest tag → log into remotes → build and push
pub async fn execute(cli: BuildCli) -> Result<()> {
    ui::print_header("Build and Push Container");

    let remotes: Vec<Remote> = cli.remotes.iter().map(|r| Remote::classify(r)).collect();
    let mut required = vec![tools::GIT, tools::DOCKER];
    if remotes.iter().any(Remote::is_aws) {
        required.push(tools::AWS);
    }
    ensure_available(&required)?;

    let repo_root = cli.common.repo_root;
    let config = BuilderConfig::load(cli.common.config.as_deref(), &repo_root)?;
    let env = Environment::from_process();
    let runner = ProcessRunner;

    let container = TagResolver::new(GitClient::in_dir(runner, &repo_root))
        .get_latest_tag()
        .await
        .context("Failed to resolve the latest tag")?;

    info!("📦 Container: {}", container);
    for remote in &remotes {
        info!("🎯 Remote: {}", remote);
    }
    println!();

    let session = RegistryAuthenticator::new(runner, &env)
        .with_aws_login_output(config.aws_login_output.clone())
        .login_remotes(&remotes, &cli.tempdir)
        .await
        .context("Registry login failed")?;
    for registry in session.ecr_registries() {
        info!("🔑 ECR registry: {}", registry);
    }

    let layout = RepositoryLayout::dockerfiles(&repo_root, &config.dockerfiles_dir);
    let pushed = BuildService::new(runner, layout)
        .docker_build_and_push_container(&container, &remotes, &session)
        .await?;

    println!();
    if pushed.is_empty() {
        ui::print_info(&format!("Built {} (no remotes to push to)", container.name));
    } else {
        ui::print_success("Images pushed successfully!");
        for image in &pushed {
            println!("   • {}", image);
        }
    }
    println!();

    Ok(())
}
