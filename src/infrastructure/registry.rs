//! Container registry authentication
//!
//! Logs docker into every remote a build pushes to. Credentials come from
//! the environment snapshot and are only ever handed to login commands.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Environment;
use crate::domain::{EcrLogin, Remote};
use crate::error::AuthError;
use crate::infrastructure::command::{CommandRunner, CommandSpec};
use crate::tools::tools::{AWS, DOCKER};

/// Username/password pair for one registry kind
#[derive(Clone)]
pub struct RegistryCredentials {
    pub username: String,
    pub password: String,
}

impl RegistryCredentials {
    /// Read `<prefix>_USER` / `<prefix>_PASSWORD`
    pub fn from_env(env: &Environment, prefix: &str) -> Result<Self, AuthError> {
        Ok(Self {
            username: env.require(&format!("{}_USER", prefix))?.to_string(),
            password: env.require(&format!("{}_PASSWORD", prefix))?.to_string(),
        })
    }
}

impl std::fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Environment overlay handed to every `aws` command of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsEnv(BTreeMap<String, String>);

impl AwsEnv {
    pub fn new(credentials: &RegistryCredentials, region: &str) -> Self {
        Self(BTreeMap::from([
            ("AWS_ACCESS_KEY_ID".to_string(), credentials.username.clone()),
            (
                "AWS_SECRET_ACCESS_KEY".to_string(),
                credentials.password.clone(),
            ),
            ("AWS_DEFAULT_REGION".to_string(), region.to_string()),
        ]))
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Apply the overlay to a command
    pub fn apply(&self, cmd: CommandSpec) -> CommandSpec {
        cmd.envs(self.0.clone())
    }
}

/// What a login pass established
#[derive(Debug, Clone, Default)]
pub struct RegistrySession {
    aws: Option<AwsEnv>,
    ecr_registries: Vec<String>,
}

impl RegistrySession {
    /// Overlay from the last AWS login, if any remote was ECR
    pub fn aws_env(&self) -> Option<&AwsEnv> {
        self.aws.as_ref()
    }

    /// ECR registry hosts reported by `aws ecr get-login`
    pub fn ecr_registries(&self) -> &[String] {
        &self.ecr_registries
    }
}

/// Logs into Azure ACR, AWS ECR and Dockerhub remotes
pub struct RegistryAuthenticator<'a, R> {
    runner: R,
    env: &'a Environment,
    aws_login_output: String,
}

impl<'a, R: CommandRunner> RegistryAuthenticator<'a, R> {
    pub fn new(runner: R, env: &'a Environment) -> Self {
        Self {
            runner,
            env,
            aws_login_output: "aws_login_output.txt".to_string(),
        }
    }

    /// File name (inside the temp dir) for captured ECR login output
    pub fn with_aws_login_output(mut self, file_name: impl Into<String>) -> Self {
        self.aws_login_output = file_name.into();
        self
    }

    /// Log into every remote in order; the first failure aborts
    pub async fn login_remotes(
        &self,
        remotes: &[Remote],
        tempdir: &Path,
    ) -> Result<RegistrySession, AuthError> {
        std::fs::create_dir_all(tempdir).map_err(|source| AuthError::Workdir {
            path: tempdir.to_path_buf(),
            source,
        })?;

        let mut session = RegistrySession::default();
        for remote in remotes {
            info!("🔐 Logging into {}", remote);
            match remote {
                Remote::Azure(url) => self.login_azure(url).await?,
                Remote::Aws(_) => {
                    let (aws, registry) = self.login_aws(remote, tempdir).await?;
                    session.aws = Some(aws);
                    session.ecr_registries.push(registry);
                }
                Remote::Dockerhub(_) => self.login_dockerhub().await?,
            }
        }

        Ok(session)
    }

    async fn login_azure(&self, registry_url: &str) -> Result<(), AuthError> {
        let creds = RegistryCredentials::from_env(self.env, "AZURE")?;
        let cmd = CommandSpec::new(DOCKER)
            .args(["login", registry_url, "-u", creds.username.as_str(), "--password"])
            .secret_arg(&creds.password);
        self.runner.run(&cmd).await?;
        Ok(())
    }

    async fn login_dockerhub(&self) -> Result<(), AuthError> {
        let creds = RegistryCredentials::from_env(self.env, "DOCKERHUB")?;
        let cmd = CommandSpec::new(DOCKER)
            .args(["login", "-u", creds.username.as_str(), "-p"])
            .secret_arg(&creds.password);
        self.runner.run(&cmd).await?;
        Ok(())
    }

    /// Run `aws ecr get-login`, then the docker login command it prints
    ///
    /// Returns the overlay for later `aws` calls and the registry host.
    async fn login_aws(
        &self,
        remote: &Remote,
        tempdir: &Path,
    ) -> Result<(AwsEnv, String), AuthError> {
        let creds = RegistryCredentials::from_env(self.env, "AWS")?;
        let region = match self
            .env
            .get("AWS_REGION")
            .filter(|region| !region.is_empty())
            .or_else(|| remote.ecr_region())
        {
            Some(region) => region,
            None => self.env.require("AWS_REGION")?,
        };
        let aws = AwsEnv::new(&creds, region);

        let output_file: PathBuf = tempdir.join(&self.aws_login_output);
        let get_login = aws.apply(
            CommandSpec::new(AWS)
                .args(["ecr", "get-login", "--no-include-email"])
                .stdout_to(&output_file),
        );
        self.runner.run(&get_login).await?;

        let content =
            std::fs::read_to_string(&output_file).map_err(|source| AuthError::Workdir {
                path: output_file.clone(),
                source,
            })?;
        let login = EcrLogin::parse(&content, &output_file)?;
        let cmd = CommandSpec::from_argv(&login.argv).ok_or_else(|| {
            AuthError::EmptyLoginCommand {
                path: output_file.clone(),
            }
        })?;
        self.runner.run(&cmd).await?;

        debug!("ECR login output parsed from {}", output_file.display());
        Ok((aws, login.registry))
    }
}
