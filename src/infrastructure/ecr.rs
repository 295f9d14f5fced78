//! AWS ECR repository management

use tracing::{debug, warn};

use crate::error::CommandError;
use crate::infrastructure::command::{CommandRunner, CommandSpec};
use crate::infrastructure::registry::AwsEnv;
use crate::tools::tools::AWS;

/// Client for `aws ecr` repository calls
pub struct EcrClient<'a, R> {
    runner: R,
    aws: Option<&'a AwsEnv>,
}

impl<'a, R: CommandRunner> EcrClient<'a, R> {
    /// `aws` is the overlay from the login pass; `None` uses the ambient
    /// AWS configuration of the process
    pub fn new(runner: R, aws: Option<&'a AwsEnv>) -> Self {
        Self { runner, aws }
    }

    fn command(&self) -> CommandSpec {
        let cmd = CommandSpec::new(AWS);
        match self.aws {
            Some(aws) => aws.apply(cmd),
            None => cmd,
        }
    }

    /// Create the repository unless `describe-repositories` finds it
    ///
    /// Any describe failure is taken to mean the repository is absent.
    /// Only a failed create is reported.
    pub async fn check_if_aws_repository_exist(&self, container: &str) -> Result<(), CommandError> {
        let describe = self
            .command()
            .args(["ecr", "describe-repositories", "--repository-names", container]);

        match self.runner.run(&describe).await {
            Ok(_) => {
                debug!("ECR repository {} exists", container);
                Ok(())
            }
            Err(e) => {
                debug!("describe-repositories failed: {}", e);
                warn!("Creating Container Repository {}.", container);
                let create = self
                    .command()
                    .args(["ecr", "create-repository", "--repository-name", container]);
                self.runner.run(&create).await?;
                Ok(())
            }
        }
    }
}
