//! External command execution
//!
//! Every call to docker, aws or git goes through a [`CommandRunner`].
//! A [`CommandSpec`] carries its own working directory and environment
//! overlay; the runner never touches the process cwd or environment.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::CommandError;
use crate::tools::get_tool_path;

/// Description of one external command invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    secret_args: Vec<usize>,
    current_dir: Option<PathBuf>,
    env: BTreeMap<String, String>,
    stdout_path: Option<PathBuf>,
}

impl CommandSpec {
    /// `program` is a tool name, resolved through `{TOOL}_BIN` at spawn time
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Build from a full argv (program first), masking values passed to
    /// `-p` / `--password`
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, rest) = argv.split_first()?;
        let mut spec = Self::new(program.clone());
        let mut next_is_secret = false;
        for arg in rest {
            if next_is_secret {
                spec = spec.secret_arg(arg.clone());
                next_is_secret = false;
            } else {
                next_is_secret = arg == "-p" || arg == "--password";
                spec = spec.arg(arg.clone());
            }
        }
        Some(spec)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Argument that is masked in logs and error messages
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret_args.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Variables added to the child's environment only
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Redirect stdout into `path` (created or truncated)
    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout_path = Some(path.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn get_env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn stdout_path(&self) -> Option<&Path> {
        self.stdout_path.as_deref()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for (i, arg) in self.args.iter().enumerate() {
            if self.secret_args.contains(&i) {
                write!(f, " ****")?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Empty when stdout was redirected to a file
    pub stdout: String,
    pub stderr: String,
}

/// Seam between orchestration and process spawning
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run to completion; a non-zero exit is `CommandError::Execution`
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError> {
        (**self).run(command).await
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let program = get_tool_path(command.program());
        let mut cmd = Command::new(&program);
        cmd.args(command.get_args())
            .envs(command.get_env())
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = command.get_current_dir() {
            cmd.current_dir(dir);
        }

        match command.stdout_path() {
            Some(path) => {
                let file =
                    std::fs::File::create(path).map_err(|source| CommandError::OutputFile {
                        path: path.to_path_buf(),
                        source,
                    })?;
                cmd.stdout(Stdio::from(file));
            }
            None => {
                cmd.stdout(Stdio::piped());
            }
        }

        debug!("$ {}", command);
        // output() would replace the stdout redirect with a pipe
        let child = cmd.spawn().map_err(|source| CommandError::Spawn {
            tool: program.clone(),
            source,
        })?;
        let output = child
            .wait_with_output()
            .await
            .map_err(|source| CommandError::Spawn {
                tool: program,
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(CommandError::Execution {
                command: command.to_string(),
                status: output.status.to_string(),
                stdout,
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
