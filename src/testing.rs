//! Test doubles shared by the service and infrastructure tests

use std::cell::RefCell;

use crate::error::CommandError;
use crate::infrastructure::command::{CommandOutput, CommandRunner, CommandSpec};

/// Records every command and answers from canned responses
///
/// Matching is by substring of the redacted command line.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<CommandSpec>>,
    failures: Vec<(String, String)>,
    responses: Vec<(String, String)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `needle` exit non-zero with `stderr`
    pub fn fail_when(mut self, needle: &str, stderr: &str) -> Self {
        self.failures.push((needle.to_string(), stderr.to_string()));
        self
    }

    /// Commands containing `needle` print `stdout`
    pub fn respond(mut self, needle: &str, stdout: &str) -> Self {
        self.responses.push((needle.to_string(), stdout.to_string()));
        self
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Redacted command lines in execution order
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError> {
        self.calls.borrow_mut().push(command.clone());
        let line = command.to_string();

        let stdout = self
            .responses
            .iter()
            .find(|(needle, _)| line.contains(needle.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();

        if let Some((_, stderr)) = self
            .failures
            .iter()
            .find(|(needle, _)| line.contains(needle.as_str()))
        {
            return Err(CommandError::Execution {
                command: line,
                status: "exit status: 1".to_string(),
                stdout,
                stderr: stderr.clone(),
            });
        }

        if let Some(path) = command.stdout_path() {
            std::fs::write(path, &stdout).map_err(|source| CommandError::OutputFile {
                path: path.to_path_buf(),
                source,
            })?;
            return Ok(CommandOutput::default());
        }

        Ok(CommandOutput {
            stdout,
            stderr: String::new(),
        })
    }
}
