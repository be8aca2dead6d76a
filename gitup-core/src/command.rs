use crate::error::{QueryError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::trace;

/// Runs an external program and returns its standard output
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Invokes the `git` executable inside a repository working directory
#[derive(Debug, Clone)]
pub struct GitCommand {
    workdir: PathBuf,
}

impl GitCommand {
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }
}

impl CommandRunner for GitCommand {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command_line = format!("{} {}", program, args.join(" "));
        trace!(command = %command_line, "running");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| QueryError::Io {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(QueryError::Command {
                command: command_line,
                message: format!("{} ({})", stderr.trim(), output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_io_error() {
        let runner = GitCommand::new(".");
        let result = runner.run("gitup-report-no-such-program", &["--version"]);

        assert!(matches!(result, Err(QueryError::Io { .. })));
    }
}
