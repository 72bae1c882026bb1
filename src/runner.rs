//! Local command execution
//!
//! Commands are shell strings run with `sh -c` in a working directory. Output
//! is streamed straight to the terminal; only the exit code comes back.

use crate::error::Result;
use crate::logger::Logger;
use std::path::Path;
use std::process::{Command, Stdio};

/// Port for running shell commands, so callers can be tested with fakes
pub trait CommandRunner: Send + Sync {
    /// Run `command` in `cwd` and return its exit code.
    ///
    /// A process killed by a signal reports `-1`. Failing to spawn the shell
    /// at all is an error.
    fn run(&self, command: &str, cwd: &Path) -> Result<i32>;
}

#[derive(Default, Clone, Copy)]
pub struct ShellRunner {
    logger: Logger,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a human-readable description of an exit code
    pub fn exit_code_description(exit_code: i32) -> &'static str {
        match exit_code {
            0 => "success",
            1 => "general error",
            2 => "misuse of shell builtins",
            126 => "command invoked cannot execute",
            127 => "command not found",
            128 => "invalid argument to exit",
            130 => "script terminated by Control-C",
            _ if exit_code > 128 => "terminated by signal",
            _ => "error",
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<i32> {
        let scope = "runner";
        self.logger.info(
            scope,
            &format!("Running: {} (cwd={})", command, cwd.display()),
        );

        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .status()?;

        let exit_code = status.code().unwrap_or(-1);
        let description = Self::exit_code_description(exit_code);
        let msg = format!("'{}' ended with exit code {} ({})", command, exit_code, description);
        if exit_code == 0 {
            self.logger.success(scope, &msg);
        } else {
            self.logger.warn(scope, &msg);
        }

        Ok(exit_code)
    }
}
