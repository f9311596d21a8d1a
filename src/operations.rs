//! The operation set behind the dispatcher
//!
//! The dispatcher only validates operands and calls into [`Operations`]. The
//! PCK codec itself lives in an external backend executable; [`ToolOperations`]
//! forwards every archive operation to it with the canonical token table and
//! already-resolved paths.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::command::{ParsedCommand, COMMAND_TABLE};
use crate::config::{ENV_BACKEND, ENV_BROWSER};
use crate::error::OperationError;
use crate::interactive::BrowserLauncher;

/// Result of a single operation
pub type OperationResult = std::result::Result<(), OperationError>;

/// Archive operations reachable from the command line
pub trait Operations {
    fn help(&mut self) -> OperationResult;
    fn info(&mut self, pck: &Path) -> OperationResult;
    fn extract(&mut self, pck: &Path, out_dir: &Path, overwrite: bool) -> OperationResult;
    fn pack(&mut self, src_dir: &Path, out_file: &Path, version: &str, embed: bool)
        -> OperationResult;
    fn merge(&mut self, pck: &Path, exe: &Path) -> OperationResult;
    fn rip(&mut self, exe: &Path, out: Option<&Path>) -> OperationResult;
    fn split(&mut self, exe: &Path, pair: Option<&Path>) -> OperationResult;
    fn change_version(&mut self, pck: &Path, version: &str) -> OperationResult;
    fn open(&mut self, path: Option<&Path>) -> OperationResult;
}

/// Usage text built from the command table
pub fn usage(program: &str) -> String {
    let mut text = format!(
        "Godot PCK tool\n\nUSAGE:\n    {program} [COMMAND] [ARGS...]\n    {program} <path>\n\nCOMMANDS:\n"
    );
    for spec in &COMMAND_TABLE {
        let invocation = format!("{} {}", spec.tokens.join(" | "), spec.operands);
        text.push_str(&format!("    {:<36} {}\n", invocation.trim_end(), spec.summary));
    }
    text.push_str(&format!(
        "\nRun without arguments to start the archive browser.\n\
         Backend executable: ${ENV_BACKEND}, browser executable: ${ENV_BROWSER}\n"
    ));
    text
}

/// Operation set used by the binary
pub struct ToolOperations {
    backend: Option<PathBuf>,
    browser: BrowserLauncher,
    program: String,
}

impl ToolOperations {
    /// Create an operation set forwarding to `backend`
    pub fn new(backend: Option<PathBuf>, browser: BrowserLauncher) -> Self {
        Self {
            backend,
            browser,
            program: env!("CARGO_PKG_NAME").to_string(),
        }
    }

    /// Set the program name shown in the usage text
    pub fn with_program_name<S: Into<String>>(mut self, program: S) -> Self {
        self.program = program.into();
        self
    }

    /// Run the backend with the canonical arguments of `command`
    fn forward(&self, command: ParsedCommand) -> OperationResult {
        let backend = self.backend.as_ref().ok_or_else(|| {
            OperationError::new(format!(
                "no PCK backend configured (set `backend` in config.json or ${})",
                ENV_BACKEND
            ))
        })?;

        let args = command.to_args();
        debug!(backend = %backend.display(), ?args, "forwarding {}", command.kind());

        let status = Command::new(backend).args(&args).status().map_err(|e| {
            OperationError::io(
                format!("failed to launch PCK backend {}", backend.display()),
                e,
            )
        })?;

        if !status.success() {
            return Err(OperationError::new(format!(
                "PCK backend exited with {}",
                status
            )));
        }
        Ok(())
    }
}

impl Operations for ToolOperations {
    fn help(&mut self) -> OperationResult {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(usage(&self.program).as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| OperationError::io("failed to print usage", e))
    }

    fn info(&mut self, pck: &Path) -> OperationResult {
        self.forward(ParsedCommand::Info {
            pck: pck.to_path_buf(),
        })
    }

    fn extract(&mut self, pck: &Path, out_dir: &Path, overwrite: bool) -> OperationResult {
        self.forward(ParsedCommand::Extract {
            pck: pck.to_path_buf(),
            out_dir: out_dir.to_path_buf(),
            overwrite,
        })
    }

    fn pack(
        &mut self,
        src_dir: &Path,
        out_file: &Path,
        version: &str,
        embed: bool,
    ) -> OperationResult {
        self.forward(ParsedCommand::Pack {
            src_dir: src_dir.to_path_buf(),
            out_file: out_file.to_path_buf(),
            version: version.to_string(),
            embed,
        })
    }

    fn merge(&mut self, pck: &Path, exe: &Path) -> OperationResult {
        self.forward(ParsedCommand::Merge {
            pck: pck.to_path_buf(),
            exe: exe.to_path_buf(),
        })
    }

    fn rip(&mut self, exe: &Path, out: Option<&Path>) -> OperationResult {
        self.forward(ParsedCommand::Rip {
            exe: exe.to_path_buf(),
            out: out.map(Path::to_path_buf),
        })
    }

    fn split(&mut self, exe: &Path, pair: Option<&Path>) -> OperationResult {
        self.forward(ParsedCommand::Split {
            exe: exe.to_path_buf(),
            pair: pair.map(Path::to_path_buf),
        })
    }

    fn change_version(&mut self, pck: &Path, version: &str) -> OperationResult {
        self.forward(ParsedCommand::ChangeVersion {
            pck: pck.to_path_buf(),
            version: version.to_string(),
        })
    }

    fn open(&mut self, path: Option<&Path>) -> OperationResult {
        self.browser.launch(path)
    }
}
