//! Interactive surface seam
//!
//! The archive browser is an external program. The mode arbiter hands control
//! to an [`InteractiveSurface`] only when no command matched; a surface may
//! run further commands through [`Session::run_command`].

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::ENV_BROWSER;
use crate::dispatch::Session;
use crate::error::{error_chain, OperationError};
use crate::types::{DispatchContext, Severity};

/// Something that can own the process in interactive mode
pub trait InteractiveSurface {
    /// Run until the user closes the surface
    fn run(&mut self, session: &mut Session<'_>, context: DispatchContext);
}

/// Starts the configured archive browser executable
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
    program: Option<PathBuf>,
}

impl BrowserLauncher {
    pub fn new(program: Option<PathBuf>) -> Self {
        Self { program }
    }

    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }

    /// Start the browser, optionally with a file loaded, and wait for it to exit
    pub fn launch(&self, path: Option<&Path>) -> Result<(), OperationError> {
        let program = self.program.as_ref().ok_or_else(|| {
            OperationError::new(format!(
                "no archive browser configured (set `browser` in config.json or ${})",
                ENV_BROWSER
            ))
        })?;

        let mut command = Command::new(program);
        if let Some(path) = path {
            command.arg(path);
        }
        debug!(browser = %program.display(), ?path, "starting archive browser");

        let status = command.status().map_err(|e| {
            OperationError::io(
                format!("failed to launch archive browser {}", program.display()),
                e,
            )
        })?;
        if !status.success() {
            return Err(OperationError::new(format!(
                "archive browser exited with {}",
                status
            )));
        }
        Ok(())
    }
}

/// Interactive mode backed by the external browser
pub struct BrowserSurface {
    launcher: BrowserLauncher,
}

impl BrowserSurface {
    pub fn new(launcher: BrowserLauncher) -> Self {
        Self { launcher }
    }
}

impl InteractiveSurface for BrowserSurface {
    fn run(&mut self, session: &mut Session<'_>, _context: DispatchContext) {
        if let Err(e) = self.launcher.launch(None) {
            session
                .diagnostics()
                .log(error_chain(&e), Severity::Error, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticsSink;
    use crate::test_support::RecordingOperations;

    #[test]
    fn test_launch_without_program() {
        let launcher = BrowserLauncher::new(None);
        assert!(launcher.program().is_none());
        let err = launcher.launch(Some(Path::new("game.pck"))).unwrap_err();
        assert!(err.message.contains("no archive browser configured"));
    }

    #[test]
    fn test_launch_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = BrowserLauncher::new(Some(dir.path().join("no-such-browser")));
        let err = launcher.launch(None).unwrap_err();
        assert!(err.message.starts_with("failed to launch archive browser"));
    }

    #[test]
    fn test_surface_reports_launch_failure_as_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagnostics = DiagnosticsSink::new(dir.path().join("log.txt")).with_echo(false);
        let mut ops = RecordingOperations::new();
        {
            let mut session = Session::new(&mut ops, &mut diagnostics);
            let mut surface = BrowserSurface::new(BrowserLauncher::new(None));
            surface.run(&mut session, DispatchContext::startup());
        }

        let notices = diagnostics.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert!(notices[0].message.contains("no archive browser configured"));
        assert!(ops.calls.is_empty());
    }
}
