//! Process lifecycle for the `godot-pck-tool` binary
//!
//! Wires the configuration, the diagnostics sink, the platform console, the
//! backend-driven operation set and the browser surface together, then hands
//! the process arguments to [`launch`].

use std::path::Path;

use crate::config::{self, ToolConfig};
use crate::console::PlatformConsole;
use crate::diagnostics::{init_tracing, write_notices, DiagnosticsSink};
use crate::dispatch::{launch, Session};
use crate::error::Result;
use crate::interactive::{BrowserLauncher, BrowserSurface};
use crate::operations::ToolOperations;
use crate::types::{RunMode, Severity};

/// Main CLI entry point; returns the process exit status
pub fn run_cli() -> Result<i32> {
    let app_dir = config::app_data_dir();
    config::ensure_app_data_dir(&app_dir)?;
    let config = ToolConfig::load(&app_dir)?;
    init_tracing(config.log_filter.as_deref());

    let mut diagnostics = DiagnosticsSink::new(config.log_path(&app_dir));
    let browser = BrowserLauncher::new(config.browser.clone());
    let mut operations = ToolOperations::new(config.backend.clone(), browser.clone())
        .with_program_name(program_name());
    let mut surface = BrowserSurface::new(browser);
    let mut console = PlatformConsole::new();

    let self_path = match std::env::current_exe() {
        Ok(path) => Some(path),
        Err(e) => {
            diagnostics.log(
                format!("cannot determine the executable path: {}", e),
                Severity::Error,
                false,
            );
            None
        }
    };

    // argv[0] is the program itself; a second copy of it is stripped by the router
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let outcome = {
        let mut session = Session::new(&mut operations, &mut diagnostics).with_self_path(self_path);
        launch(&args, &mut session, &mut console, &mut surface)
    };
    diagnostics.close();

    // Batch notices were echoed as they happened
    if outcome.mode == RunMode::Interactive {
        let _ = write_notices(&mut std::io::stderr(), &outcome.notices);
    }

    Ok(outcome.exit_code())
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
