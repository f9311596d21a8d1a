//! Command dispatcher for Godot PCK archive tooling
//!
//! This library decides which archive operation a process runs, with which
//! validated arguments, and whether the process stays a batch tool or hands
//! over to the interactive archive browser.
//!
//! ## Commands
//!
//! - `-i <pck>` info, `-e`/`-es <pck> <dir>` extract (overwrite / skip existing)
//! - `-p`/`-pe <dir> <file> <version>` pack (plain / embedded in an executable)
//! - `-m <pck> <exe>` merge, `-r <exe> [out]` rip, `-s <exe> [pair]` split
//! - `-c <pck> <version>` change version, `-o [path]` or a single bare path: open
//! - `-h`, `/?`, `--help` usage
//!
//! The archive codec and the browser are external executables reached through
//! the [`Operations`] and [`InteractiveSurface`] seams.

pub mod cli;
pub mod command;
pub mod config;
pub mod console;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod interactive;
pub mod operations;
pub mod paths;
pub mod types;

#[cfg(test)]
mod test_support;

pub use command::{route, ParsedCommand, Routed, COMMAND_TABLE};
pub use config::ToolConfig;
pub use console::{ConsoleController, PlatformConsole};
pub use diagnostics::{Diagnostic, DiagnosticsSink};
pub use dispatch::{launch, DispatchReport, LaunchOutcome, Session};
pub use error::{
    ArityError, DispatchError, OperationError, PathResolutionError, Result, ToolError,
};
pub use interactive::{BrowserLauncher, BrowserSurface, InteractiveSurface};
pub use operations::{OperationResult, Operations, ToolOperations};
pub use types::{Arity, CommandKind, ConsoleVisibility, DispatchContext, RunMode, Severity};
