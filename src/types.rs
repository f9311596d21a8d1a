//! Common types shared by the router, the mode arbiter and the diagnostics sink

use std::fmt;

/// Which surface the process is running after dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// A command matched and ran non-interactively
    #[default]
    Batch,
    /// No command matched; the archive browser owns the process
    Interactive,
}

/// Visibility of the terminal attached to the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleVisibility {
    Shown,
    Hidden,
}

/// Severity of a diagnostics record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Label used in log file lines
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two pieces of process-wide state a dispatch reads and writes.
///
/// The context is a plain value: callers pass it into a dispatch and get the
/// updated copy back, so restoring the outer state after a nested dispatch is
/// just keeping the old copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchContext {
    /// Set as soon as any command token matches; suppresses interactive startup
    pub ran_with_args: bool,
    /// Current run mode
    pub mode: RunMode,
}

impl DispatchContext {
    /// State at process start: nothing ran yet, console-oriented
    pub fn startup() -> Self {
        Self::default()
    }

    /// Record that a command matched
    pub fn enter_batch(&mut self) {
        self.ran_with_args = true;
        self.mode = RunMode::Batch;
    }

    /// Mode the arbiter settles on for this context
    pub fn arbitrated_mode(&self) -> RunMode {
        if self.ran_with_args {
            RunMode::Batch
        } else {
            RunMode::Interactive
        }
    }
}

/// Named operations reachable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Info,
    Extract,
    ExtractSkipExisting,
    Pack,
    PackEmbedded,
    Merge,
    Rip,
    Split,
    ChangeVersion,
    Open,
}

impl CommandKind {
    /// Canonical command-line token
    pub fn token(self) -> &'static str {
        match self {
            CommandKind::Help => "-h",
            CommandKind::Info => "-i",
            CommandKind::Extract => "-e",
            CommandKind::ExtractSkipExisting => "-es",
            CommandKind::Pack => "-p",
            CommandKind::PackEmbedded => "-pe",
            CommandKind::Merge => "-m",
            CommandKind::Rip => "-r",
            CommandKind::Split => "-s",
            CommandKind::ChangeVersion => "-c",
            CommandKind::Open => "-o",
        }
    }

    /// Human readable operation name
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::Info => "info",
            CommandKind::Extract => "extract",
            CommandKind::ExtractSkipExisting => "extract-skip-existing",
            CommandKind::Pack => "pack",
            CommandKind::PackEmbedded => "pack-embedded",
            CommandKind::Merge => "merge",
            CommandKind::Rip => "rip",
            CommandKind::Split => "split",
            CommandKind::ChangeVersion => "change-version",
            CommandKind::Open => "open",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted operand counts for a command, token excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::Between(min, max) if max - min == 1 => write!(f, "{} or {}", min, max),
            Arity::Between(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}
