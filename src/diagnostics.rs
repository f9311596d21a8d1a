//! Diagnostics sink and tracing setup
//!
//! [`DiagnosticsSink`] is the user-facing log: every record goes to the log
//! file, console-worthy records are echoed, and records marked user-facing are
//! queued as notices. While an interactive surface owns the process the console
//! is hidden, so user-facing records are held back from the echo and presented
//! once the surface returns. The sink never fails its caller; I/O problems only
//! disable the file.

use std::error::Error as StdError;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::ENV_LOG_FILTER;
use crate::error::error_chain;
use crate::types::Severity;

/// A single record kept for an interactive surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug)]
enum LogFile {
    /// Not opened yet
    Pending,
    Open(LineWriter<fs_err::File>),
    /// Open or write failed, or the sink was closed
    Unavailable,
}

/// Process-wide user-facing log
#[derive(Debug)]
pub struct DiagnosticsSink {
    path: PathBuf,
    file: LogFile,
    echo: bool,
    defer_notices: bool,
    notices: Vec<Diagnostic>,
}

impl DiagnosticsSink {
    /// Create a sink writing to `path`; the file is opened on the first record
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            file: LogFile::Pending,
            echo: true,
            defer_notices: false,
            notices: Vec::new(),
        }
    }

    /// Enable or disable console echo
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Hold user-facing records back from the console echo
    pub fn set_defer_notices(&mut self, defer: bool) {
        self.defer_notices = defer;
    }

    /// Record a message
    pub fn log<S: AsRef<str>>(&mut self, message: S, severity: Severity, user_facing: bool) {
        let message = message.as_ref();
        debug!(%severity, user_facing, "{}", message);

        let deferred = user_facing && self.defer_notices;
        if self.echo && severity >= Severity::Info && !deferred {
            echo(severity, message);
        }
        self.write_file(severity, message);

        if user_facing {
            self.notices.push(Diagnostic {
                severity,
                message: message.to_string(),
            });
        }
    }

    /// Record an error together with its causes
    pub fn log_error(&mut self, error: &(dyn StdError + 'static), user_facing: bool) {
        self.log(error_chain(error), Severity::Error, user_facing);
    }

    /// Drain the records queued for the user
    pub fn take_notices(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.notices)
    }

    /// Flush and release the log file; later records skip the file
    pub fn close(&mut self) {
        if let LogFile::Open(writer) = &mut self.file {
            let _ = writer.flush();
        }
        self.file = LogFile::Unavailable;
    }

    fn write_file(&mut self, severity: Severity, message: &str) {
        if matches!(self.file, LogFile::Pending) {
            self.file = match open_log(&self.path) {
                Ok(writer) => LogFile::Open(writer),
                Err(e) => {
                    debug!(path = %self.path.display(), "log file unavailable: {}", e);
                    LogFile::Unavailable
                }
            };
        }

        if let LogFile::Open(writer) = &mut self.file {
            if let Err(e) = writeln!(writer, "[{}] {}", severity, message) {
                debug!(path = %self.path.display(), "log write failed: {}", e);
                self.file = LogFile::Unavailable;
            }
        }
    }
}

impl Drop for DiagnosticsSink {
    fn drop(&mut self) {
        self.close();
    }
}

fn open_log(path: &Path) -> io::Result<LineWriter<fs_err::File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(LineWriter::new(file))
}

fn echo(severity: Severity, message: &str) {
    // Console errors are swallowed like file errors
    let _ = match severity {
        Severity::Error => writeln!(io::stderr(), "Error: {}", message),
        Severity::Warning => writeln!(io::stderr(), "Warning: {}", message),
        _ => writeln!(io::stdout(), "{}", message),
    };
}

/// Write drained notices the way the console echo would
pub fn write_notices<W: Write>(out: &mut W, notices: &[Diagnostic]) -> io::Result<()> {
    for notice in notices {
        match notice.severity {
            Severity::Error => writeln!(out, "Error: {}", notice.message)?,
            Severity::Warning => writeln!(out, "Warning: {}", notice.message)?,
            _ => writeln!(out, "{}", notice.message)?,
        }
    }
    Ok(())
}

/// Install the stderr tracing subscriber.
///
/// The filter comes from the environment first, then `default_filter`, then
/// `warn`. Calling this twice is harmless.
pub fn init_tracing(default_filter: Option<&str>) {
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .or_else(|_| EnvFilter::try_new(default_filter.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}
