//! Argument router and mode arbiter
//!
//! A [`Session`] owns the borrowed operation set and diagnostics sink for the
//! life of the process. [`Session::dispatch`] routes one argument vector and
//! reports every failure through the sink instead of returning it.
//! [`launch`] is the top-level lifecycle: prime the sink, show the console,
//! dispatch, and fall into interactive mode only when nothing matched.
//! User-facing records raised while the surface runs are handed back in the
//! [`LaunchOutcome`] for the caller to present.

use std::path::PathBuf;

use tracing::debug;

use crate::command::{route, Routed};
use crate::console::ConsoleController;
use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::DispatchError;
use crate::interactive::InteractiveSurface;
use crate::operations::Operations;
use crate::paths::{clean, is_self_path};
use crate::types::{CommandKind, ConsoleVisibility, DispatchContext, RunMode, Severity};

/// What a single dispatch did
#[derive(Debug)]
pub struct DispatchReport {
    /// Context after the dispatch
    pub context: DispatchContext,
    /// Matched command, `None` when nothing matched
    pub command: Option<CommandKind>,
    /// Failure already reported to the diagnostics sink
    pub error: Option<DispatchError>,
}

impl DispatchReport {
    pub fn matched(&self) -> bool {
        self.command.is_some()
    }

    /// A command matched and completed without error
    pub fn succeeded(&self) -> bool {
        self.matched() && self.error.is_none()
    }
}

/// Router state shared by the top-level and nested dispatches
pub struct Session<'a> {
    operations: &'a mut dyn Operations,
    diagnostics: &'a mut DiagnosticsSink,
    self_path: Option<PathBuf>,
}

impl<'a> Session<'a> {
    pub fn new(operations: &'a mut dyn Operations, diagnostics: &'a mut DiagnosticsSink) -> Self {
        Self {
            operations,
            diagnostics,
            self_path: None,
        }
    }

    /// Set the running executable's path, used to drop a leading self-path argument
    pub fn with_self_path(mut self, self_path: Option<PathBuf>) -> Self {
        self.self_path = self_path.map(|p| clean(&p));
        self
    }

    pub fn diagnostics(&mut self) -> &mut DiagnosticsSink {
        &mut *self.diagnostics
    }

    /// Route `args` and run the matched command.
    ///
    /// Never fails: rejected operands and operation failures are logged and
    /// returned in the report. A matched command marks the context as batch
    /// whether or not it succeeded.
    pub fn dispatch(&mut self, mut context: DispatchContext, args: &[String]) -> DispatchReport {
        let args = self.strip_self_path(args);

        let (kind, command) = match route(args) {
            Routed::NoMatch => {
                debug!(?args, "no command matched");
                return DispatchReport {
                    context,
                    command: None,
                    error: None,
                };
            }
            Routed::Matched { kind, command } => (kind, command),
        };

        context.enter_batch();
        debug!(command = %kind, "dispatching");

        let error = command.and_then(|command| {
            command
                .invoke(&mut *self.operations)
                .map_err(|source| DispatchError::Operation {
                    command: kind,
                    source,
                })
        });

        let error = error.err();
        if let Some(err) = &error {
            self.diagnostics.log_error(err, err.is_user_facing());
        }

        DispatchReport {
            context,
            command: Some(kind),
            error,
        }
    }

    /// Run a command on behalf of an interactive surface.
    ///
    /// The returned report carries `context` unchanged, so whatever the nested
    /// dispatch did to the flag and mode never reaches the caller.
    pub fn run_command(&mut self, context: DispatchContext, args: &[String]) -> DispatchReport {
        let saved = context;
        let mut report = self.dispatch(context, args);
        report.context = saved;
        report
    }

    fn strip_self_path<'b>(&mut self, args: &'b [String]) -> &'b [String] {
        let (Some(first), Some(self_path)) = (args.first(), self.self_path.as_ref()) else {
            return args;
        };
        match is_self_path(first, self_path) {
            Ok(true) => &args[1..],
            Ok(false) => args,
            Err(e) => {
                self.diagnostics.log_error(&e, false);
                args
            }
        }
    }
}

/// Result of the whole process lifecycle
#[derive(Debug)]
pub struct LaunchOutcome {
    pub mode: RunMode,
    pub report: DispatchReport,
    /// User-facing records drained from the sink
    pub notices: Vec<Diagnostic>,
}

impl LaunchOutcome {
    /// Process exit status: batch failures are non-zero
    pub fn exit_code(&self) -> i32 {
        match self.mode {
            RunMode::Batch if self.report.error.is_some() => 1,
            _ => 0,
        }
    }
}

/// Top-level lifecycle: sink primed, console up, dispatch, then batch or interactive
pub fn launch(
    args: &[String],
    session: &mut Session<'_>,
    console: &mut dyn ConsoleController,
    surface: &mut dyn InteractiveSurface,
) -> LaunchOutcome {
    session.diagnostics().log(
        format!(
            "{} {} started",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
        Severity::Debug,
        false,
    );
    console.set_visibility(ConsoleVisibility::Shown);

    let report = session.dispatch(DispatchContext::startup(), args);
    let mut context = report.context;
    context.mode = context.arbitrated_mode();

    if context.mode == RunMode::Interactive {
        console.set_visibility(ConsoleVisibility::Hidden);
        session.diagnostics().set_defer_notices(true);
        surface.run(session, context);
        session.diagnostics().set_defer_notices(false);
    }

    LaunchOutcome {
        mode: context.mode,
        report: DispatchReport { context, ..report },
        notices: session.diagnostics().take_notices(),
    }
}
