//! Recording doubles for the operation set and the console

use std::path::{Path, PathBuf};

use crate::console::ConsoleController;
use crate::error::OperationError;
use crate::operations::{OperationResult, Operations};
use crate::types::ConsoleVisibility;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Help,
    Info(PathBuf),
    Extract(PathBuf, PathBuf, bool),
    Pack(PathBuf, PathBuf, String, bool),
    Merge(PathBuf, PathBuf),
    Rip(PathBuf, Option<PathBuf>),
    Split(PathBuf, Option<PathBuf>),
    ChangeVersion(PathBuf, String),
    Open(Option<PathBuf>),
}

/// Operation set that records every call
#[derive(Debug, Default)]
pub(crate) struct RecordingOperations {
    pub(crate) calls: Vec<Call>,
    failure: Option<String>,
}

impl RecordingOperations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every call is recorded, then fails with `message`
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            calls: Vec::new(),
            failure: Some(message.to_string()),
        }
    }

    fn record(&mut self, call: Call) -> OperationResult {
        self.calls.push(call);
        match &self.failure {
            Some(message) => Err(OperationError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl Operations for RecordingOperations {
    fn help(&mut self) -> OperationResult {
        self.record(Call::Help)
    }

    fn info(&mut self, pck: &Path) -> OperationResult {
        self.record(Call::Info(pck.to_path_buf()))
    }

    fn extract(&mut self, pck: &Path, out_dir: &Path, overwrite: bool) -> OperationResult {
        self.record(Call::Extract(pck.to_path_buf(), out_dir.to_path_buf(), overwrite))
    }

    fn pack(
        &mut self,
        src_dir: &Path,
        out_file: &Path,
        version: &str,
        embed: bool,
    ) -> OperationResult {
        self.record(Call::Pack(
            src_dir.to_path_buf(),
            out_file.to_path_buf(),
            version.to_string(),
            embed,
        ))
    }

    fn merge(&mut self, pck: &Path, exe: &Path) -> OperationResult {
        self.record(Call::Merge(pck.to_path_buf(), exe.to_path_buf()))
    }

    fn rip(&mut self, exe: &Path, out: Option<&Path>) -> OperationResult {
        self.record(Call::Rip(exe.to_path_buf(), out.map(Path::to_path_buf)))
    }

    fn split(&mut self, exe: &Path, pair: Option<&Path>) -> OperationResult {
        self.record(Call::Split(exe.to_path_buf(), pair.map(Path::to_path_buf)))
    }

    fn change_version(&mut self, pck: &Path, version: &str) -> OperationResult {
        self.record(Call::ChangeVersion(pck.to_path_buf(), version.to_string()))
    }

    fn open(&mut self, path: Option<&Path>) -> OperationResult {
        self.record(Call::Open(path.map(Path::to_path_buf)))
    }
}

/// Console controller that remembers every change
#[derive(Debug, Default)]
pub(crate) struct RecordingConsole {
    pub(crate) changes: Vec<ConsoleVisibility>,
}

impl ConsoleController for RecordingConsole {
    fn set_visibility(&mut self, visibility: ConsoleVisibility) {
        self.changes.push(visibility);
    }
}
