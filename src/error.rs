//! Error types for the PCK tool dispatcher

use std::error::Error as StdError;
use thiserror::Error;

use crate::types::{Arity, CommandKind};

/// Result type alias for the ambient stack (config, app data, I/O)
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised outside of dispatch: startup, configuration, file system
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ToolError {
    /// Create an IO error with a formatted message
    pub fn io_error<S: Into<String>>(msg: S) -> Self {
        Self::IoError(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// A supplied path could not be made absolute
#[derive(Error, Debug)]
#[error("cannot resolve path {value:?}: {reason}")]
pub struct PathResolutionError {
    /// The argument exactly as supplied
    pub value: String,
    pub reason: String,
    #[source]
    pub source: Option<std::io::Error>,
}

impl PathResolutionError {
    pub fn new<V: Into<String>, R: Into<String>>(value: V, reason: R) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub fn io<V: Into<String>>(value: V, source: std::io::Error) -> Self {
        Self {
            value: value.into(),
            reason: "I/O error".to_string(),
            source: Some(source),
        }
    }
}

/// Wrong number of operands for a matched command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid number of arguments for {token}: expected {expected}, got {actual}")]
pub struct ArityError {
    pub command: CommandKind,
    /// Token as typed by the user
    pub token: String,
    pub expected: Arity,
    pub actual: usize,
}

/// Failure surfaced by an operation; opaque to the dispatcher
#[derive(Error, Debug)]
#[error("{message}")]
pub struct OperationError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl OperationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn io<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Everything a single dispatch can report
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    PathResolution(#[from] PathResolutionError),

    #[error(transparent)]
    Arity(#[from] ArityError),

    #[error("{command} failed")]
    Operation {
        command: CommandKind,
        #[source]
        source: OperationError,
    },
}

impl DispatchError {
    /// Whether an interactive surface should present this to the user
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, DispatchError::PathResolution(_))
    }
}

/// Render an error followed by its `source` chain, `msg: cause: cause`
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}
