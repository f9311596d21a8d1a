//! Command table and routing
//!
//! The router evaluates [`COMMAND_TABLE`] in order and stops at the first
//! entry whose predicate accepts the argument vector. A matched entry never
//! falls through to a later one, even if its operands are rejected.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{ArityError, DispatchError, OperationError, PathResolutionError};
use crate::operations::Operations;
use crate::paths::normalize;
use crate::types::{Arity, CommandKind};

/// A command with validated, typed operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Help,
    Info {
        pck: PathBuf,
    },
    Extract {
        pck: PathBuf,
        out_dir: PathBuf,
        overwrite: bool,
    },
    Pack {
        src_dir: PathBuf,
        out_file: PathBuf,
        version: String,
        embed: bool,
    },
    Merge {
        pck: PathBuf,
        exe: PathBuf,
    },
    Rip {
        exe: PathBuf,
        out: Option<PathBuf>,
    },
    Split {
        exe: PathBuf,
        pair: Option<PathBuf>,
    },
    ChangeVersion {
        pck: PathBuf,
        version: String,
    },
    Open {
        path: Option<PathBuf>,
    },
}

impl ParsedCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            ParsedCommand::Help => CommandKind::Help,
            ParsedCommand::Info { .. } => CommandKind::Info,
            ParsedCommand::Extract { overwrite: true, .. } => CommandKind::Extract,
            ParsedCommand::Extract { overwrite: false, .. } => CommandKind::ExtractSkipExisting,
            ParsedCommand::Pack { embed: false, .. } => CommandKind::Pack,
            ParsedCommand::Pack { embed: true, .. } => CommandKind::PackEmbedded,
            ParsedCommand::Merge { .. } => CommandKind::Merge,
            ParsedCommand::Rip { .. } => CommandKind::Rip,
            ParsedCommand::Split { .. } => CommandKind::Split,
            ParsedCommand::ChangeVersion { .. } => CommandKind::ChangeVersion,
            ParsedCommand::Open { .. } => CommandKind::Open,
        }
    }

    /// Hand the command to the operation set
    pub fn invoke(&self, ops: &mut dyn Operations) -> Result<(), OperationError> {
        match self {
            ParsedCommand::Help => ops.help(),
            ParsedCommand::Info { pck } => ops.info(pck),
            ParsedCommand::Extract {
                pck,
                out_dir,
                overwrite,
            } => ops.extract(pck, out_dir, *overwrite),
            ParsedCommand::Pack {
                src_dir,
                out_file,
                version,
                embed,
            } => ops.pack(src_dir, out_file, version, *embed),
            ParsedCommand::Merge { pck, exe } => ops.merge(pck, exe),
            ParsedCommand::Rip { exe, out } => ops.rip(exe, out.as_deref()),
            ParsedCommand::Split { exe, pair } => ops.split(exe, pair.as_deref()),
            ParsedCommand::ChangeVersion { pck, version } => ops.change_version(pck, version),
            ParsedCommand::Open { path } => ops.open(path.as_deref()),
        }
    }

    /// Canonical argument vector for this command, with resolved paths
    pub fn to_args(&self) -> Vec<OsString> {
        let path = |p: &Path| p.as_os_str().to_os_string();
        let operands = match self {
            ParsedCommand::Help => vec![],
            ParsedCommand::Info { pck } => vec![path(pck)],
            ParsedCommand::Extract { pck, out_dir, .. } => vec![path(pck), path(out_dir)],
            ParsedCommand::Pack {
                src_dir,
                out_file,
                version,
                ..
            } => vec![path(src_dir), path(out_file), OsString::from(version)],
            ParsedCommand::Merge { pck, exe } => vec![path(pck), path(exe)],
            ParsedCommand::Rip { exe, out } => {
                std::iter::once(exe).chain(out).map(|p| path(p)).collect()
            }
            ParsedCommand::Split { exe, pair } => {
                std::iter::once(exe).chain(pair).map(|p| path(p)).collect()
            }
            ParsedCommand::ChangeVersion { pck, version } => {
                vec![path(pck), OsString::from(version)]
            }
            ParsedCommand::Open { path: target } => target.iter().map(|p| path(p)).collect(),
        };

        let mut args = vec![OsString::from(self.kind().token())];
        args.extend(operands);
        args
    }
}

/// One row of the command table
pub struct CommandSpec {
    pub kind: CommandKind,
    /// Tokens that select this row
    pub tokens: &'static [&'static str],
    pub arity: Arity,
    /// Operand names for the usage text
    pub operands: &'static str,
    pub summary: &'static str,
    parse: fn(&[String]) -> Result<ParsedCommand, PathResolutionError>,
}

/// Outcome of evaluating the table against an argument vector
#[derive(Debug)]
pub enum Routed {
    Matched {
        kind: CommandKind,
        command: Result<ParsedCommand, DispatchError>,
    },
    NoMatch,
}

/// Table rows in evaluation order
pub static COMMAND_TABLE: [CommandSpec; 11] = [
    CommandSpec {
        kind: CommandKind::Help,
        tokens: &["-h", "/?", "--help"],
        arity: Arity::Exactly(0),
        operands: "",
        summary: "Show this help",
        parse: |_| Ok(ParsedCommand::Help),
    },
    CommandSpec {
        kind: CommandKind::Info,
        tokens: &["-i"],
        arity: Arity::Exactly(1),
        operands: "<pck>",
        summary: "Print the header and file list of a PCK",
        parse: |ops| {
            Ok(ParsedCommand::Info {
                pck: normalize(&ops[0])?,
            })
        },
    },
    CommandSpec {
        kind: CommandKind::Extract,
        tokens: &["-e"],
        arity: Arity::Exactly(2),
        operands: "<pck> <out-dir>",
        summary: "Extract all files, overwriting existing ones",
        parse: |ops| {
            Ok(ParsedCommand::Extract {
                pck: normalize(&ops[0])?,
                out_dir: normalize(&ops[1])?,
                overwrite: true,
            })
        },
    },
    CommandSpec {
        kind: CommandKind::ExtractSkipExisting,
        tokens: &["-es"],
        arity: Arity::Exactly(2),
        operands: "<pck> <out-dir>",
        summary: "Extract all files, skipping existing ones",
        parse: |ops| {
            Ok(ParsedCommand::Extract {
                pck: normalize(&ops[0])?,
                out_dir: normalize(&ops[1])?,
                overwrite: false,
            })
        },
    },
    CommandSpec {
        kind: CommandKind::Pack,
        tokens: &["-p"],
        arity: Arity::Exactly(3),
        operands: "<src-dir> <out-pck> <version>",
        summary: "Pack a directory into a new PCK",
        parse: |ops| {
            Ok(ParsedCommand::Pack {
                src_dir: normalize(&ops[0])?,
                out_file: normalize(&ops[1])?,
                version: ops[2].clone(),
                embed: false,
            })
        },
    },
    CommandSpec {
        kind: CommandKind::PackEmbedded,
        tokens: &["-pe"],
        arity: Arity::Exactly(3),
        operands: "<src-dir> <exe> <version>",
        summary: "Pack a directory and embed it into an executable",
        parse: |ops| {
            Ok(ParsedCommand::Pack {
                src_dir: normalize(&ops[0])?,
                out_file: normalize(&ops[1])?,
                version: ops[2].clone(),
                embed: true,
            })
        },
    },
    CommandSpec {
        kind: CommandKind::Merge,
        tokens: &["-m"],
        arity: Arity::Exactly(2),
        operands: "<pck> <exe>",
        summary: "Embed an existing PCK into an executable",
        parse: |ops| {
            Ok(ParsedCommand::Merge {
                pck: normalize(&ops[0])?,
                exe: normalize(&ops[1])?,
            })
        },
    },
    CommandSpec {
        kind: CommandKind::Rip,
        tokens: &["-r"],
        arity: Arity::Between(1, 2),
        operands: "<exe> [out-pck]",
        summary: "Remove the embedded PCK from an executable, optionally saving it",
        parse: |ops| {
            Ok(ParsedCommand::Rip {
                exe: normalize(&ops[0])?,
                out: ops.get(1).map(|v| normalize(v)).transpose()?,
            })
        },
    },
    CommandSpec {
        kind: CommandKind::Split,
        tokens: &["-s"],
        arity: Arity::Between(1, 2),
        operands: "<exe> [pair-name]",
        summary: "Split an executable with an embedded PCK into an exe/pck pair",
        parse: |ops| {
            Ok(ParsedCommand::Split {
                exe: normalize(&ops[0])?,
                pair: ops.get(1).map(|v| normalize(v)).transpose()?,
            })
        },
    },
    CommandSpec {
        kind: CommandKind::ChangeVersion,
        tokens: &["-c"],
        arity: Arity::Exactly(2),
        operands: "<pck> <version>",
        summary: "Rewrite the engine version recorded in a PCK",
        parse: |ops| {
            Ok(ParsedCommand::ChangeVersion {
                pck: normalize(&ops[0])?,
                version: ops[1].clone(),
            })
        },
    },
    CommandSpec {
        kind: CommandKind::Open,
        tokens: &["-o"],
        arity: Arity::Between(0, 1),
        operands: "[path]",
        summary: "Open a PCK or executable in the archive browser (also: a single bare path)",
        parse: |ops| {
            Ok(ParsedCommand::Open {
                path: ops.first().map(|v| normalize(v)).transpose()?,
            })
        },
    },
];

impl CommandSpec {
    /// Operands following the token, if this row claims `args`
    fn claim<'a>(&self, args: &'a [String]) -> Option<&'a [String]> {
        let first = args.first()?;
        if self.tokens.contains(&first.as_str()) {
            return Some(&args[1..]);
        }
        // A lone argument that no earlier row claimed is a path to open
        if self.kind == CommandKind::Open && args.len() == 1 {
            return Some(args);
        }
        None
    }
}

/// Evaluate the command table against `args`, first match wins
pub fn route(args: &[String]) -> Routed {
    for spec in &COMMAND_TABLE {
        let Some(operands) = spec.claim(args) else {
            continue;
        };

        let command = if spec.arity.accepts(operands.len()) {
            (spec.parse)(operands).map_err(DispatchError::from)
        } else {
            Err(DispatchError::from(ArityError {
                command: spec.kind,
                token: args[0].clone(),
                expected: spec.arity,
                actual: operands.len(),
            }))
        };

        return Routed::Matched {
            kind: spec.kind,
            command,
        };
    }
    Routed::NoMatch
}
