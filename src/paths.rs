//! Path operand normalization
//!
//! Every path operand goes through [`normalize`] before an operation sees it:
//! surrounding quotes are dropped (some shells hand them through literally),
//! the path is made absolute against the current directory, and `.`/`..`
//! components are folded away lexically. The target does not need to exist.

use std::path::{Component, Path, PathBuf};

use crate::error::PathResolutionError;

/// Drop `"` characters wrapped around an argument
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

/// Resolve a raw argument to an absolute, lexically clean path
pub fn normalize(value: &str) -> Result<PathBuf, PathResolutionError> {
    let unquoted = strip_quotes(value);

    if unquoted.is_empty() {
        return Err(PathResolutionError::new(value, "path is empty"));
    }
    if unquoted.contains('\0') {
        return Err(PathResolutionError::new(value, "path contains a NUL character"));
    }

    let absolute =
        std::path::absolute(unquoted).map_err(|e| PathResolutionError::io(value, e))?;
    Ok(clean(&absolute))
}

/// Fold `.` and `..` components without touching the file system
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Whether `value` names the running executable
pub fn is_self_path(value: &str, self_path: &Path) -> Result<bool, PathResolutionError> {
    Ok(normalize(value)? == self_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> PathBuf {
        std::env::current_dir().unwrap()
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"game.pck\""), "game.pck");
        assert_eq!(strip_quotes("game.pck"), "game.pck");
        assert_eq!(strip_quotes("\"\""), "");
    }

    #[test]
    fn test_relative_path_becomes_absolute() {
        let path = normalize("game.pck").unwrap();
        assert!(path.is_absolute());
        assert_eq!(path, cwd().join("game.pck"));
    }

    #[test]
    fn test_quoted_path_matches_unquoted() {
        let quoted = normalize("\"some dir/a b/c.pck\"").unwrap();
        let plain = normalize("some dir/a b/c.pck").unwrap();
        assert_eq!(quoted, plain);
    }

    #[test]
    fn test_dot_components_are_folded() {
        let path = normalize("./assets/../assets/./textures/").unwrap();
        assert_eq!(path, cwd().join("assets").join("textures"));
    }

    #[test]
    fn test_trailing_separator_is_dropped() {
        assert_eq!(normalize("assets/").unwrap(), cwd().join("assets"));
    }

    #[test]
    fn test_empty_and_nul_are_rejected() {
        let err = normalize("").unwrap_err();
        assert_eq!(err.reason, "path is empty");

        let err = normalize("\"\"").unwrap_err();
        assert_eq!(err.value, "\"\"");

        let err = normalize("bad\0name.pck").unwrap_err();
        assert_eq!(err.reason, "path contains a NUL character");
    }

    #[test]
    fn test_parent_dir_at_root_stays_at_root() {
        let root = cwd().ancestors().last().unwrap().to_path_buf();
        let escaped = root.join("..").join("x");
        assert_eq!(clean(&escaped), root.join("x"));
    }

    #[test]
    fn test_is_self_path() {
        let exe = cwd().join("godot-pck-tool");
        assert!(is_self_path("godot-pck-tool", &exe).unwrap());
        assert!(is_self_path("\"./godot-pck-tool\"", &exe).unwrap());
        assert!(!is_self_path("-i", &exe).unwrap());
        assert!(is_self_path("", &exe).is_err());
    }
}
