//! Tool lookup on PATH.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. A tool given as a
/// path (absolute or containing a separator) is checked directly. On Windows
/// the `.exe` suffix is tried when the bare name is not found.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(tool);
    if direct.components().count() > 1 || direct.is_absolute() {
        return (direct.is_file() && is_executable(direct)).then(|| direct.to_path_buf());
    }

    let suffixed = format!("{}{}", tool, std::env::consts::EXE_SUFFIX);
    for dir in path_entries {
        for name in [tool, suffixed.as_str()] {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_tool(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[test]
    fn resolves_first_matching_entry() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        make_tool(second.path(), "ffmpeg");
        let expected = make_tool(first.path(), "ffmpeg");

        let found = resolve_tool_path(
            "ffmpeg",
            &[first.path().to_path_buf(), second.path().to_path_buf()],
        );
        assert_eq!(found, Some(expected));
    }

    #[test]
    fn missing_tool_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_tool_path("ffmpeg", &[dir.path().to_path_buf()]).is_none());
    }

    #[test]
    fn explicit_path_is_checked_directly() {
        let dir = TempDir::new().unwrap();
        let tool = make_tool(dir.path(), "my-ffmpeg");
        let found = resolve_tool_path(tool.to_str().unwrap(), &[]);
        assert_eq!(found, Some(tool));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ffmpeg"), "data").unwrap();
        assert!(resolve_tool_path("ffmpeg", &[dir.path().to_path_buf()]).is_none());
    }

    #[test]
    fn parse_system_path_does_not_panic() {
        let _ = parse_system_path();
    }
}
