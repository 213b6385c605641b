//! External tool resolution.
//!
//! ffmpeg and ffprobe are located through environment variables or the
//! config file rather than hard-coded paths. An explicit path must exist
//! and be executable; a bare name must resolve somewhere on PATH. Both
//! checks run before the first file is processed.

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ToolSettings;

/// Environment variable overriding the ffmpeg location.
pub const FFMPEG_ENV: &str = "BWSPLIT_FFMPEG";

/// Environment variable overriding the ffprobe location.
pub const FFPROBE_ENV: &str = "BWSPLIT_FFPROBE";

/// Error type for tool resolution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Configured path does not point at a file.
    #[error("{tool} not found at configured path: {path}")]
    NotFound { tool: &'static str, path: String },

    /// Configured path exists but is not executable.
    #[error("{tool} at {path} is not executable")]
    NotExecutable { tool: &'static str, path: String },

    /// Bare name was not found anywhere on PATH.
    #[error("{tool} ({name}) not found on PATH")]
    NotOnPath { tool: &'static str, name: String },
}

/// Resolved locations of the external tools.
#[derive(Debug, Clone)]
pub struct Tools {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Tools {
    /// Resolve both tools, checking existence and executability up front.
    ///
    /// Resolution order per tool: environment variable, then the
    /// configured path or name from the `[tools]` section.
    pub fn resolve(settings: &ToolSettings) -> Result<Self, ToolError> {
        Ok(Self {
            ffmpeg: resolve_tool("ffmpeg", FFMPEG_ENV, &settings.ffmpeg)?,
            ffprobe: resolve_tool("ffprobe", FFPROBE_ENV, &settings.ffprobe)?,
        })
    }
}

fn resolve_tool(
    tool: &'static str,
    env_var: &str,
    configured: &str,
) -> Result<PathBuf, ToolError> {
    let candidate = env::var(env_var).unwrap_or_else(|_| configured.to_string());

    // A candidate with a separator is an explicit path; a bare name goes
    // through PATH lookup.
    if candidate.contains(['/', '\\']) {
        return check_explicit(tool, PathBuf::from(candidate));
    }

    find_on_path(&candidate).ok_or(ToolError::NotOnPath {
        tool,
        name: candidate,
    })
}

fn check_explicit(tool: &'static str, path: PathBuf) -> Result<PathBuf, ToolError> {
    if !path.is_file() {
        return Err(ToolError::NotFound {
            tool,
            path: path.display().to_string(),
        });
    }
    if !is_executable(&path) {
        return Err(ToolError::NotExecutable {
            tool,
            path: path.display().to_string(),
        });
    }
    Ok(path)
}

/// Search the PATH entries for an executable with the given name.
fn find_on_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_must_exist() {
        let result = resolve_tool("ffmpeg", "BWSPLIT_TEST_UNSET", "/nonexistent/dir/ffmpeg");
        assert!(matches!(result, Err(ToolError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn explicit_path_must_be_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ffprobe");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let result = check_explicit("ffprobe", path.clone());
        assert!(matches!(result, Err(ToolError::NotExecutable { .. })));

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(check_explicit("ffprobe", path.clone()).unwrap(), path);
    }

    #[cfg(unix)]
    #[test]
    fn bare_name_resolves_on_path() {
        // `sh` is present on any unix PATH worth running tests on.
        let found = find_on_path("sh");
        assert!(found.is_some());
    }

    #[test]
    fn unknown_bare_name_is_rejected() {
        let result = resolve_tool("ffmpeg", "BWSPLIT_TEST_UNSET", "no-such-binary-bwsplit");
        assert!(matches!(result, Err(ToolError::NotOnPath { .. })));
    }
}
