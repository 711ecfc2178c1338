use std::path::{Path, PathBuf};

/// Returns an absolute version of the provided path without touching the filesystem.
/// Falls back to the original path if the current working directory cannot be resolved.
pub fn absolutize<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        return path.to_path_buf();
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Resolves a path as written in a record list against an optional root folder.
/// Absolute listed paths are used as-is.
pub fn resolve_listed(root: Option<&Path>, listed: &str) -> PathBuf {
    let listed = Path::new(listed);
    match root {
        Some(root) if !listed.is_absolute() => root.join(listed),
        _ => listed.to_path_buf(),
    }
}

/// Returns true when `dir` exists and holds at least one entry.
pub fn dir_has_entries(dir: &Path) -> std::io::Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    if !dir.is_dir() {
        return Ok(true);
    }
    Ok(std::fs::read_dir(dir)?.next().is_some())
}
