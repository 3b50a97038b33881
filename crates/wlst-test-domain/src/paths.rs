use std::path::{Path, PathBuf};

/// Canonical form of `path` when it can be resolved, otherwise its absolute form.
///
/// Never fails: paths that do not exist yet (staging directories, for example)
/// fall back to being made absolute against the current directory.
pub fn canonical_or_absolute(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(_) => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}

/// Joins a relative `path` onto `root`; absolute paths are returned unchanged.
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
