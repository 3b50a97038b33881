use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use walkdir::WalkDir;
use wlst_test_domain::canonical_or_absolute;

/// Lowercased file-name suffix that marks a test module.
pub const TEST_FILE_SUFFIX: &str = "test.py";

/// A discovered test module, identified by its canonical path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TestFile {
    path: PathBuf,
}

impl TestFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// The same file re-rooted from `from` to `to`; unchanged if it is not under `from`.
    pub(crate) fn relocated(&self, from: &Path, to: &Path) -> Self {
        match self.path.strip_prefix(from) {
            Ok(rel) => Self { path: to.join(rel) },
            Err(_) => self.clone(),
        }
    }
}

/// Recursively collects `*test.py` files below `root`, depth first with
/// siblings in file-name order.
///
/// A missing or non-directory root yields no files. Unreadable entries are
/// skipped.
pub fn discover_test_files(root: &Path) -> Vec<TestFile> {
    if !root.is_dir() {
        return Vec::new();
    }
    let mut found = IndexSet::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if entry.file_type().is_dir() {
            continue;
        }
        if is_test_file_name(&entry.file_name().to_string_lossy()) {
            found.insert(TestFile {
                path: canonical_or_absolute(entry.path()),
            });
        }
    }
    found.into_iter().collect()
}

fn is_test_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(TEST_FILE_SUFFIX)
}
