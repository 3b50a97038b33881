use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ignore::{overrides::OverrideBuilder, WalkBuilder};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CopySummary {
    pub files: usize,
    pub bytes: u64,
}

/// Copies every file under `source` matching `include` into `dest`, keeping
/// relative paths and overwriting files that are already present.
///
/// Ignore files and hidden-file rules are not honored: staging must mirror the
/// tree exactly.
pub(crate) fn copy_tree(source: &Path, dest: &Path, include: &str) -> Result<CopySummary> {
    let mut overrides = OverrideBuilder::new(source);
    overrides
        .add(include)
        .with_context(|| format!("invalid include pattern `{include}`"))?;
    let overrides = overrides
        .build()
        .with_context(|| format!("invalid include pattern `{include}`"))?;

    fs::create_dir_all(dest).with_context(|| format!("failed to create {}", dest.display()))?;

    let mut walker = WalkBuilder::new(source);
    walker
        .standard_filters(false)
        .hidden(false)
        .overrides(overrides)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut summary = CopySummary::default();
    for entry in walker.build() {
        let entry = entry.with_context(|| format!("failed to walk {}", source.display()))?;
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(source) else {
            continue;
        };
        if rel.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(rel);
        if entry.file_type().is_some_and(|kind| kind.is_dir()) {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let bytes = fs::copy(path, &target).with_context(|| {
            format!("failed to copy {} to {}", path.display(), target.display())
        })?;
        summary.files += 1;
        summary.bytes += bytes;
    }
    Ok(summary)
}
