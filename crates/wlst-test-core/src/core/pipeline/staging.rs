use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use wlst_test_domain::{canonical_or_absolute, TestConfig};

use super::driver::DRIVER_SCRIPT_NAME;
use crate::core::runtime::TreeCopier;
use crate::core::tooling::errors::WlstTestError;

const STAGED_MAIN_DIR: &str = "main";
const STAGED_TEST_DIR: &str = "test";
const STAGE_EVERYTHING: &str = "**/*";

/// Where sources and tests are copied before the interpreter sees them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagingLayout {
    pub base: PathBuf,
    pub main: PathBuf,
    pub test: PathBuf,
}

impl StagingLayout {
    pub fn for_config(config: &TestConfig) -> Self {
        let base = config.staging_directory.clone();
        Self {
            main: base.join(STAGED_MAIN_DIR),
            test: base.join(STAGED_TEST_DIR),
            base,
        }
    }

    pub fn driver_script(&self) -> PathBuf {
        self.test.join(DRIVER_SCRIPT_NAME)
    }

    /// The same layout with canonical paths where they exist.
    #[must_use]
    pub fn resolved(&self) -> Self {
        Self {
            base: canonical_or_absolute(&self.base),
            main: canonical_or_absolute(&self.main),
            test: canonical_or_absolute(&self.test),
        }
    }
}

/// Creates the staging directories and copies sources and tests into them.
///
/// Existing directories and files are reused and overwritten; nothing is
/// removed first.
pub(crate) fn stage(
    config: &TestConfig,
    copier: &dyn TreeCopier,
) -> Result<StagingLayout, WlstTestError> {
    let layout = StagingLayout::for_config(config);
    ensure_directory("staging", &layout.base)?;
    ensure_directory("staged sources", &layout.main)?;
    ensure_directory("staged tests", &layout.test)?;

    if config.sources_root.is_dir() {
        copy_into(copier, &config.sources_root, &layout.main)?;
    } else {
        debug!(
            sources = %config.sources_root.display(),
            "no production sources to stage"
        );
    }
    copy_into(copier, &config.tests_root, &layout.test)?;
    Ok(layout.resolved())
}

fn ensure_directory(name: &'static str, path: &Path) -> Result<(), WlstTestError> {
    fs::create_dir_all(path).map_err(|source| WlstTestError::CreateDirectory {
        name,
        path: path.to_path_buf(),
        source,
    })
}

fn copy_into(copier: &dyn TreeCopier, from: &Path, to: &Path) -> Result<(), WlstTestError> {
    let summary = copier
        .copy_tree(from, to, STAGE_EVERYTHING)
        .map_err(|source| WlstTestError::CopyTree {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
    debug!(
        from = %from.display(),
        to = %to.display(),
        files = summary.files,
        bytes = summary.bytes,
        "staged tree"
    );
    Ok(())
}
