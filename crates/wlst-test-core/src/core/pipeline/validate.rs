use std::path::{Path, PathBuf};

use tracing::debug;
use wlst_test_domain::{canonical_or_absolute, TestConfig};

use crate::core::tooling::errors::WlstTestError;

/// Launcher script expected inside `wlstScriptDirectory`.
pub const WLST_ENTRY_POINT: &str = if cfg!(windows) { "wlst.cmd" } else { "wlst.sh" };

const WLST_DIRECTORY_PARAM: &str = "wlstScriptDirectory";
const TESTS_ROOT_PARAM: &str = "wlstTestsRootDirectory";
const SOURCES_ROOT_PARAM: &str = "wlstSourcesRootDirectory";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Validated {
    pub(crate) entry_point: PathBuf,
}

/// Checks the configuration without touching the filesystem beyond metadata reads.
pub(crate) fn validate(config: &TestConfig) -> Result<Validated, WlstTestError> {
    if !config.project_root.is_dir() {
        return Err(WlstTestError::ProjectRootMissing {
            path: config.project_root.clone(),
        });
    }
    if config.build_output_directory.as_os_str().is_empty() {
        return Err(WlstTestError::BuildOutputUnset);
    }
    if config.staging_directory.as_os_str().is_empty() {
        return Err(WlstTestError::StagingUnset);
    }

    let entry_point = validate_wlst_directory(config)?;
    validate_tests_root(&config.tests_root)?;
    validate_staging_placement(config)?;

    if !(0..=2).contains(&config.verbosity) {
        return Err(WlstTestError::InvalidVerbosity {
            value: config.verbosity,
        });
    }

    let tools = &config.tool_versions;
    if tools.dependency_resolver.trim().is_empty() {
        return Err(WlstTestError::ResolverVersionEmpty);
    }
    if tools.resource_copier.trim().is_empty() {
        return Err(WlstTestError::CopierVersionEmpty);
    }
    if tools.process_runner.trim().is_empty() {
        return Err(WlstTestError::RunnerVersionEmpty);
    }

    debug!(entry_point = %entry_point.display(), "configuration validated");
    Ok(Validated { entry_point })
}

fn validate_wlst_directory(config: &TestConfig) -> Result<PathBuf, WlstTestError> {
    let dir = match config.wlst_script_directory.as_deref() {
        Some(dir) if config.wlst_script_directory_is_set() => dir,
        _ => {
            return Err(WlstTestError::ParameterNotSet {
                name: WLST_DIRECTORY_PARAM,
            })
        }
    };
    require_directory(WLST_DIRECTORY_PARAM, dir)?;

    let entry_point = dir.join(WLST_ENTRY_POINT);
    if !entry_point.is_file() {
        return Err(WlstTestError::EntryPointMissing { path: entry_point });
    }
    if !is_executable(&entry_point) {
        return Err(WlstTestError::EntryPointNotExecutable { path: entry_point });
    }
    Ok(entry_point)
}

fn validate_tests_root(root: &Path) -> Result<(), WlstTestError> {
    if root.as_os_str().is_empty() {
        return Err(WlstTestError::ParameterNotSet {
            name: TESTS_ROOT_PARAM,
        });
    }
    require_directory(TESTS_ROOT_PARAM, root)
}

/// Rejects a staging directory inside either root that staging copies from.
fn validate_staging_placement(config: &TestConfig) -> Result<(), WlstTestError> {
    let roots = [
        (TESTS_ROOT_PARAM, config.tests_root.as_path()),
        (SOURCES_ROOT_PARAM, config.sources_root.as_path()),
    ];
    for (name, root) in roots {
        if root.as_os_str().is_empty() || !root.is_dir() {
            continue;
        }
        if is_within(&config.staging_directory, root) {
            return Err(WlstTestError::StagingInsideRoot {
                name,
                staging: config.staging_directory.clone(),
                root: root.to_path_buf(),
            });
        }
    }
    Ok(())
}

fn is_within(inner: &Path, outer: &Path) -> bool {
    inner.starts_with(outer)
        || canonical_or_absolute(inner).starts_with(canonical_or_absolute(outer))
}

fn require_directory(name: &'static str, path: &Path) -> Result<(), WlstTestError> {
    if !path.exists() {
        return Err(WlstTestError::DoesNotExist {
            name,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(WlstTestError::NotADirectory {
            name,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
