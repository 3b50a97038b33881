use std::path::Path;

use wlst_test_domain::{resolve_against, TestConfig, CONFIG_FILE_NAME};

use crate::core::runtime::{Effects, SharedEffects};
use crate::core::tooling::errors::WlstTestError;

#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub quiet: bool,
    pub verbose: u8,
    pub trace: bool,
    pub json: bool,
}

impl GlobalOptions {
    /// `-v` or `--trace` also asks the driver script for its debug output.
    pub fn debug_enabled(&self) -> bool {
        self.trace || self.verbose > 0
    }
}

pub struct CommandContext<'a> {
    pub global: &'a GlobalOptions,
    effects: SharedEffects,
}

impl<'a> CommandContext<'a> {
    pub fn new(global: &'a GlobalOptions, effects: SharedEffects) -> Self {
        Self { global, effects }
    }

    pub fn effects(&self) -> &dyn Effects {
        self.effects.as_ref()
    }
}

/// Loads `wlst-test.toml` (or `config_path`) for `project_root`.
pub fn load_test_config(
    project_root: &Path,
    config_path: Option<&Path>,
) -> Result<TestConfig, WlstTestError> {
    TestConfig::load(project_root, config_path).map_err(|source| WlstTestError::ConfigFile {
        path: config_path.map_or_else(
            || project_root.join(CONFIG_FILE_NAME),
            |path| resolve_against(project_root, path),
        ),
        source,
    })
}
