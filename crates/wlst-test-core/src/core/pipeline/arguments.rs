use serde::Serialize;
use tracing::debug;

use super::discover::TestFile;
use super::driver::DRIVER_SCRIPT_NAME;
use super::staging::StagingLayout;

/// Launcher switch that stops WLST from scanning the server's module tree at startup.
pub const SKIP_MODULE_SCANNING_SWITCH: &str = "-skipWLSModuleScanning";

/// Positional arguments for the launcher; the driver script parses them by index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentVector {
    tokens: Vec<String>,
}

impl ArgumentVector {
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

pub struct ArgumentVectorBuilder<'a> {
    layout: &'a StagingLayout,
    verbosity: i64,
    skip_module_scanning: bool,
}

impl<'a> ArgumentVectorBuilder<'a> {
    pub fn new(layout: &'a StagingLayout, verbosity: i64, skip_module_scanning: bool) -> Self {
        Self {
            layout,
            verbosity,
            skip_module_scanning,
        }
    }

    pub fn build(&self, tests: &[TestFile]) -> ArgumentVector {
        let mut tokens = Vec::with_capacity(tests.len() + 5);
        if self.skip_module_scanning {
            tokens.push(SKIP_MODULE_SCANNING_SWITCH.to_string());
        }
        tokens.push(DRIVER_SCRIPT_NAME.to_string());
        tokens.push(self.layout.main.display().to_string());
        tokens.push(self.layout.test.display().to_string());
        tokens.push(self.verbosity.to_string());
        tokens.extend(tests.iter().map(|test| test.path().display().to_string()));
        for (index, token) in tokens.iter().enumerate() {
            debug!(index, %token, "argument");
        }
        ArgumentVector { tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::discover::discover_test_files;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn layout() -> StagingLayout {
        let base = PathBuf::from("/work/target/wlst-tests");
        StagingLayout {
            main: base.join("main"),
            test: base.join("test"),
            base,
        }
    }

    #[test]
    fn test_files_trail_in_discovery_order() {
        let temp = tempdir().expect("tempdir");
        for name in ["a_test.py", "b_test.py", "c_test.py"] {
            fs::write(temp.path().join(name), "").expect("write");
        }
        let tests = discover_test_files(temp.path());
        let layout = layout();

        let args = ArgumentVectorBuilder::new(&layout, 2, true).build(&tests);
        let tokens = args.as_slice();
        assert_eq!(tokens[0], SKIP_MODULE_SCANNING_SWITCH);
        assert_eq!(
            &tokens[1..5],
            &[
                DRIVER_SCRIPT_NAME.to_string(),
                layout.main.display().to_string(),
                layout.test.display().to_string(),
                "2".to_string(),
            ]
        );
        let trailing: Vec<_> = tests
            .iter()
            .map(|test| test.path().display().to_string())
            .collect();
        assert_eq!(&tokens[5..], trailing.as_slice());
        assert!(trailing[0].ends_with("a_test.py"));
        assert!(trailing[2].ends_with("c_test.py"));
    }

    #[test]
    fn switch_is_omitted_when_scanning_is_allowed() {
        let layout = layout();
        let args = ArgumentVectorBuilder::new(&layout, 0, false).build(&[]);
        assert_eq!(args.as_slice().len(), 4);
        assert_eq!(args.as_slice()[0], DRIVER_SCRIPT_NAME);
        assert_eq!(args.as_slice()[3], "0");
    }
}
