use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::tooling::errors::WlstTestError;

pub const DRIVER_SCRIPT_NAME: &str = "_wlst_test_driver.py";

const DRIVER_SCRIPT: &str = include_str!("_wlst_test_driver.py");

/// Writes the bundled driver into `test_dir`, replacing any previous copy.
pub(crate) fn write_driver_script(test_dir: &Path) -> Result<PathBuf, WlstTestError> {
    write_payload(DRIVER_SCRIPT, &test_dir.join(DRIVER_SCRIPT_NAME))
}

fn write_payload(payload: &str, dest: &Path) -> Result<PathBuf, WlstTestError> {
    if payload.is_empty() {
        return Err(WlstTestError::DriverMissing {
            name: DRIVER_SCRIPT_NAME,
        });
    }
    fs::write(dest, payload).map_err(|source| WlstTestError::DriverWrite {
        path: dest.to_path_buf(),
        source,
    })?;
    debug!(path = %dest.display(), bytes = payload.len(), "driver script written");
    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::environment::DEBUG_PROPERTY;
    use crate::core::tooling::diagnostics::codes;
    use tempfile::tempdir;

    #[test]
    fn driver_is_written_verbatim() {
        let temp = tempdir().expect("tempdir");
        let path = write_driver_script(temp.path()).expect("write");
        assert_eq!(path, temp.path().join(DRIVER_SCRIPT_NAME));
        assert_eq!(fs::read_to_string(&path).expect("read"), DRIVER_SCRIPT);
        write_driver_script(temp.path()).expect("rewrite is fine");
    }

    #[test]
    fn bundled_driver_reads_the_debug_property() {
        assert!(DRIVER_SCRIPT.contains(DEBUG_PROPERTY));
        assert!(DRIVER_SCRIPT.contains("'wlst.test.plugin.debug'"));
        assert!(DRIVER_SCRIPT.contains("sys.exit"));
    }

    #[test]
    fn empty_payload_is_a_packaging_error() {
        let temp = tempdir().expect("tempdir");
        let err = write_payload("", &temp.path().join(DRIVER_SCRIPT_NAME)).expect_err("empty");
        assert_eq!(err.code(), codes::DRIVER_MISSING);
    }

    #[test]
    fn write_failures_carry_the_path() {
        let temp = tempdir().expect("tempdir");
        let missing_dir = temp.path().join("absent");
        let err = write_driver_script(&missing_dir).expect_err("no parent");
        assert_eq!(err.code(), codes::DRIVER_WRITE);
        assert!(err.to_string().contains("absent"), "{err}");
    }
}
