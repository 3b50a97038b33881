#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::{assert::Assert, cargo::cargo_bin_cmd, Command};
use serde_json::Value;
use tempfile::TempDir;

pub struct Fixture {
    _temp: TempDir,
    pub root: PathBuf,
    pub record: PathBuf,
}

impl Fixture {
    pub fn staging(&self) -> PathBuf {
        self.root.join("target").join("wlst-tests")
    }

    /// Lines the fake launcher wrote, as `(key, value)` pairs in order.
    pub fn recorded(&self) -> Vec<(String, String)> {
        let contents = fs::read_to_string(&self.record).expect("launcher record");
        contents
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    pub fn recorded_value(&self, key: &str) -> Option<String> {
        self.recorded()
            .into_iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn recorded_args(&self) -> Vec<String> {
        self.recorded()
            .into_iter()
            .filter(|(name, _)| name == "arg")
            .map(|(_, value)| value)
            .collect()
    }
}

/// A project with a fake `wlst.sh` that records its invocation and exits with `exit_code`.
#[cfg(unix)]
pub fn wlst_project(test_files: &[&str], exit_code: i32) -> Fixture {
    wlst_project_with_output(test_files, exit_code, "")
}

/// Like [`wlst_project`], with the launcher also printing `stdout` to its stdout.
#[cfg(unix)]
pub fn wlst_project_with_output(test_files: &[&str], exit_code: i32, stdout: &str) -> Fixture {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::Builder::new()
        .prefix("wlst-test-cli")
        .tempdir()
        .expect("tempdir");
    let root = temp.path().canonicalize().expect("canonical tempdir");
    let record = root.join("launcher.record");

    let bin = root.join("oracle").join("common").join("bin");
    fs::create_dir_all(&bin).expect("wlst dir");
    let script = bin.join("wlst.sh");
    fs::write(&script, fake_launcher(&record, exit_code, stdout)).expect("fake wlst.sh");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");

    let sources = root.join("src/main/python");
    fs::create_dir_all(&sources).expect("sources");
    fs::write(sources.join("deployer.py"), "def deploy():\n    return True\n").expect("source");
    let tests = root.join("src/test/python");
    fs::create_dir_all(&tests).expect("tests");
    for name in test_files {
        fs::write(tests.join(name), "import unittest\n").expect("test file");
    }

    fs::write(
        root.join("wlst-test.toml"),
        format!("wlstScriptDirectory = '{}'\n", bin.display()),
    )
    .expect("config");

    Fixture {
        _temp: temp,
        root,
        record,
    }
}

fn fake_launcher(record: &Path, exit_code: i32, stdout: &str) -> String {
    format!(
        r#"#!/bin/sh
{{
  echo "cwd=$(pwd)"
  for arg in "$@"; do echo "arg=$arg"; done
  echo "WLST_EXT_CLASSPATH=${{WLST_EXT_CLASSPATH-<unset>}}"
  echo "CLASSPATH=${{CLASSPATH-<unset>}}"
  echo "WLST_PROPERTIES=${{WLST_PROPERTIES-<unset>}}"
  echo "ORACLE_HOME=${{ORACLE_HOME-<unset>}}"
  echo "INHERITED=${{WLST_TEST_INHERITED-<unset>}}"
}} > '{record}'
printf '%s' '{stdout}'
exit {exit_code}
"#,
        record = record.display(),
    )
}

pub fn wlst_test(root: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("wlst-test");
    cmd.current_dir(root)
        .env_remove("WLST_SCRIPT_DIRECTORY")
        .env_remove("WLST_TEST_SKIP")
        .env_remove("CLASSPATH")
        .env_remove("WLST_EXT_CLASSPATH")
        .env_remove("WLST_PROPERTIES")
        .env("NO_COLOR", "1");
    cmd
}

pub fn parse_json(assert: &Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(stdout.trim()).unwrap_or_else(|err| panic!("invalid json {stdout}: {err}"))
}
