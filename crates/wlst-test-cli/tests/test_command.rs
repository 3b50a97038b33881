mod common;

use common::{parse_json, wlst_test};

#[test]
fn help_lists_both_commands() {
    let temp = tempfile::tempdir().expect("tempdir");
    let assert = wlst_test(temp.path()).arg("--help").assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 help");
    assert!(output.contains("test"), "help missing test: {output}");
    assert!(output.contains("plan"), "help missing plan: {output}");
}

#[test]
fn missing_wlst_directory_is_a_configuration_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let assert = wlst_test(temp.path())
        .args(["--json", "test"])
        .assert()
        .code(1);
    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "user-error");
    assert_eq!(payload["details"]["code"], "WLSTTEST-004");
    assert_eq!(payload["details"]["parameter"], "wlstScriptDirectory");
    assert_eq!(payload["details"]["failed_after"], "idle");
}

#[test]
fn skip_flag_from_environment_short_circuits() {
    let temp = tempfile::tempdir().expect("tempdir");
    let assert = wlst_test(temp.path())
        .env("WLST_TEST_SKIP", "true")
        .args(["--json", "test"])
        .assert()
        .success();
    let payload = parse_json(&assert);
    assert_eq!(payload["details"]["stage"], "skipped");
    assert_eq!(payload["details"]["code"], "WLSTTEST-018");
}

#[test]
fn malformed_config_file_is_reported_with_its_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join("wlst-test.toml"), "verbosity = ").expect("write");
    let assert = wlst_test(temp.path())
        .args(["--json", "test"])
        .assert()
        .code(1);
    let payload = parse_json(&assert);
    assert_eq!(payload["details"]["code"], "WLSTTEST-024");
}

#[cfg(unix)]
mod with_fake_launcher {
    use super::common::{parse_json, wlst_project, wlst_project_with_output, wlst_test};

    #[test]
    fn no_tests_found_is_a_successful_no_op() {
        let fixture = wlst_project(&[], 0);
        let assert = wlst_test(&fixture.root)
            .args(["--json", "test"])
            .assert()
            .success();
        let payload = parse_json(&assert);
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["details"]["code"], "WLSTTEST-012");
        assert!(!fixture.staging().exists());
        assert!(!fixture.record.exists());
    }

    #[test]
    fn runs_launcher_with_staged_arguments_and_environment() {
        let fixture = wlst_project(&["b_test.py", "a_test.py"], 0);
        wlst_test(&fixture.root)
            .env("WLST_TEST_INHERITED", "kept")
            .args(["test", "-e", "ORACLE_HOME=/opt/oracle"])
            .assert()
            .success();

        let staged_test = fixture.staging().join("test");
        let staged_main = fixture.staging().join("main");
        assert!(staged_main.join("deployer.py").is_file());
        assert!(staged_test.join("_wlst_test_driver.py").is_file());

        let args = fixture.recorded_args();
        assert_eq!(
            args,
            vec![
                "-skipWLSModuleScanning".to_string(),
                "_wlst_test_driver.py".to_string(),
                staged_main.display().to_string(),
                staged_test.display().to_string(),
                "2".to_string(),
                staged_test.join("a_test.py").display().to_string(),
                staged_test.join("b_test.py").display().to_string(),
            ]
        );
        assert_eq!(
            fixture.recorded_value("cwd"),
            Some(staged_test.display().to_string())
        );
        let classpath = fixture.recorded_value("WLST_EXT_CLASSPATH").expect("classpath");
        assert!(classpath.ends_with("target/classes"), "{classpath}");
        assert_eq!(fixture.recorded_value("CLASSPATH").as_deref(), Some("<unset>"));
        assert_eq!(
            fixture.recorded_value("WLST_PROPERTIES").as_deref(),
            Some("<unset>")
        );
        assert_eq!(
            fixture.recorded_value("ORACLE_HOME").as_deref(),
            Some("/opt/oracle")
        );
        assert_eq!(fixture.recorded_value("INHERITED").as_deref(), Some("kept"));
    }

    #[test]
    fn legacy_mode_and_debug_shape_the_environment() {
        let fixture = wlst_project(&["a_test.py"], 0);
        wlst_test(&fixture.root)
            .args([
                "-v",
                "test",
                "--using-old-wlst-version",
                "--scan-modules",
                "--ext-classpath",
                "org.antlr:antlr4-runtime:jar",
                "--resolve",
                "org.antlr:antlr4-runtime:jar=/repo/antlr4-runtime.jar",
                "-D",
                "weblogic.Name=AdminServer",
            ])
            .assert()
            .success();

        assert_eq!(
            fixture.recorded_value("WLST_EXT_CLASSPATH").as_deref(),
            Some("<unset>")
        );
        let classpath = fixture.recorded_value("CLASSPATH").expect("classpath");
        assert!(classpath.starts_with("/repo/antlr4-runtime.jar:"), "{classpath}");
        assert_eq!(
            fixture.recorded_value("WLST_PROPERTIES").as_deref(),
            Some("-Dwlst.test.plugin.debug=true -Dweblogic.Name=AdminServer")
        );
        assert_eq!(
            fixture.recorded_args().first().map(String::as_str),
            Some("_wlst_test_driver.py")
        );
    }

    #[test]
    fn json_envelope_survives_launcher_output() {
        let fixture = wlst_project_with_output(
            &["a_test.py"],
            0,
            "Ran 1 test in 0.001s\n\nOK\n",
        );
        let assert = wlst_test(&fixture.root)
            .args(["--json", "test"])
            .assert()
            .success();
        let payload = parse_json(&assert);
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["details"]["stage"], "succeeded");
        let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr");
        assert!(stderr.contains("Ran 1 test"), "{stderr}");
    }

    #[test]
    fn human_output_keeps_launcher_stdout() {
        let fixture = wlst_project_with_output(&["a_test.py"], 0, "Ran 1 test in 0.001s\n");
        let assert = wlst_test(&fixture.root).arg("test").assert().success();
        let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
        assert!(stdout.contains("Ran 1 test"), "{stdout}");
    }

    #[test]
    fn failing_tests_exit_with_two() {
        let fixture = wlst_project(&["a_test.py"], 2);
        let assert = wlst_test(&fixture.root)
            .args(["--json", "test"])
            .assert()
            .code(2);
        let payload = parse_json(&assert);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["details"]["code"], "WLSTTEST-023");
        assert_eq!(payload["details"]["exit_code"], 2);
        assert_eq!(payload["details"]["failed_after"], "invoked");
    }

    #[test]
    fn reserved_variable_fails_before_staging() {
        let fixture = wlst_project(&["a_test.py"], 0);
        let assert = wlst_test(&fixture.root)
            .args(["--json", "test", "-e", "WLST_PROPERTIES=-Dx=y"])
            .assert()
            .code(1);
        let payload = parse_json(&assert);
        assert_eq!(payload["details"]["code"], "WLSTTEST-017");
        assert_eq!(payload["details"]["field"], "systemProperties");
        assert!(!fixture.staging().exists());
        assert!(!fixture.record.exists());
    }

    #[test]
    fn invalid_verbosity_is_rejected() {
        let fixture = wlst_project(&["a_test.py"], 0);
        let assert = wlst_test(&fixture.root)
            .args(["--json", "test", "--verbosity", "5"])
            .assert()
            .code(1);
        let payload = parse_json(&assert);
        assert_eq!(payload["details"]["code"], "WLSTTEST-019");
        assert!(!fixture.staging().exists());
    }

    #[test]
    fn plan_reports_the_invocation_without_running_it() {
        let fixture = wlst_project(&["a_test.py"], 0);
        let assert = wlst_test(&fixture.root)
            .args(["--json", "plan"])
            .assert()
            .success();
        let payload = parse_json(&assert);
        let details = &payload["details"];
        let staged_test = fixture.staging().join("test");
        assert_eq!(details["cwd"], staged_test.display().to_string());
        assert_eq!(details["arguments"][1], "_wlst_test_driver.py");
        assert_eq!(
            details["tests"][0],
            staged_test.join("a_test.py").display().to_string()
        );
        assert!(details["environment"]["WLST_EXT_CLASSPATH"].is_string());
        assert!(!fixture.staging().exists());
        assert!(!fixture.record.exists());
    }

    #[test]
    fn plan_prints_a_readable_summary() {
        let fixture = wlst_project(&["a_test.py"], 0);
        let assert = wlst_test(&fixture.root).arg("plan").assert().success();
        let output = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
        assert!(output.contains("wlst-test plan: would run 1 WLST test file(s)"), "{output}");
        assert!(output.contains("arguments:"), "{output}");
        assert!(output.contains("-skipWLSModuleScanning"), "{output}");
    }
}
