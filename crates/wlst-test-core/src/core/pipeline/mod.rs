//! The test pipeline: validate, discover, stage, write the driver, build the
//! environment and arguments, then run the WLST launcher.

pub(crate) mod arguments;
pub(crate) mod discover;
pub(crate) mod driver;
pub(crate) mod environment;
pub(crate) mod invoke;
pub(crate) mod staging;
pub(crate) mod validate;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use wlst_test_domain::{canonical_or_absolute, TestConfig};

use crate::core::config::CommandContext;
use crate::core::runtime::Effects;
use crate::core::tooling::diagnostics::codes;
use crate::core::tooling::errors::WlstTestError;
use crate::core::tooling::outcome::ExecutionOutcome;

use arguments::{ArgumentVector, ArgumentVectorBuilder};
use discover::{discover_test_files, TestFile};
use environment::{EnvironmentBuilder, EnvironmentSet};
use staging::StagingLayout;

/// Where a pipeline run currently is, or where it stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Idle,
    Validated,
    Discovered,
    Staged,
    DriverWritten,
    Invoked,
    Succeeded,
    Failed,
    Skipped,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validated => "validated",
            Self::Discovered => "discovered",
            Self::Staged => "staged",
            Self::DriverWritten => "driver-written",
            Self::Invoked => "invoked",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct TestReport {
    pub stage: Stage,
    pub tests: Vec<TestFile>,
    pub layout: Option<StagingLayout>,
    pub exit_code: Option<i32>,
}

/// Everything a run would hand to the launcher, computed without writing anything.
#[derive(Clone, Debug)]
pub struct TestPlan {
    pub entry_point: PathBuf,
    pub layout: StagingLayout,
    pub tests: Vec<TestFile>,
    pub environment: EnvironmentSet,
    pub arguments: ArgumentVector,
}

pub struct Pipeline<'a> {
    config: &'a TestConfig,
    effects: &'a dyn Effects,
    debug: bool,
    stdout_to_stderr: bool,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a TestConfig, effects: &'a dyn Effects, debug: bool) -> Self {
        Self {
            config,
            effects,
            debug,
            stdout_to_stderr: false,
            stage: Stage::Idle,
        }
    }

    /// Routes the launcher's stdout to stderr, as `--json` output needs.
    pub fn forward_stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    /// Last stage reached; on error this is the stage the failure happened after.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = %self.stage, to = %next, "pipeline stage");
        self.stage = next;
    }

    pub fn run(&mut self) -> Result<TestReport, WlstTestError> {
        let config = self.config;
        if config.skip_tests {
            info!(code = codes::TESTS_SKIPPED, "[WLSTTEST-018] tests are skipped");
            self.advance(Stage::Skipped);
            return Ok(self.report(Vec::new(), None, None));
        }

        let validated = validate::validate(config)?;
        self.advance(Stage::Validated);

        if discover_test_files(&config.tests_root).is_empty() {
            info!(
                code = codes::NO_TESTS_FOUND,
                "[WLSTTEST-012] no tests found under {}",
                config.tests_root.display()
            );
            self.advance(Stage::Succeeded);
            return Ok(self.report(Vec::new(), None, None));
        }
        self.advance(Stage::Discovered);

        // Reserved-name conflicts are configuration errors; catch them before
        // anything is written.
        let mut environment = EnvironmentBuilder::new(config, self.debug).build()?;

        let layout = staging::stage(config, self.effects.copier())?;
        let tests = discover_test_files(&layout.test);
        self.advance(Stage::Staged);

        driver::write_driver_script(&layout.test)?;
        self.advance(Stage::DriverWritten);

        let arguments =
            ArgumentVectorBuilder::new(&layout, config.verbosity, config.skip_module_scanning)
                .build(&tests);
        let tools = &config.tool_versions;
        debug!(
            dependency_resolver = %tools.dependency_resolver,
            resource_copier = %tools.resource_copier,
            process_runner = %tools.process_runner,
            "delegated tool versions"
        );
        invoke::resolve_placeholders(&mut environment, self.effects.resolver())?;
        let output = invoke::invoke(
            self.effects.runner(),
            &validated.entry_point,
            &environment,
            arguments,
            &layout.test,
            self.stdout_to_stderr,
        )?;
        self.advance(Stage::Invoked);

        if output.code != 0 {
            return Err(WlstTestError::TestsFailed { code: output.code });
        }
        self.advance(Stage::Succeeded);
        Ok(self.report(tests, Some(layout), Some(output.code)))
    }

    /// Validates and computes the staged invocation without staging or running.
    pub fn plan(&mut self) -> Result<TestPlan, WlstTestError> {
        let config = self.config;
        let validated = validate::validate(config)?;
        self.advance(Stage::Validated);

        let layout = StagingLayout::for_config(config).resolved();
        let tests_root = canonical_or_absolute(&config.tests_root);
        let tests: Vec<TestFile> = discover_test_files(&config.tests_root)
            .iter()
            .map(|test| test.relocated(&tests_root, &layout.test))
            .collect();
        self.advance(Stage::Discovered);

        let mut environment = EnvironmentBuilder::new(config, self.debug).build()?;
        invoke::resolve_placeholders(&mut environment, self.effects.resolver())?;
        let arguments =
            ArgumentVectorBuilder::new(&layout, config.verbosity, config.skip_module_scanning)
                .build(&tests);
        Ok(TestPlan {
            entry_point: validated.entry_point,
            layout,
            tests,
            environment,
            arguments,
        })
    }

    fn report(
        &self,
        tests: Vec<TestFile>,
        layout: Option<StagingLayout>,
        exit_code: Option<i32>,
    ) -> TestReport {
        TestReport {
            stage: self.stage,
            tests,
            layout,
            exit_code,
        }
    }
}

/// Runs the staged WLST tests for `config` and shapes the result for output.
pub fn test_project(ctx: &CommandContext, config: &TestConfig) -> ExecutionOutcome {
    let mut pipeline = Pipeline::new(config, ctx.effects(), ctx.global.debug_enabled())
        .forward_stdout_to_stderr(ctx.global.json);
    match pipeline.run() {
        Ok(report) => report_outcome(config, &report),
        Err(err) => failure_outcome(&err, pipeline.stage()),
    }
}

/// Shows what `test_project` would run without writing or launching anything.
pub fn plan_project(ctx: &CommandContext, config: &TestConfig) -> ExecutionOutcome {
    let mut pipeline = Pipeline::new(config, ctx.effects(), ctx.global.debug_enabled());
    match pipeline.plan() {
        Ok(plan) => {
            let message = if plan.tests.is_empty() {
                format!("no WLST tests found under {}", config.tests_root.display())
            } else {
                format!("would run {} WLST test file(s)", plan.tests.len())
            };
            ExecutionOutcome::success(
                message,
                json!({
                    "stage": pipeline.stage(),
                    "program": plan.entry_point.display().to_string(),
                    "cwd": plan.layout.test.display().to_string(),
                    "staging": layout_details(&plan.layout),
                    "tests": test_paths(&plan.tests),
                    "environment": plan.environment,
                    "arguments": plan.arguments,
                }),
            )
        }
        Err(err) => failure_outcome(&err, pipeline.stage()),
    }
}

fn report_outcome(config: &TestConfig, report: &TestReport) -> ExecutionOutcome {
    let message = match report.stage {
        Stage::Skipped => "WLST tests skipped".to_string(),
        _ if report.tests.is_empty() => {
            format!("no WLST tests found under {}", config.tests_root.display())
        }
        _ => format!("{} WLST test file(s) passed", report.tests.len()),
    };
    let mut details = json!({
        "stage": report.stage,
        "tests": test_paths(&report.tests),
    });
    if let Some(layout) = &report.layout {
        details["staging"] = layout_details(layout);
    }
    if let Some(code) = report.exit_code {
        details["exit_code"] = json!(code);
    }
    match report.stage {
        Stage::Skipped => details["code"] = json!(codes::TESTS_SKIPPED),
        _ if report.tests.is_empty() => details["code"] = json!(codes::NO_TESTS_FOUND),
        _ => {}
    }
    ExecutionOutcome::success(message, details)
}

fn failure_outcome(err: &WlstTestError, failed_after: Stage) -> ExecutionOutcome {
    let mut outcome = ExecutionOutcome::from_error(err);
    outcome.insert_detail("stage", json!(Stage::Failed));
    outcome.insert_detail("failed_after", json!(failed_after));
    outcome
}

fn test_paths(tests: &[TestFile]) -> Vec<String> {
    tests
        .iter()
        .map(|test| test.path().display().to_string())
        .collect()
}

fn layout_details(layout: &StagingLayout) -> Value {
    json!({
        "base": layout.base.display().to_string(),
        "main": layout.main.display().to_string(),
        "test": layout.test.display().to_string(),
        "driver": layout.driver_script().display().to_string(),
    })
}
