use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};

use super::diagnostics::codes;

/// Whether a failure came from bad settings or from doing the work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Configuration,
    Execution,
}

/// Errors surfaced by the test pipeline. Every message starts with its stable code.
#[derive(Debug, thiserror::Error)]
pub enum WlstTestError {
    #[error("[WLSTTEST-001] project root {} does not exist or is not a directory", .path.display())]
    ProjectRootMissing { path: PathBuf },
    #[error("[WLSTTEST-002] the build output directory is not set")]
    BuildOutputUnset,
    #[error("[WLSTTEST-003] the staging directory is not set")]
    StagingUnset,
    #[error("[WLSTTEST-004] the {name} parameter is required but was not set")]
    ParameterNotSet { name: &'static str },
    #[error("[WLSTTEST-005] the {name} parameter value {} is not a directory", .path.display())]
    NotADirectory { name: &'static str, path: PathBuf },
    #[error("[WLSTTEST-006] the {name} parameter value {} does not exist", .path.display())]
    DoesNotExist { name: &'static str, path: PathBuf },
    #[error("[WLSTTEST-007] the WLST script {} does not exist", .path.display())]
    EntryPointMissing { path: PathBuf },
    #[error("[WLSTTEST-008] the WLST script {} is not executable", .path.display())]
    EntryPointNotExecutable { path: PathBuf },
    #[error("[WLSTTEST-009] the dependency resolver version must not be empty")]
    ResolverVersionEmpty,
    #[error("[WLSTTEST-010] the resource copier version must not be empty")]
    CopierVersionEmpty,
    #[error("[WLSTTEST-011] the process runner version must not be empty")]
    RunnerVersionEmpty,
    #[error("[WLSTTEST-013] unable to create the {name} directory {}: {source}", .path.display())]
    CreateDirectory {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("[WLSTTEST-014] the bundled test driver script {name} is missing from this build")]
    DriverMissing { name: &'static str },
    #[error("[WLSTTEST-015] failed to write the test driver script to {}: {source}", .path.display())]
    DriverWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "[WLSTTEST-016] the staging directory {} must not be inside the {name} directory {}",
        .staging.display(),
        .root.display()
    )]
    StagingInsideRoot {
        name: &'static str,
        staging: PathBuf,
        root: PathBuf,
    },
    #[error(
        "[WLSTTEST-017] the {name} environment variable cannot be set through environmentVariables; use the {field} parameter instead"
    )]
    ReservedVariable { name: String, field: &'static str },
    #[error("[WLSTTEST-019] the verbosity parameter value {value} is invalid; expected 0, 1, or 2")]
    InvalidVerbosity { value: i64 },
    #[error("[WLSTTEST-020] failed to copy {} to {}: {source:#}", .from.display(), .to.display())]
    CopyTree {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("[WLSTTEST-021] failed to resolve the classpath property {coordinate}: {source:#}")]
    ResolveProperty {
        coordinate: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("[WLSTTEST-022] failed to launch {}: {source:#}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("[WLSTTEST-023] WLST tests failed (exit code {code})")]
    TestsFailed { code: i32 },
    #[error("[WLSTTEST-024] failed to load configuration: {source:#}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl WlstTestError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectRootMissing { .. } => codes::PROJECT_ROOT_MISSING,
            Self::BuildOutputUnset => codes::BUILD_OUTPUT_UNSET,
            Self::StagingUnset => codes::STAGING_UNSET,
            Self::ParameterNotSet { .. } => codes::PARAMETER_NOT_SET,
            Self::NotADirectory { .. } => codes::NOT_A_DIRECTORY,
            Self::DoesNotExist { .. } => codes::DOES_NOT_EXIST,
            Self::EntryPointMissing { .. } => codes::ENTRY_POINT_MISSING,
            Self::EntryPointNotExecutable { .. } => codes::ENTRY_POINT_NOT_EXECUTABLE,
            Self::ResolverVersionEmpty => codes::RESOLVER_VERSION_EMPTY,
            Self::CopierVersionEmpty => codes::COPIER_VERSION_EMPTY,
            Self::RunnerVersionEmpty => codes::RUNNER_VERSION_EMPTY,
            Self::CreateDirectory { .. } => codes::CREATE_DIRECTORY,
            Self::DriverMissing { .. } => codes::DRIVER_MISSING,
            Self::DriverWrite { .. } => codes::DRIVER_WRITE,
            Self::StagingInsideRoot { .. } => codes::STAGING_INSIDE_ROOT,
            Self::ReservedVariable { .. } => codes::RESERVED_VARIABLE,
            Self::InvalidVerbosity { .. } => codes::INVALID_VERBOSITY,
            Self::CopyTree { .. } => codes::COPY_TREE,
            Self::ResolveProperty { .. } => codes::RESOLVE_PROPERTY,
            Self::Launch { .. } => codes::LAUNCH,
            Self::TestsFailed { .. } => codes::TESTS_FAILED,
            Self::ConfigFile { .. } => codes::CONFIG_FILE,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CreateDirectory { .. }
            | Self::DriverMissing { .. }
            | Self::DriverWrite { .. }
            | Self::CopyTree { .. }
            | Self::ResolveProperty { .. }
            | Self::Launch { .. }
            | Self::TestsFailed { .. } => ErrorKind::Execution,
            _ => ErrorKind::Configuration,
        }
    }

    /// Structured context for the failure: the code plus the offending values.
    #[must_use]
    pub fn details(&self) -> Value {
        let mut details = match self {
            Self::ProjectRootMissing { path }
            | Self::EntryPointMissing { path }
            | Self::EntryPointNotExecutable { path } => json!({ "path": path.display().to_string() }),
            Self::ParameterNotSet { name } => json!({ "parameter": name }),
            Self::NotADirectory { name, path } | Self::DoesNotExist { name, path } => {
                json!({ "parameter": name, "path": path.display().to_string() })
            }
            Self::CreateDirectory { name, path, source } => json!({
                "directory": name,
                "path": path.display().to_string(),
                "error": source.to_string(),
            }),
            Self::DriverMissing { name } => json!({ "driver": name }),
            Self::DriverWrite { path, source } => json!({
                "path": path.display().to_string(),
                "error": source.to_string(),
            }),
            Self::StagingInsideRoot {
                name,
                staging,
                root,
            } => json!({
                "parameter": name,
                "staging": staging.display().to_string(),
                "root": root.display().to_string(),
                "hint": "point stagingDirectory outside the sources and tests roots",
            }),
            Self::ReservedVariable { name, field } => json!({
                "variable": name,
                "field": field,
                "hint": format!("remove {name} from environmentVariables and configure {field} instead"),
            }),
            Self::InvalidVerbosity { value } => json!({ "parameter": "verbosity", "value": value }),
            Self::CopyTree { from, to, source } => json!({
                "from": from.display().to_string(),
                "to": to.display().to_string(),
                "error": format!("{source:#}"),
            }),
            Self::ResolveProperty { coordinate, source } => json!({
                "coordinate": coordinate,
                "error": format!("{source:#}"),
            }),
            Self::Launch { program, source } => json!({
                "program": program.display().to_string(),
                "error": format!("{source:#}"),
            }),
            Self::TestsFailed { code } => json!({ "exit_code": code }),
            Self::ConfigFile { path, source } => json!({
                "path": path.display().to_string(),
                "error": format!("{source:#}"),
            }),
            Self::BuildOutputUnset | Self::StagingUnset => json!({}),
            Self::ResolverVersionEmpty => json!({ "tool": "dependencyResolver" }),
            Self::CopierVersionEmpty => json!({ "tool": "resourceCopier" }),
            Self::RunnerVersionEmpty => json!({ "tool": "processRunner" }),
        };
        if let Value::Object(map) = &mut details {
            map.insert("code".into(), json!(self.code()));
            map.insert("kind".into(), json!(self.kind()));
        }
        details
    }
}
