#![deny(clippy::all, warnings)]

mod core;

pub use crate::core::config::{load_test_config, CommandContext, GlobalOptions};
pub use crate::core::pipeline::arguments::{
    ArgumentVector, ArgumentVectorBuilder, SKIP_MODULE_SCANNING_SWITCH,
};
pub use crate::core::pipeline::discover::{discover_test_files, TestFile, TEST_FILE_SUFFIX};
pub use crate::core::pipeline::driver::DRIVER_SCRIPT_NAME;
pub use crate::core::pipeline::environment::{
    reserved_field, EnvironmentBuilder, EnvironmentSet, CLASSPATH_SEPARATOR, CLASSPATH_VARIABLE,
    DEBUG_PROPERTY, EXT_CLASSPATH_VARIABLE, PROPERTIES_VARIABLE, RESERVED_VARIABLES,
};
pub use crate::core::pipeline::staging::StagingLayout;
pub use crate::core::pipeline::validate::WLST_ENTRY_POINT;
pub use crate::core::pipeline::{
    plan_project, test_project, Pipeline, Stage, TestPlan, TestReport,
};
pub use crate::core::runtime::{
    CopySummary, Effects, Invocation, ProcessRunner, PropertyResolver, RunOutput, SharedEffects,
    SystemEffects, TreeCopier,
};
pub use crate::core::tooling::diagnostics::codes;
pub use crate::core::tooling::errors::{ErrorKind, WlstTestError};
pub use crate::core::tooling::outcome::{
    format_status_message, to_json_response, CommandStatus, ExecutionOutcome,
};
