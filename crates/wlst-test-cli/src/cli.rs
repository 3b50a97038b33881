use std::path::PathBuf;

use clap::{builder::FalseyValueParser, ArgAction, Args, Parser, Subcommand};
use wlst_test_domain::ConfigOverrides;

pub const WLST_TEST_BEFORE_HELP: &str = concat!(
    "wlst-test ",
    env!("CARGO_PKG_VERSION"),
    " - run Jython unit tests through the WebLogic Scripting Tool\n\n",
    "\x1b[1;36mCommands\x1b[0m\n",
    "  test             Stage sources and tests, then run them with wlst.sh.\n",
    "  plan             Show the environment and arguments `test` would use.\n",
);

#[derive(Parser, Debug)]
#[command(
    name = "wlst-test",
    author,
    version,
    disable_help_subcommand = true,
    before_help = WLST_TEST_BEFORE_HELP
)]
#[allow(clippy::struct_excessive_bools)]
pub struct WlstTestCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging; -v also turns on driver debug output",
        global = true
    )]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[arg(
        long,
        value_name = "DIR",
        help = "Project directory (defaults to the current directory)",
        global = true
    )]
    pub project_root: Option<PathBuf>,
    #[arg(
        long,
        value_name = "FILE",
        help = "Configuration file (defaults to <project>/wlst-test.toml)",
        global = true
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CommandCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandCli {
    #[command(about = "Stage the project's WLST tests and run them.")]
    Test(RunArgs),
    #[command(about = "Validate and print the launcher invocation without running it.")]
    Plan(RunArgs),
}

impl CommandCli {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Test(_) => "test",
            Self::Plan(_) => "plan",
        }
    }

    pub fn args(&self) -> &RunArgs {
        match self {
            Self::Test(args) | Self::Plan(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    #[arg(
        long,
        value_name = "DIR",
        env = "WLST_SCRIPT_DIRECTORY",
        help = "Directory containing wlst.sh / wlst.cmd"
    )]
    pub wlst_script_directory: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Production script root")]
    pub sources_root: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Test script root")]
    pub tests_root: Option<PathBuf>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Compiled output appended to the classpath"
    )]
    pub build_output_directory: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Base directory for staged copies")]
    pub staging_directory: Option<PathBuf>,
    #[arg(
        long,
        value_name = "LEVEL",
        allow_negative_numbers = true,
        help = "unittest runner verbosity (0, 1, or 2)"
    )]
    pub verbosity: Option<i64>,
    #[arg(
        long,
        env = "WLST_TEST_SKIP",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Skip running tests"
    )]
    pub skip_tests: bool,
    #[arg(long, help = "Let WLST scan WebLogic modules at startup")]
    pub scan_modules: bool,
    #[arg(long, help = "Pass the classpath through CLASSPATH for older WLST launchers")]
    pub using_old_wlst_version: bool,
    #[arg(
        long = "ext-classpath",
        value_name = "ENTRY",
        help = "Extra classpath entry: a path or group:artifact:type (repeatable)"
    )]
    pub ext_classpath: Vec<String>,
    #[arg(
        short = 'e',
        long = "env",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Extra environment variable for the launcher (repeatable)"
    )]
    pub env: Vec<(String, String)>,
    #[arg(
        short = 'D',
        long = "system-property",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Java system property passed through WLST_PROPERTIES (repeatable)"
    )]
    pub system_property: Vec<(String, String)>,
    #[arg(
        long,
        value_name = "ARGS",
        allow_hyphen_values = true,
        help = "Extra JVM arguments added verbatim to WLST_PROPERTIES"
    )]
    pub arg_line: Option<String>,
    #[arg(
        long,
        value_name = "COORD=PATH",
        value_parser = parse_key_value,
        help = "Resolved path for a group:artifact:type classpath entry (repeatable)"
    )]
    pub resolve: Vec<(String, String)>,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            wlst_script_directory: self.wlst_script_directory.clone(),
            sources_root: self.sources_root.clone(),
            tests_root: self.tests_root.clone(),
            build_output_directory: self.build_output_directory.clone(),
            staging_directory: self.staging_directory.clone(),
            verbosity: self.verbosity,
            skip_tests: self.skip_tests.then_some(true),
            skip_module_scanning: self.scan_modules.then_some(false),
            using_old_wlst_version: self.using_old_wlst_version.then_some(true),
            arg_line: self.arg_line.clone(),
            wlst_ext_classpath: self.ext_classpath.clone(),
            environment_variables: self.env.clone(),
            system_properties: self.system_property.clone(),
            resolved_properties: self.resolve.clone(),
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
