#![deny(clippy::all, warnings)]

use std::env;
use std::sync::Arc;

use atty::Stream;
use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use serde_json::Value;
use tracing::debug;
use wlst_test_core::{
    format_status_message, load_test_config, plan_project, test_project, to_json_response,
    CommandContext, CommandStatus, ExecutionOutcome, GlobalOptions, SharedEffects, SystemEffects,
};
use wlst_test_domain::canonical_or_absolute;

mod cli;
mod style;

use cli::{CommandCli, WlstTestCli};
use style::Style;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = WlstTestCli::parse();
    init_tracing(cli.trace, cli.verbose, cli.quiet);

    let global = GlobalOptions {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
        json: cli.json,
    };

    let outcome = execute(&cli, &global)?;
    let code = emit_output(&cli, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn init_tracing(trace: bool, verbose: u8, quiet: bool) {
    let level = if trace {
        "trace"
    } else {
        match verbose {
            0 if quiet => "warn",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = format!("wlst_test_core={level},wlst_test_cli={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn execute(cli: &WlstTestCli, global: &GlobalOptions) -> Result<ExecutionOutcome> {
    let project_root = match &cli.project_root {
        Some(root) => canonical_or_absolute(root),
        None => env::current_dir().wrap_err("unable to determine the current directory")?,
    };
    debug!(root = %project_root.display(), "project root");

    let mut config = match load_test_config(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return Ok(ExecutionOutcome::from_error(&err)),
    };
    config.apply(cli.command.args().overrides());

    let effects: SharedEffects =
        Arc::new(SystemEffects::new().with_resolved_properties(config.resolved_properties.clone()));
    let ctx = CommandContext::new(global, effects);
    let outcome = match &cli.command {
        CommandCli::Test(_) => test_project(&ctx, &config),
        CommandCli::Plan(_) => plan_project(&ctx, &config),
    };
    Ok(outcome)
}

fn emit_output(cli: &WlstTestCli, outcome: &ExecutionOutcome) -> Result<i32> {
    let code = outcome.status.exit_code();
    let command = cli.command.name();
    let style = Style::new(cli.no_color, atty::is(Stream::Stdout));

    if cli.json {
        let payload = to_json_response(command, outcome);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if cli.quiet {
        if outcome.status != CommandStatus::Ok {
            eprintln!("{}", format_status_message(command, &outcome.message));
        }
    } else {
        let message = format_status_message(command, &outcome.message);
        println!("{}", style.status(outcome.status, &message));
        if let Some(hint) = hint_from_details(&outcome.details) {
            println!("{}", style.info(&format!("Hint: {hint}")));
        }
        if matches!(cli.command, CommandCli::Plan(_)) && outcome.status == CommandStatus::Ok {
            for line in render_plan(&style, &outcome.details) {
                println!("{line}");
            }
        }
    }

    Ok(code)
}

fn hint_from_details(details: &Value) -> Option<&str> {
    details
        .as_object()
        .and_then(|map| map.get("hint"))
        .and_then(Value::as_str)
}

fn render_plan(style: &Style, details: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    for key in ["program", "cwd"] {
        if let Some(value) = details.get(key).and_then(Value::as_str) {
            lines.push(format!("  {} {value}", style.label(&format!("{key}:"))));
        }
    }
    if let Some(env) = details.get("environment").and_then(Value::as_object) {
        lines.push(format!("  {}", style.label("environment:")));
        for (name, value) in env {
            lines.push(format!("    {name}={}", value.as_str().unwrap_or_default()));
        }
    }
    if let Some(args) = details.get("arguments").and_then(Value::as_array) {
        lines.push(format!("  {}", style.label("arguments:")));
        for arg in args.iter().filter_map(Value::as_str) {
            lines.push(format!("    {arg}"));
        }
    }
    lines
}
