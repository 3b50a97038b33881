use std::path::Path;

use tracing::{info, warn};
use wlst_test_domain::replace_placeholders;

use super::arguments::ArgumentVector;
use super::environment::EnvironmentSet;
use crate::core::runtime::{Invocation, ProcessRunner, PropertyResolver, RunOutput};
use crate::core::tooling::errors::WlstTestError;

/// Replaces `${group:artifact:type}` placeholders in every variable value.
///
/// Coordinates the resolver does not know are left in place.
pub(crate) fn resolve_placeholders(
    env: &mut EnvironmentSet,
    resolver: &dyn PropertyResolver,
) -> Result<(), WlstTestError> {
    for (name, value) in env.values_mut() {
        let rendered = replace_placeholders(value.as_str(), |coordinate| {
            match resolver.resolve(coordinate) {
                Ok(Some(path)) => Ok(Some(path)),
                Ok(None) => {
                    warn!(
                        variable = name,
                        %coordinate,
                        "classpath property could not be resolved; leaving placeholder"
                    );
                    Ok(None)
                }
                Err(source) => Err(WlstTestError::ResolveProperty {
                    coordinate: coordinate.to_string(),
                    source,
                }),
            }
        })?;
        *value = rendered;
    }
    Ok(())
}

/// Runs the launcher from `cwd` and waits for it to exit.
pub(crate) fn invoke(
    runner: &dyn ProcessRunner,
    entry_point: &Path,
    env: &EnvironmentSet,
    args: ArgumentVector,
    cwd: &Path,
    stdout_to_stderr: bool,
) -> Result<RunOutput, WlstTestError> {
    let invocation = Invocation {
        program: entry_point.to_path_buf(),
        args: args.into_vec(),
        envs: env.to_pairs(),
        cwd: cwd.to_path_buf(),
        stdout_to_stderr,
    };
    info!(
        program = %invocation.program.display(),
        cwd = %invocation.cwd.display(),
        "running WLST tests"
    );
    runner
        .run(&invocation)
        .map_err(|source| WlstTestError::Launch {
            program: invocation.program.clone(),
            source,
        })
}
