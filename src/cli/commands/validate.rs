//! Validate command implementation.
//!
//! Runs every check `package` would fail on, without touching the output
//! directory.

use super::helpers::{ResolvedRun, resolve_run};
use crate::cli::{PackageArgs, RuntimeConfig};
use crate::error::{CliError, Result};
use crate::packager::{ArtifactSet, CONSOLE_LAUNCHER, LAUNCHER, RESOURCE_EDITOR, ResourceProvider};

/// Execute validate command
pub(super) async fn execute_validate(args: &PackageArgs, config: &RuntimeConfig) -> Result<()> {
    let ResolvedRun {
        request,
        resources,
        runner,
    } = resolve_run(args)?;

    config.verbose_println("Validating packaging configuration...");
    let mut problems = Vec::new();
    let mut warnings = Vec::new();

    let mut required = vec![LAUNCHER, RESOURCE_EDITOR];
    if request.console_executable_name().is_some() {
        required.push(CONSOLE_LAUNCHER);
    }
    for name in required {
        if !resources.contains(name) {
            problems.push(format!("{} not found in {}", name, resources.location()));
        }
    }

    match ArtifactSet::collect(request.archives(), request.class_outputs()) {
        Ok(artifacts) => {
            config.field("artifacts", artifacts.len());
            for artifact in artifacts.iter() {
                if !artifact.source().exists() {
                    warnings.push(format!(
                        "{} does not exist and will be skipped",
                        artifact.source().display()
                    ));
                }
            }
        }
        Err(e) => problems.push(e.to_string()),
    }

    let metadata = request.metadata();
    if let Some(icon) = metadata.icon.as_ref().filter(|icon| !icon.is_file()) {
        problems.push(format!("icon {} does not exist", icon.display()));
    }
    if !metadata.is_empty() && !cfg!(windows) && runner.host().is_none() {
        problems.push(format!(
            "{} needs a host program such as wine on this platform",
            RESOURCE_EDITOR
        ));
    }

    for warning in &warnings {
        config.warning_println(warning);
    }

    if !problems.is_empty() {
        for problem in &problems {
            config.error_println(problem);
        }
        return Err(CliError::ValidationFailed {
            count: problems.len(),
        }
        .into());
    }

    Ok(())
}
