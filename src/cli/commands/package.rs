//! Package command implementation.

use super::helpers::{ResolvedRun, resolve_run};
use crate::cli::{PackageArgs, RuntimeConfig};
use crate::error::Result;
use crate::packager::{PackagedOutput, Packager};

/// Execute package command
pub(super) async fn execute_package(args: &PackageArgs, config: &RuntimeConfig) -> Result<()> {
    let ResolvedRun {
        request,
        resources,
        runner,
    } = resolve_run(args)?;

    config.heading("Packaging");
    config.verbose_println(&format!("Main class: {}", request.main_class()));
    config.verbose_println(&format!("Output: {}", request.output_dir().display()));
    config.verbose_println(&format!("Resources: {}", resources.root().display()));
    if let Some(host) = runner.host() {
        config.verbose_println(&format!("Editor host: {}", host.display()));
    }

    let output = Packager::new(request, resources, runner).package().await?;
    print_summary(&output, config);
    Ok(())
}

fn print_summary(output: &PackagedOutput, config: &RuntimeConfig) {
    config.success_println(&format!("Created {}", output.executable.display()));
    config.field("size", format!("{} bytes", output.size));
    config.field("sha256", &output.checksum);
    if let Some(console) = &output.console_executable {
        config.field("console", console.display());
    }
    config.field("descriptor", output.descriptor.display());
    config.field("libraries", output.staged.len());
    config.field("resources", if output.patched { "patched" } else { "unchanged" });

    for failed in &output.failed {
        config.warning_println(&format!(
            "{} was not copied: {}",
            failed.source.display(),
            failed.reason
        ));
    }
}
