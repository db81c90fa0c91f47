//! Writes version strings and the icon into the assembled launcher.

use crate::packager::command::{CommandRunner, Invocation};
use crate::packager::error::{Error, Result};
use crate::packager::icon;
use crate::packager::request::ResourceMetadata;
use crate::packager::resources::RESOURCE_EDITOR;
use std::path::Path;

/// Builds the editor's flags for `metadata`, in the editor's fixed order.
///
/// Only present fields produce flags. `icon` is the prepared icon path and
/// takes the place of `metadata.icon`.
pub fn editor_arguments(metadata: &ResourceMetadata, icon: Option<&Path>) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(version) = &metadata.file_version {
        args.extend(["--set-file-version".to_string(), version.clone()]);
    }
    if let Some(version) = &metadata.product_version {
        args.extend(["--set-product-version".to_string(), version.clone()]);
    }

    let version_strings = [
        ("ProductName", &metadata.product_name),
        ("FileDescription", &metadata.file_description),
        ("Comments", &metadata.comments),
        ("LegalCopyright", &metadata.copyright),
    ];
    for (key, value) in version_strings {
        if let Some(value) = value {
            args.extend([
                "--set-version-string".to_string(),
                key.to_string(),
                value.clone(),
            ]);
        }
    }

    if let Some(icon) = icon {
        args.extend(["--set-icon".to_string(), icon.display().to_string()]);
    }

    args
}

/// Patches `executable_name` in `output_dir` with `metadata`.
///
/// Returns `false` without running anything when `metadata` is empty.
///
/// # Errors
///
/// - [`Error::IconNotFound`] when the icon is missing
/// - [`Error::ResourceEditorFailed`] carrying the editor's standard error when it exits non-zero
/// - [`Error::CommandFailed`] / [`Error::CommandTimedOut`] when the editor cannot be run to completion
pub async fn patch_launcher<C: CommandRunner>(
    runner: &C,
    output_dir: &Path,
    executable_name: &str,
    metadata: &ResourceMetadata,
) -> Result<bool> {
    if metadata.is_empty() {
        log::debug!("No resource metadata set, leaving {} unpatched", executable_name);
        return Ok(false);
    }

    let icon = match &metadata.icon {
        Some(path) => Some(icon::prepare_icon(path, output_dir).await?),
        None => None,
    };

    let invocation = Invocation::new(RESOURCE_EDITOR, output_dir)
        .args([executable_name.to_string()])
        .args(editor_arguments(metadata, icon.as_deref()));
    log::info!("Patching resources of {}", executable_name);
    log::debug!("{}", invocation.command_line());

    let output = runner.run(&invocation).await?;
    if !output.success() {
        log::error!("{} exited with {:?}", RESOURCE_EDITOR, output.exit_code);
        return Err(Error::ResourceEditorFailed(output.stderr));
    }
    Ok(true)
}
