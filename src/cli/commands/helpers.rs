//! Merging of `jini.toml` and command line flags into a packaging run.

use crate::cli::PackageArgs;
use crate::config::{DEFAULT_OUTPUT_DIR, JiniConfig, parse_separator};
use crate::error::{CliError, ConfigError, Result};
use crate::packager::classpath::expand_patterns;
use crate::packager::command::DEFAULT_TIMEOUT;
use crate::packager::{
    DirectoryResources, PackagingRequest, RequestBuilder, ResourceMetadata, SystemCommandRunner,
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything needed to construct a [`Packager`](crate::packager::Packager).
pub(super) struct ResolvedRun {
    pub request: PackagingRequest,
    pub resources: DirectoryResources,
    pub runner: SystemCommandRunner,
}

/// Builds the run from `args`, falling back to the config file for every
/// value the command line leaves unset.
///
/// Flags override scalar config values; list flags extend the config lists.
pub(super) fn resolve_run(args: &PackageArgs) -> Result<ResolvedRun> {
    let config = JiniConfig::discover(args.config.as_deref())?;
    let cwd = std::env::current_dir()?;

    let main_class = args
        .main_class
        .clone()
        .or_else(|| config.main_class.clone())
        .ok_or_else(|| CliError::MissingArgument {
            argument: "main-class".to_string(),
        })?;
    let executable = args
        .executable
        .clone()
        .or_else(|| config.executable.clone())
        .ok_or_else(|| CliError::MissingArgument {
            argument: "executable".to_string(),
        })?;

    let output_dir = match (&args.output_dir, &config.output_dir) {
        (Some(dir), _) => absolute(dir)?,
        (None, Some(dir)) => config.resolve_path(dir)?,
        (None, None) => config.resolve_path(Path::new(DEFAULT_OUTPUT_DIR))?,
    };

    let mut archives = expand_patterns(config.base_dir(), &config.archives)?;
    archives.extend(expand_patterns(&cwd, &args.archives)?);
    let mut class_outputs = expand_patterns(config.base_dir(), &config.class_outputs)?;
    class_outputs.extend(expand_patterns(&cwd, &args.class_outputs)?);

    let mut builder = RequestBuilder::new()
        .main_class(main_class)
        .executable_name(executable)
        .vm_args(config.vm_args.iter().chain(&args.vm_args).cloned())
        .args(config.args.iter().chain(&args.program_args).cloned())
        .metadata(merge_metadata(config.resource_metadata()?, args))
        .archives(archives)
        .class_outputs(class_outputs)
        .output_dir(output_dir);

    if let Some(console) = args
        .console_executable
        .clone()
        .or_else(|| config.console_executable.clone())
    {
        builder = builder.console_executable_name(console);
    }

    let separator = match &args.path_separator {
        Some(sep) => Some(parse_separator(sep).map_err(|reason| CliError::InvalidArguments {
            reason: format!("--path-separator: {}", reason),
        })?),
        None => config.path_separator()?,
    };
    if let Some(separator) = separator {
        builder = builder.path_separator(separator);
    }

    let resources = match (&args.resources_dir, &config.resources_dir) {
        (Some(dir), _) => DirectoryResources::new(absolute(dir)?),
        (None, Some(dir)) => DirectoryResources::new(config.resolve_path(dir)?),
        (None, None) => DirectoryResources::beside_current_exe()?,
    };

    let timeout = args
        .editor_timeout_secs
        .or(config.editor_timeout_secs)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);
    if timeout.is_zero() {
        return Err(ConfigError::InvalidValue {
            key: "editor_timeout_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        }
        .into());
    }

    let mut runner = SystemCommandRunner::new().with_timeout(timeout);
    if let Some(host) = args.editor_host.clone().or_else(|| config.editor_host.clone()) {
        runner = runner.with_host(Some(host));
    }

    Ok(ResolvedRun {
        request: builder.build()?,
        resources,
        runner,
    })
}

/// Command line metadata flags take precedence field by field.
fn merge_metadata(base: ResourceMetadata, args: &PackageArgs) -> ResourceMetadata {
    ResourceMetadata {
        file_version: args.file_version.clone().or(base.file_version),
        product_version: args.product_version.clone().or(base.product_version),
        product_name: args.product_name.clone().or(base.product_name),
        file_description: args.file_description.clone().or(base.file_description),
        comments: args.comments.clone().or(base.comments),
        copyright: args.copyright.clone().or(base.copyright),
        icon: args.icon.clone().or(base.icon),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path.absolutize()?.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_metadata() {
        let base = ResourceMetadata {
            file_version: Some("1.0.0.1".into()),
            copyright: Some("Config Corp".into()),
            ..Default::default()
        };
        let args = PackageArgs {
            copyright: Some("Flag Corp".into()),
            ..Default::default()
        };

        let merged = merge_metadata(base, &args);
        assert_eq!(merged.file_version.as_deref(), Some("1.0.0.1"));
        assert_eq!(merged.copyright.as_deref(), Some("Flag Corp"));
        assert!(merged.icon.is_none());
    }

    #[test]
    fn test_missing_main_class() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("jini.toml");
        std::fs::write(&config, "executable = \"app.exe\"\n").unwrap();

        let args = PackageArgs {
            config: Some(config),
            ..Default::default()
        };
        let err = resolve_run(&args).err().unwrap();
        assert!(matches!(
            err,
            crate::error::JiniError::Cli(CliError::MissingArgument { ref argument }) if argument == "main-class"
        ));
    }

    #[test]
    fn test_resolves_against_config_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("libs")).unwrap();
        std::fs::write(dir.path().join("libs/foo.jar"), b"").unwrap();
        let config = dir.path().join("jini.toml");
        std::fs::write(
            &config,
            "main_class = \"com.sb.Test\"\n\
             executable = \"jini-test.exe\"\n\
             resources_dir = \"res\"\n\
             archives = [\"libs/*.jar\"]\n\
             vm_args = [\"-Xmx64m\"]\n",
        )
        .unwrap();

        let args = PackageArgs {
            config: Some(config),
            vm_args: vec!["-Xmx64m".into(), "-Dx=1".into()],
            ..Default::default()
        };
        let run = resolve_run(&args).unwrap();
        let base = dir.path().absolutize().unwrap().into_owned();

        assert_eq!(run.request.output_dir(), base.join("build/jini"));
        assert_eq!(run.request.archives(), [base.join("libs/foo.jar")]);
        assert_eq!(run.request.vm_args(), ["-Xmx64m", "-Dx=1"]);
        assert_eq!(run.resources.root(), base.join("res"));
    }
}
