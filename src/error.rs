//! Error types for jini operations.
//!
//! Wraps packaging errors together with configuration and CLI errors, and
//! attaches recovery suggestions shown to the user.

use crate::packager::Error as PackagerError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for jini operations
pub type Result<T> = std::result::Result<T, JiniError>;

/// Main error type for all jini operations
#[derive(Error, Debug)]
pub enum JiniError {
    /// Configuration file errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Packaging errors
    #[error("{0}")]
    Packager(#[from] PackagerError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors loading `jini.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist
    #[error("Config file not found: {path}")]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Config file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unknown keys
    #[error("Failed to parse {path}: {source}")]
    ParseFailed {
        /// Config file path
        path: PathBuf,
        /// Parsing error
        #[source]
        source: toml::de::Error,
    },

    /// A value is present but unusable
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Config key
        key: String,
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Validation found problems that would make packaging fail
    #[error("Validation failed with {count} problem(s)")]
    ValidationFailed {
        /// Number of problems reported
        count: usize,
    },
}

impl JiniError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            JiniError::Cli(CliError::MissingArgument { argument }) => vec![
                format!("Pass --{} on the command line", argument.replace('_', "-")),
                format!("Or set {} in jini.toml", argument.replace('-', "_")),
            ],
            JiniError::Config(ConfigError::NotFound { .. }) => vec![
                "Check the --config path".to_string(),
                "Omit --config to use ./jini.toml when present".to_string(),
            ],
            JiniError::Packager(PackagerError::ResourceNotFound { location, .. }) => vec![
                format!("Place jini.exe, jini-cli.exe and rcedit.exe in {}", location),
                "Or point --resources-dir (JINI_RESOURCES_DIR) at the launcher binaries".to_string(),
            ],
            JiniError::Packager(PackagerError::ArtifactNameCollision { name, .. }) => vec![
                format!("Only one artifact named {} can be placed in lib/", name),
                "Remove the duplicate from archives or class_outputs".to_string(),
            ],
            JiniError::Packager(PackagerError::CommandFailed { .. }) => vec![
                "On Linux and macOS install wine so rcedit.exe can run".to_string(),
                "Or set --editor-host (JINI_EDITOR_HOST) to a program that runs Windows executables"
                    .to_string(),
            ],
            JiniError::Packager(PackagerError::CommandTimedOut { .. }) => vec![
                "Raise --editor-timeout-secs (editor_timeout_secs in jini.toml)".to_string(),
            ],
            JiniError::Packager(PackagerError::ResourceEditorFailed(_)) => vec![
                "Versions must look like 1.2.3 or 1.2.3.4".to_string(),
                "Icons must be .ico files or PNG images".to_string(),
            ],
            JiniError::Packager(PackagerError::IconNotFound(path)) => vec![format!(
                "Check the icon path {}",
                path.display()
            )],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_failure_display_is_verbatim() {
        let err =
            JiniError::from(PackagerError::ResourceEditorFailed("Fatal error: bad icon".into()));
        assert_eq!(err.to_string(), "Fatal error: bad icon");
    }

    #[test]
    fn test_missing_argument_suggestions() {
        let err = JiniError::from(CliError::MissingArgument {
            argument: "main-class".into(),
        });
        let suggestions = err.recovery_suggestions();
        assert_eq!(suggestions[0], "Pass --main-class on the command line");
        assert_eq!(suggestions[1], "Or set main_class in jini.toml");
    }

    #[test]
    fn test_default_suggestion() {
        let err = JiniError::Io(std::io::Error::other("boom"));
        assert_eq!(err.recovery_suggestions().len(), 1);
    }
}
