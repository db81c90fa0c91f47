//! Command line argument parsing and validation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Packages compiled JVM applications as native Windows launchers
#[derive(Parser, Debug)]
#[command(
    name = "jini",
    version,
    about = "Packages compiled JVM applications as native Windows launchers",
    long_about = "Copy an application's jars and classes into lib/, write the lib/package.json
startup descriptor, and place a renamed native launcher next to it.

Values come from ./jini.toml (or --config) and are overridden by flags.

Usage:
  jini package
  jini package --main-class com.sb.Test --executable app.exe --archive 'build/libs/*.jar'
  jini validate --config packaging/jini.toml"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Show detailed progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the launcher directory
    Package(PackageArgs),

    /// Check configuration and bundled resources without writing anything
    Validate(PackageArgs),
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Package(_) => "package",
            Command::Validate(_) => "validate",
        }
    }

    pub fn package_args(&self) -> &PackageArgs {
        match self {
            Command::Package(args) | Command::Validate(args) => args,
        }
    }
}

/// Options shared by `package` and `validate`
#[derive(clap::Args, Debug, Default, Clone)]
pub struct PackageArgs {
    /// Config file (default: ./jini.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fully-qualified main class
    #[arg(long, value_name = "CLASS")]
    pub main_class: Option<String>,

    /// File name of the GUI launcher
    #[arg(long, value_name = "NAME")]
    pub executable: Option<String>,

    /// File name of the console launcher
    #[arg(long, value_name = "NAME")]
    pub console_executable: Option<String>,

    /// Output directory (default: build/jini)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory holding jini.exe, jini-cli.exe and rcedit.exe
    #[arg(long, value_name = "DIR", env = "JINI_RESOURCES_DIR")]
    pub resources_dir: Option<PathBuf>,

    /// JVM flag (repeatable)
    #[arg(long = "vm-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub vm_args: Vec<String>,

    /// Program argument (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub program_args: Vec<String>,

    /// Dependency archive or glob pattern (repeatable)
    #[arg(long = "archive", value_name = "PATH")]
    pub archives: Vec<String>,

    /// Compiled class directory or file (repeatable)
    #[arg(long = "classes", value_name = "PATH")]
    pub class_outputs: Vec<String>,

    /// Separator between lib and each classpath entry
    #[arg(long, value_name = "CHAR")]
    pub path_separator: Option<String>,

    /// Program used to run rcedit.exe (e.g. wine)
    #[arg(long, value_name = "PROGRAM", env = "JINI_EDITOR_HOST")]
    pub editor_host: Option<PathBuf>,

    /// Seconds to wait for rcedit.exe (default: 300)
    #[arg(long, value_name = "SECS")]
    pub editor_timeout_secs: Option<u64>,

    #[arg(long, value_name = "VERSION")]
    pub file_version: Option<String>,

    #[arg(long, value_name = "VERSION")]
    pub product_version: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub product_name: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub file_description: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub comments: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub copyright: Option<String>,

    /// Launcher icon (.ico, or .png converted automatically)
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let args = self.command.package_args();

        if let Some(sep) = &args.path_separator {
            crate::config::parse_separator(sep)
                .map_err(|reason| format!("--path-separator: {}", reason))?;
        }

        if args.editor_timeout_secs == Some(0) {
            return Err("--editor-timeout-secs must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    pub fn heading(&self, title: &str) {
        let _ = self.output.heading(title);
    }

    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        let _ = self.output.field(label, &value.to_string());
    }

    pub fn list(&self, title: &str, items: &[String]) {
        let _ = self.output.list(title, items);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}
