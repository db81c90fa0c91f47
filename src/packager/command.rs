//! External process execution for the resource editor.
//!
//! The pipeline describes what to run as an [`Invocation`] and hands it to a
//! [`CommandRunner`]. [`SystemCommandRunner`] spawns a real child process
//! with a bounded wait; tests substitute a recording runner.

use crate::packager::error::{Error, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;

/// Default upper bound on how long the resource editor may run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Program able to run Windows executables on non-Windows hosts.
static EDITOR_HOST: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    if cfg!(windows) {
        return None;
    }
    match which::which("wine") {
        Ok(path) => {
            log::debug!("Found wine at: {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("wine not found in PATH: {}", e);
            None
        }
    }
});

/// Returns the detected editor host, if the platform needs one and it is installed.
pub fn detect_editor_host() -> Option<PathBuf> {
    EDITOR_HOST.clone()
}

/// One external program run: argument vector plus working directory.
///
/// `program` is resolved relative to `working_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl Invocation {
    /// Creates an invocation of `program` run from `working_dir`.
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    /// Appends arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Full argument vector, program first.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Renders the invocation as a single command line for logs and errors.
    ///
    /// Values that are empty or contain whitespace or quotes are wrapped in
    /// double quotes with inner quotes escaped. Processes are always spawned
    /// with discrete arguments, never through this string.
    pub fn command_line(&self) -> String {
        self.argv()
            .iter()
            .map(|arg| quote_arg(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Exit status and captured diagnostics of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external programs on behalf of the pipeline.
pub trait CommandRunner {
    /// Runs `invocation` to completion.
    ///
    /// A non-zero exit is reported through [`CommandOutput`], not as an
    /// error. Errors mean the process could not be run or waited on.
    fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<CommandOutput>> + Send;
}

impl<C: CommandRunner + Sync> CommandRunner for &C {
    fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<CommandOutput>> + Send {
        (**self).run(invocation)
    }
}

/// Spawns real child processes.
///
/// On hosts that cannot execute Windows binaries directly, set an editor
/// host (such as `wine`); the invocation then runs as `host program args...`.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    host: Option<PathBuf>,
    timeout: Duration,
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self {
            host: detect_editor_host(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SystemCommandRunner {
    /// Runner with the detected editor host and the default timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the editor host. `None` runs programs directly.
    pub fn with_host(mut self, host: Option<PathBuf>) -> Self {
        self.host = host;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> Option<&Path> {
        self.host.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_command(&self, invocation: &Invocation) -> Command {
        let program = invocation.working_dir().join(invocation.program());
        let mut cmd = match &self.host {
            Some(host) => {
                let mut cmd = Command::new(host);
                cmd.arg(&program);
                cmd
            }
            None => Command::new(&program),
        };
        cmd.args(invocation.arguments())
            .current_dir(invocation.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let command_line = invocation.command_line();
        log::debug!("Running: {}", command_line);

        let child = self
            .build_command(invocation)
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: command_line.clone(),
                error,
            })?;

        // Dropping the wait future on timeout kills the child
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|error| Error::CommandFailed {
                command: command_line.clone(),
                error,
            })?,
            Err(_) => {
                return Err(Error::CommandTimedOut {
                    command: command_line,
                    timeout: self.timeout,
                });
            }
        };

        let output = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        log::debug!("{} exited with {:?}", invocation.program(), output.exit_code);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_quotes_values() {
        let invocation = Invocation::new("rcedit.exe", "/out")
            .args(["app.exe", "--set-version-string", "ProductName", "Jini Test GUI"]);
        assert_eq!(
            invocation.command_line(),
            "rcedit.exe app.exe --set-version-string ProductName \"Jini Test GUI\""
        );
    }

    #[test]
    fn test_command_line_escapes_quotes() {
        let invocation = Invocation::new("rcedit.exe", "/out").args(["say \"hi\"", ""]);
        assert_eq!(invocation.command_line(), "rcedit.exe \"say \\\"hi\\\"\" \"\"");
    }

    #[test]
    fn test_argv_starts_with_program() {
        let invocation = Invocation::new("rcedit.exe", "/out").args(["a.exe"]);
        assert_eq!(invocation.argv(), ["rcedit.exe", "a.exe"]);
    }

    #[tokio::test]
    async fn test_missing_program_is_command_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let runner = SystemCommandRunner::new().with_host(None);
        let err = runner
            .run(&Invocation::new("does-not-exist.exe", dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_host_program_receives_editor_path() {
        let dir = tempfile::TempDir::new().unwrap();
        // `sh <script> args` stands in for `wine rcedit.exe args`
        std::fs::write(
            dir.path().join("editor.sh"),
            "echo \"$1\" >&2\nexit 3\n",
        )
        .unwrap();
        let runner = SystemCommandRunner::new().with_host(Some(PathBuf::from("sh")));

        let output = runner
            .run(&Invocation::new("editor.sh", dir.path()).args(["app.exe"]))
            .await
            .unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr, "app.exe\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_process() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("slow.sh"), "sleep 10\n").unwrap();
        let runner = SystemCommandRunner::new()
            .with_host(Some(PathBuf::from("sh")))
            .with_timeout(Duration::from_millis(100));

        let err = runner
            .run(&Invocation::new("slow.sh", dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandTimedOut { .. }));
    }
}
