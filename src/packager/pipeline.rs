//! Packaging orchestration.
//!
//! Runs the stages in order against one output root:
//!
//! 1. collect the classpath artifacts
//! 2. stage them into `lib/`
//! 3. write `lib/package.json`
//! 4. extract the launchers and the resource editor
//! 5. patch launcher resources (only when metadata was given)
//! 6. remove temporary files
//!
//! Cleanup runs on every exit path, including failures in earlier stages.

use crate::packager::assembler::assemble_launchers;
use crate::packager::classpath::{ArtifactSet, LIB_DIR};
use crate::packager::cleanup::remove_temporary_files;
use crate::packager::command::CommandRunner;
use crate::packager::descriptor::Descriptor;
use crate::packager::error::Result;
use crate::packager::patcher::patch_launcher;
use crate::packager::request::PackagingRequest;
use crate::packager::resources::ResourceProvider;
use crate::packager::stager::{FailedArtifact, stage_libraries};
use std::path::{Path, PathBuf};

/// Result of a successful packaging run.
#[derive(Debug, Clone)]
pub struct PackagedOutput {
    /// GUI launcher in the output root.
    pub executable: PathBuf,

    /// Console launcher, when one was requested.
    pub console_executable: Option<PathBuf>,

    /// Startup descriptor inside the library directory.
    pub descriptor: PathBuf,

    /// Artifacts copied into the library directory.
    pub staged: Vec<PathBuf>,

    /// Artifacts that could not be copied. Still listed in the descriptor.
    pub failed: Vec<FailedArtifact>,

    /// Whether the resource editor ran.
    pub patched: bool,

    /// Size of the GUI launcher in bytes.
    pub size: u64,

    /// SHA-256 of the final GUI launcher.
    pub checksum: String,
}

/// Runs packaging for one [`PackagingRequest`].
///
/// Resources and process execution are injected so the pipeline can run
/// against in-memory launchers and a recording command runner.
///
/// # Examples
///
/// ```no_run
/// use jini::packager::{DirectoryResources, Packager, RequestBuilder, SystemCommandRunner};
///
/// # async fn example() -> jini::packager::Result<()> {
/// let request = RequestBuilder::new()
///     .main_class("com.sb.Test")
///     .executable_name("jini-test.exe")
///     .archive("build/libs/foo.jar")
///     .output_dir("build/jini")
///     .build()?;
///
/// let packager = Packager::new(
///     request,
///     DirectoryResources::beside_current_exe()?,
///     SystemCommandRunner::new(),
/// );
/// let output = packager.package().await?;
/// println!("{}", output.executable.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager<R, C> {
    request: PackagingRequest,
    resources: R,
    runner: C,
}

impl<R: ResourceProvider, C: CommandRunner> Packager<R, C> {
    pub fn new(request: PackagingRequest, resources: R, runner: C) -> Self {
        Self {
            request,
            resources,
            runner,
        }
    }

    /// Runs all stages, then cleanup.
    ///
    /// When a stage fails, cleanup still runs and the stage's error is
    /// returned; a cleanup error is only logged in that case. When all stages
    /// succeed, a cleanup error is returned.
    pub async fn package(&self) -> Result<PackagedOutput> {
        let output_dir = self.request.output_dir();
        log::info!("Packaging {} into {}", self.request.main_class(), output_dir.display());

        let result = self.run_stages(output_dir).await;
        let cleanup = remove_temporary_files(output_dir).await;

        match (result, cleanup) {
            (Ok(output), Ok(_)) => {
                log::info!("Packaged {}", output.executable.display());
                Ok(output)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                log::warn!("Cleanup after failed run also failed: {}", cleanup_err);
                Err(e)
            }
        }
    }

    async fn run_stages(&self, output_dir: &Path) -> Result<PackagedOutput> {
        let request = &self.request;

        let artifacts = ArtifactSet::collect(request.archives(), request.class_outputs())?;

        let lib_dir = output_dir.join(LIB_DIR);
        let staging = stage_libraries(&artifacts, &lib_dir).await?;

        let descriptor = Descriptor::new(request, artifacts.classpath(request.path_separator()))
            .write(&lib_dir)
            .await?;

        let launchers = assemble_launchers(&self.resources, request, output_dir).await?;

        let patched = patch_launcher(
            &self.runner,
            output_dir,
            request.executable_name(),
            request.metadata(),
        )
        .await?;

        let size = tokio::fs::metadata(&launchers.executable).await?.len();
        let checksum = calculate_sha256(&launchers.executable).await?;

        Ok(PackagedOutput {
            executable: launchers.executable,
            console_executable: launchers.console_executable,
            descriptor,
            staged: staging.staged,
            failed: staging.failed,
            patched,
            size,
            checksum,
        })
    }
}

/// Hex-encoded SHA-256 of a file, read in chunks.
async fn calculate_sha256(path: &Path) -> Result<String> {
    use crate::packager::error::ErrorExt;
    use sha2::{Digest, Sha256};
    use tokio::io::AsyncReadExt;

    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening launcher for checksum", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading launcher for checksum", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
