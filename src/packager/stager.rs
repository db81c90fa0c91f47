//! Copies classpath artifacts into the library directory.
//!
//! A failed copy is a warning, not an error: the run continues and the failure
//! is recorded in the [`StagingReport`]. Only failing to create the library
//! directory itself aborts staging.

use crate::packager::classpath::{Artifact, ArtifactSet};
use crate::packager::error::{ErrorExt, Result};
use crate::packager::utils::fs;
use std::path::{Path, PathBuf};

/// An artifact that could not be staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedArtifact {
    pub source: PathBuf,
    pub reason: String,
}

/// Outcome of staging every artifact.
#[derive(Debug, Clone, Default)]
pub struct StagingReport {
    /// Destination paths that were written.
    pub staged: Vec<PathBuf>,
    pub failed: Vec<FailedArtifact>,
}

/// Copies every artifact into `lib_dir`, overwriting existing entries.
pub async fn stage_libraries(artifacts: &ArtifactSet, lib_dir: &Path) -> Result<StagingReport> {
    tokio::fs::create_dir_all(lib_dir)
        .await
        .fs_context("creating library directory", lib_dir)?;

    let mut report = StagingReport::default();
    for artifact in artifacts.iter() {
        let dest = lib_dir.join(artifact.file_name());
        match stage_one(artifact, &dest).await {
            Ok(()) => {
                log::debug!("Staged {} -> {}", artifact.source().display(), dest.display());
                report.staged.push(dest);
            }
            Err(e) => {
                log::warn!("Failed to copy {}: {}", artifact.source().display(), e);
                report.failed.push(FailedArtifact {
                    source: artifact.source().to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Staged {} of {} artifact(s) into {}",
        report.staged.len(),
        artifacts.len(),
        lib_dir.display()
    );
    Ok(report)
}

async fn stage_one(artifact: &Artifact, dest: &Path) -> Result<()> {
    if artifact.source().is_dir() {
        fs::copy_dir(artifact.source(), dest).await
    } else {
        fs::copy_file(artifact.source(), dest).await
    }
}
