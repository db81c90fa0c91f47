//! File system utilities for packaging.
//!
//! Every copy here overwrites its destination. The pipeline owns the output
//! root, so re-running against the same directory converges on the same
//! contents.

use crate::packager::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Copies a regular file, creating any parent directories of the destination
/// and replacing an existing destination file.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        crate::bail!("{:?} does not exist", from);
    }
    if !from.is_file() {
        crate::bail!("{:?} is not a file", from);
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Recursively copies a directory into `to`, overwriting files that already
/// exist there.
///
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        crate::bail!("{:?} does not exist", from);
    }
    if !from.is_dir() {
        crate::bail!("{:?} is not a directory", from);
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&to).fs_context("creating directory", &to)?;

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", entry.path())?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Writes `bytes` to `path`, replacing any existing file.
pub async fn write_file(path: &Path, bytes: &[u8], context: &'static str) -> Result<()> {
    fs::write(path, bytes).await.fs_context(context, path)
}

/// Removes a file if it exists.
///
/// Returns whether a file was removed.
pub async fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("foo.jar");
        let dst = dir.path().join("lib").join("foo.jar");
        std::fs::write(&src, b"new").unwrap();
        std::fs::create_dir_all(dst.parent().unwrap()).unwrap();
        std::fs::write(&dst, b"old contents").unwrap();

        copy_file(&src, &dst).await.unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_copy_file_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = copy_file(dir.path(), &dir.path().join("x")).await.unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }

    #[tokio::test]
    async fn test_copy_dir_is_recursive() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("classes");
        std::fs::create_dir_all(src.join("com/sb")).unwrap();
        std::fs::write(src.join("com/sb/Test.class"), b"cafebabe").unwrap();

        let dst = dir.path().join("lib").join("classes");
        copy_dir(&src, &dst).await.unwrap();
        // second copy over an existing tree must succeed
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read(dst.join("com/sb/Test.class")).unwrap(), b"cafebabe");
    }

    #[tokio::test]
    async fn test_remove_file_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rcedit.exe");
        std::fs::write(&path, b"x").unwrap();

        assert!(remove_file_if_exists(&path).await.unwrap());
        assert!(!remove_file_if_exists(&path).await.unwrap());
    }
}
