//! Removes temporary files the pipeline leaves in the output root.

use crate::packager::error::Result;
use crate::packager::icon::CONVERTED_ICON;
use crate::packager::resources::RESOURCE_EDITOR;
use crate::packager::utils::fs;
use std::path::{Path, PathBuf};

/// Deletes the resource editor copy and any converted icon from `output_dir`.
///
/// Missing files are not an error. Returns the paths actually removed.
pub async fn remove_temporary_files(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for name in [RESOURCE_EDITOR, CONVERTED_ICON] {
        let path = output_dir.join(name);
        if fs::remove_file_if_exists(&path).await? {
            log::debug!("Removed {}", path.display());
            removed.push(path);
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_removes_editor_and_icon() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(RESOURCE_EDITOR), b"x").unwrap();
        std::fs::write(dir.path().join(CONVERTED_ICON), b"x").unwrap();
        std::fs::write(dir.path().join("app.exe"), b"x").unwrap();

        let removed = remove_temporary_files(dir.path()).await.unwrap();
        assert_eq!(removed.len(), 2);
        assert!(!dir.path().join(RESOURCE_EDITOR).exists());
        assert!(dir.path().join("app.exe").exists());
    }

    #[tokio::test]
    async fn test_idempotent() {
        let dir = TempDir::new().unwrap();
        assert!(remove_temporary_files(dir.path()).await.unwrap().is_empty());
        // output root that was never created
        let missing = dir.path().join("never-created");
        assert!(remove_temporary_files(&missing).await.unwrap().is_empty());
    }
}
