//! Places the launcher executables and the resource editor in the output root.

use crate::packager::error::{Context, Result};
use crate::packager::request::PackagingRequest;
use crate::packager::resources::{CONSOLE_LAUNCHER, LAUNCHER, RESOURCE_EDITOR, ResourceProvider};
use crate::packager::utils::fs;
use std::path::{Path, PathBuf};

/// Files written by [`assemble_launchers`].
#[derive(Debug, Clone)]
pub struct AssembledLaunchers {
    pub executable: PathBuf,
    pub console_executable: Option<PathBuf>,
    /// Temporary copy of the resource editor; removed during cleanup.
    pub editor: PathBuf,
}

/// Copies the GUI launcher, the optional console launcher and the resource
/// editor from `resources` into `output_dir`, overwriting existing files.
///
/// Any missing resource or failed write aborts the run.
pub async fn assemble_launchers<R: ResourceProvider>(
    resources: &R,
    request: &PackagingRequest,
    output_dir: &Path,
) -> Result<AssembledLaunchers> {
    let executable = output_dir.join(request.executable_name());
    extract(resources, LAUNCHER, &executable).await?;

    let console_executable = match request.console_executable_name() {
        Some(name) => {
            let path = output_dir.join(name);
            extract(resources, CONSOLE_LAUNCHER, &path).await?;
            Some(path)
        }
        None => None,
    };

    let editor = output_dir.join(RESOURCE_EDITOR);
    extract(resources, RESOURCE_EDITOR, &editor).await?;

    Ok(AssembledLaunchers {
        executable,
        console_executable,
        editor,
    })
}

async fn extract<R: ResourceProvider>(resources: &R, name: &str, dest: &Path) -> Result<()> {
    let bytes = resources.lookup(name)?;
    fs::write_file(dest, &bytes, "writing bundled resource")
        .await
        .with_context(|| format!("failed to extract {name}"))?;
    log::debug!("Extracted {} -> {}", name, dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::error::Error;
    use crate::packager::request::RequestBuilder;
    use crate::packager::resources::MemoryResources;
    use tempfile::TempDir;

    fn resources() -> MemoryResources {
        MemoryResources::new()
            .with(LAUNCHER, b"gui".to_vec())
            .with(CONSOLE_LAUNCHER, b"cli".to_vec())
            .with(RESOURCE_EDITOR, b"editor".to_vec())
    }

    #[tokio::test]
    async fn test_renames_launchers() {
        let dir = TempDir::new().unwrap();
        let request = RequestBuilder::new()
            .main_class("com.sb.Test")
            .executable_name("jini-test.exe")
            .console_executable_name("jini-test-cli.exe")
            .output_dir(dir.path())
            .build()
            .unwrap();

        let out = assemble_launchers(&resources(), &request, dir.path()).await.unwrap();

        assert_eq!(std::fs::read(&out.executable).unwrap(), b"gui");
        assert_eq!(std::fs::read(out.console_executable.unwrap()).unwrap(), b"cli");
        assert_eq!(std::fs::read(dir.path().join(RESOURCE_EDITOR)).unwrap(), b"editor");
    }

    #[tokio::test]
    async fn test_missing_editor_is_fatal() {
        let dir = TempDir::new().unwrap();
        let request = RequestBuilder::new()
            .main_class("com.sb.Test")
            .executable_name("app.exe")
            .output_dir(dir.path())
            .build()
            .unwrap();
        let resources = MemoryResources::new().with(LAUNCHER, b"gui".to_vec());

        let err = assemble_launchers(&resources, &request, dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { ref name, .. } if name == RESOURCE_EDITOR));
    }
}
