//! Bundled binary resources: the launchers and the resource editor.
//!
//! The pipeline never locates these files itself. It asks a
//! [`ResourceProvider`] for a resource by name and receives its bytes, so the
//! same pipeline works with resources shipped next to the `jini` binary
//! ([`DirectoryResources`]) or held in memory ([`MemoryResources`]).

use crate::packager::error::{Error, ErrorExt, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// GUI-mode launcher.
pub const LAUNCHER: &str = "jini.exe";

/// Console-mode launcher.
pub const CONSOLE_LAUNCHER: &str = "jini-cli.exe";

/// Windows resource editor. Also the name of its temporary copy in the output root.
pub const RESOURCE_EDITOR: &str = "rcedit.exe";

/// Read-only source of bundled binaries.
pub trait ResourceProvider {
    /// Returns the bytes of the named resource.
    ///
    /// # Errors
    ///
    /// [`Error::ResourceNotFound`] when the provider has no such resource;
    /// other errors when it exists but cannot be read.
    fn lookup(&self, name: &str) -> Result<Cow<'_, [u8]>>;

    /// Returns true when the named resource can be looked up.
    fn contains(&self, name: &str) -> bool;

    /// Human-readable location used in diagnostics.
    fn location(&self) -> String;
}

/// Resources stored as plain files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    /// Creates a provider reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default location: `resources/executables` beside the running binary.
    pub fn beside_current_exe() -> Result<Self> {
        let exe = std::env::current_exe().map_err(Error::IoError)?;
        let dir = exe
            .parent()
            .ok_or_else(|| Error::GenericError(format!("{} has no parent", exe.display())))?;
        Ok(Self::new(dir.join("resources").join("executables")))
    }

    /// Directory this provider reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceProvider for DirectoryResources {
    fn lookup(&self, name: &str) -> Result<Cow<'_, [u8]>> {
        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::ResourceNotFound {
                name: name.to_string(),
                location: self.location(),
            }),
            Err(e) => Err(e).fs_context("reading bundled resource", path),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// Resources held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a resource.
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(name.into(), bytes.into());
        self
    }
}

impl ResourceProvider for MemoryResources {
    fn lookup(&self, name: &str) -> Result<Cow<'_, [u8]>> {
        self.entries
            .get(name)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
            .ok_or_else(|| Error::ResourceNotFound {
                name: name.to_string(),
                location: self.location(),
            })
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn location(&self) -> String {
        "in-memory resources".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_lookup() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LAUNCHER), b"MZ-launcher").unwrap();

        let resources = DirectoryResources::new(dir.path());
        assert!(resources.contains(LAUNCHER));
        assert_eq!(resources.lookup(LAUNCHER).unwrap().as_ref(), b"MZ-launcher");
    }

    #[test]
    fn test_directory_missing_resource() {
        let dir = TempDir::new().unwrap();
        let resources = DirectoryResources::new(dir.path());

        assert!(!resources.contains(RESOURCE_EDITOR));
        let err = resources.lookup(RESOURCE_EDITOR).unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { ref name, .. } if name == RESOURCE_EDITOR));
    }

    #[test]
    fn test_memory_lookup() {
        let resources = MemoryResources::new().with(CONSOLE_LAUNCHER, b"cli".to_vec());
        assert_eq!(resources.lookup(CONSOLE_LAUNCHER).unwrap().as_ref(), b"cli");
        assert!(resources.lookup(LAUNCHER).is_err());
    }
}
