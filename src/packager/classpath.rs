//! Collects the artifacts that make up the application's runtime classpath.

use crate::packager::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Name of the library directory under the output root.
pub const LIB_DIR: &str = "lib";

/// A single file or directory to be placed in the library directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    source: PathBuf,
    file_name: String,
}

impl Artifact {
    /// Path the artifact is copied from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Base name the artifact keeps inside the library directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Deduplicated set of classpath artifacts.
///
/// Archives and loose compiled outputs are merged. A path named twice is kept
/// once; two different paths with the same base name are rejected because
/// only one of them could survive in the flat library directory.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    /// Merges `archives` and `class_outputs` into one set.
    ///
    /// # Errors
    ///
    /// - [`Error::ArtifactNameCollision`] when two distinct paths share a base name
    /// - [`Error::InvalidRequest`] when a path has no usable file name
    pub fn collect(archives: &[PathBuf], class_outputs: &[PathBuf]) -> Result<Self> {
        // Keyed by normalized path so `a/./foo.jar` and `a/foo.jar` are one artifact
        let mut unique: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();
        for path in archives.iter().chain(class_outputs) {
            let key = path
                .absolutize()
                .fs_context("normalizing artifact path", path)?
                .into_owned();
            unique.entry(key).or_insert_with(|| path.clone());
        }

        let mut by_name: HashMap<String, PathBuf> = HashMap::new();
        let mut artifacts = Vec::with_capacity(unique.len());
        for source in unique.into_values() {
            let file_name = source
                .file_name()
                .and_then(|n| n.to_str())
                .filter(|n| *n != "..")
                .ok_or_else(|| {
                    Error::InvalidRequest(format!(
                        "artifact {} has no usable file name",
                        source.display()
                    ))
                })?
                .to_string();

            if let Some(first) = by_name.get(&file_name) {
                return Err(Error::ArtifactNameCollision {
                    name: file_name,
                    first: first.clone(),
                    second: source,
                });
            }
            by_name.insert(file_name.clone(), source.clone());
            artifacts.push(Artifact { source, file_name });
        }

        log::debug!("Collected {} classpath artifact(s)", artifacts.len());
        Ok(Self { artifacts })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Classpath entries as the launcher sees them: `lib<sep><name>`, sorted.
    pub fn classpath(&self, separator: char) -> Vec<String> {
        let mut entries: Vec<String> = self
            .artifacts
            .iter()
            .map(|a| format!("{LIB_DIR}{separator}{}", a.file_name))
            .collect();
        entries.sort();
        entries
    }
}

/// Expands glob patterns relative to `base` into matching paths.
///
/// Entries without glob metacharacters are passed through unchanged, even if
/// they do not exist yet, so a missing artifact is reported during staging.
/// Matches of one pattern are returned in sorted order.
pub fn expand_patterns(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let joined = base.join(pattern);
        if !pattern.contains(['*', '?', '[']) {
            paths.push(joined);
            continue;
        }

        let joined = joined.to_string_lossy().into_owned();
        let mut matches = glob::glob(&joined)?.collect::<std::result::Result<Vec<_>, _>>()?;
        if matches.is_empty() {
            log::warn!("Pattern {} matched no files", pattern);
        }
        matches.sort();
        paths.extend(matches);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_duplicate_paths_collapse() {
        let jar = PathBuf::from("build/libs/foo.jar");
        let set = ArtifactSet::collect(&[jar.clone(), jar.clone()], &[jar]).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equivalent_paths_collapse() {
        let set = ArtifactSet::collect(
            &[PathBuf::from("libs/foo.jar"), PathBuf::from("libs/./foo.jar")],
            &[],
        )
        .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_name_collision_rejected() {
        let err = ArtifactSet::collect(
            &[PathBuf::from("a/util.jar"), PathBuf::from("b/util.jar")],
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ArtifactNameCollision { ref name, .. } if name == "util.jar"));
    }

    #[test]
    fn test_classpath_is_sorted() {
        let set = ArtifactSet::collect(
            &[PathBuf::from("x/zeta.jar"), PathBuf::from("y/alpha.jar")],
            &[PathBuf::from("build/classes")],
        )
        .unwrap();
        assert_eq!(set.classpath('/'), ["lib/alpha.jar", "lib/classes", "lib/zeta.jar"]);
        assert_eq!(set.classpath('\\')[0], "lib\\alpha.jar");
    }

    #[test]
    fn test_empty_set() {
        let set = ArtifactSet::collect(&[], &[]).unwrap();
        assert!(set.is_empty());
        assert!(set.classpath('/').is_empty());
    }

    #[test]
    fn test_expand_patterns() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("libs")).unwrap();
        std::fs::write(dir.path().join("libs/b.jar"), b"").unwrap();
        std::fs::write(dir.path().join("libs/a.jar"), b"").unwrap();
        std::fs::write(dir.path().join("libs/notes.txt"), b"").unwrap();

        let paths = expand_patterns(
            dir.path(),
            &["libs/*.jar".to_string(), "missing.jar".to_string()],
        )
        .unwrap();
        assert_eq!(
            paths,
            [
                dir.path().join("libs/a.jar"),
                dir.path().join("libs/b.jar"),
                dir.path().join("missing.jar"),
            ]
        );
    }
}
