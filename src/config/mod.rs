//! `jini.toml` project configuration.
//!
//! Every key is optional; command line flags override or extend what the
//! file provides. Relative paths in the file are resolved against the
//! directory containing it.
//!
//! ```toml
//! main_class = "com.sb.Test"
//! executable = "jini-test.exe"
//! console_executable = "jini-test-cli.exe"
//! output_dir = "build/jini"
//! vm_args = ["-Xmx64m"]
//! archives = ["build/libs/*.jar"]
//! class_outputs = ["build/classes/java/main"]
//!
//! [metadata]
//! file_version = "1.0.0.959"
//! product_name = "Jini Test GUI"
//! copyright = "Bochkov Sergey"
//! icon = "src/main/icon.png"
//! ```

use crate::error::ConfigError;
use crate::packager::ResourceMetadata;
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the current directory when no config path is given.
pub const CONFIG_FILE: &str = "jini.toml";

/// Output root used when neither the file nor the command line names one.
pub const DEFAULT_OUTPUT_DIR: &str = "build/jini";

/// Parsed `jini.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JiniConfig {
    pub main_class: Option<String>,
    pub executable: Option<String>,
    pub console_executable: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub resources_dir: Option<PathBuf>,
    pub vm_args: Vec<String>,
    pub args: Vec<String>,
    /// Dependency archives; glob patterns allowed.
    pub archives: Vec<String>,
    /// Loose compiled output; glob patterns allowed.
    pub class_outputs: Vec<String>,
    /// Single character placed between `lib` and each classpath entry.
    pub path_separator: Option<String>,
    pub editor_host: Option<PathBuf>,
    pub editor_timeout_secs: Option<u64>,
    pub metadata: MetadataConfig,

    #[serde(skip)]
    base_dir: PathBuf,
}

/// `[metadata]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataConfig {
    pub file_version: Option<String>,
    pub product_version: Option<String>,
    pub product_name: Option<String>,
    pub file_description: Option<String>,
    pub comments: Option<String>,
    pub copyright: Option<String>,
    pub icon: Option<PathBuf>,
}

impl JiniConfig {
    /// Parses `content` as if read from a file in `base_dir`.
    pub fn parse(content: &str, path: &Path, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: JiniConfig =
            toml::from_str(content).map_err(|source| ConfigError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;
        config.base_dir = base_dir.to_path_buf();
        config.path_separator()?;
        Ok(config)
    }

    /// Loads the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let absolute = absolutize(path)?;
        let base_dir = absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        log::debug!("Loaded config from {}", absolute.display());
        Self::parse(&content, path, &base_dir)
    }

    /// Loads `explicit` when given, otherwise `./jini.toml` when present,
    /// otherwise an empty config rooted at the current directory.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = Path::new(CONFIG_FILE);
        if default_path.is_file() {
            return Self::load(default_path);
        }

        log::debug!("No {} found, using command line values only", CONFIG_FILE);
        Ok(Self {
            base_dir: absolutize(Path::new("."))?,
            ..Default::default()
        })
    }

    /// Directory relative config paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves a path from the file against [`base_dir`](Self::base_dir).
    pub fn resolve_path(&self, path: &Path) -> Result<PathBuf, ConfigError> {
        absolutize(&self.base_dir.join(path))
    }

    /// Parsed `path_separator`.
    pub fn path_separator(&self) -> Result<Option<char>, ConfigError> {
        self.path_separator
            .as_deref()
            .map(parse_separator)
            .transpose()
            .map_err(|reason| ConfigError::InvalidValue {
                key: "path_separator".to_string(),
                reason,
            })
    }

    /// `[metadata]` with the icon resolved against the config directory.
    pub fn resource_metadata(&self) -> Result<ResourceMetadata, ConfigError> {
        let m = &self.metadata;
        Ok(ResourceMetadata {
            file_version: m.file_version.clone(),
            product_version: m.product_version.clone(),
            product_name: m.product_name.clone(),
            file_description: m.file_description.clone(),
            comments: m.comments.clone(),
            copyright: m.copyright.clone(),
            icon: m.icon.as_deref().map(|p| self.resolve_path(p)).transpose()?,
        })
    }
}

/// Accepts exactly one character.
pub fn parse_separator(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got {:?}", value)),
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let content = r#"
            main_class = "com.sb.Test"
            executable = "jini-test.exe"
            vm_args = ["-Xmx64m"]
            archives = ["libs/*.jar"]
            path_separator = "/"

            [metadata]
            file_version = "1.0.0.959"
            copyright = "Bochkov Sergey"
            icon = "icon.png"
        "#;
        let config =
            JiniConfig::parse(content, Path::new("jini.toml"), Path::new("/project")).unwrap();

        assert_eq!(config.main_class.as_deref(), Some("com.sb.Test"));
        assert_eq!(config.vm_args, ["-Xmx64m"]);
        assert_eq!(config.path_separator().unwrap(), Some('/'));

        let metadata = config.resource_metadata().unwrap();
        assert_eq!(metadata.file_version.as_deref(), Some("1.0.0.959"));
        assert!(metadata.product_name.is_none());
        assert_eq!(metadata.icon.unwrap(), Path::new("/project/icon.png"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = JiniConfig::parse("mian_class = \"x\"", Path::new("jini.toml"), Path::new("/"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn test_bad_separator_rejected() {
        let content = "path_separator = \"::\"";
        let err = JiniConfig::parse(content, Path::new("jini.toml"), Path::new("/")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "path_separator"));
    }

    #[test]
    fn test_load_resolves_against_file_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "output_dir = \"out\"\n").unwrap();

        let config = JiniConfig::load(&path).unwrap();
        let output = config.resolve_path(config.output_dir.as_deref().unwrap()).unwrap();
        assert_eq!(output, absolutize(&dir.path().join("out")).unwrap());
    }

    #[test]
    fn test_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = JiniConfig::discover(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}
