//! Resolved configuration for one packaging run.

use crate::packager::error::{Error, Result};
use crate::packager::icon::CONVERTED_ICON;
use crate::packager::resources::RESOURCE_EDITOR;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Version and icon metadata written into the launcher's resource section.
///
/// Every field is optional. An absent field is left untouched in the launcher
/// rather than being set to an empty value.
///
/// # Examples
///
/// ```no_run
/// use jini::packager::ResourceMetadata;
///
/// let metadata = ResourceMetadata {
///     file_version: Some("1.0.0.959".into()),
///     product_name: Some("Jini Test GUI".into()),
///     ..Default::default()
/// };
/// assert!(!metadata.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMetadata {
    /// Binary file version (`--set-file-version`).
    pub file_version: Option<String>,

    /// Product version (`--set-product-version`).
    pub product_version: Option<String>,

    /// `ProductName` version string.
    pub product_name: Option<String>,

    /// `FileDescription` version string.
    pub file_description: Option<String>,

    /// `Comments` version string.
    pub comments: Option<String>,

    /// `LegalCopyright` version string.
    pub copyright: Option<String>,

    /// Icon file (`.ico`, or `.png` converted before patching).
    pub icon: Option<PathBuf>,
}

impl ResourceMetadata {
    /// Returns true when no field is set, meaning the launcher needs no patching.
    pub fn is_empty(&self) -> bool {
        self.file_version.is_none()
            && self.product_version.is_none()
            && self.product_name.is_none()
            && self.file_description.is_none()
            && self.comments.is_none()
            && self.copyright.is_none()
            && self.icon.is_none()
    }
}

/// Immutable description of a single packaging run.
///
/// Constructed once through [`RequestBuilder`] and handed to
/// [`Packager`](crate::packager::Packager).
#[derive(Clone, Debug)]
pub struct PackagingRequest {
    main_class: String,
    executable_name: String,
    console_executable_name: Option<String>,
    vm_args: Vec<String>,
    args: Vec<String>,
    metadata: ResourceMetadata,
    archives: Vec<PathBuf>,
    class_outputs: Vec<PathBuf>,
    output_dir: PathBuf,
    path_separator: char,
}

impl PackagingRequest {
    /// Fully-qualified name of the class the JVM starts.
    pub fn main_class(&self) -> &str {
        &self.main_class
    }

    /// File name of the GUI launcher in the output root.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// File name of the console launcher, when one was requested.
    pub fn console_executable_name(&self) -> Option<&str> {
        self.console_executable_name.as_deref()
    }

    /// JVM flags, without duplicates.
    pub fn vm_args(&self) -> &[String] {
        &self.vm_args
    }

    /// Program arguments, without duplicates.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Launcher resource metadata.
    pub fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    /// Dependency archives (jars).
    pub fn archives(&self) -> &[PathBuf] {
        &self.archives
    }

    /// Loose compiled output (class directories or single files).
    pub fn class_outputs(&self) -> &[PathBuf] {
        &self.class_outputs
    }

    /// Output root directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Separator placed between the library directory and each classpath entry.
    pub fn path_separator(&self) -> char {
        self.path_separator
    }
}

/// Builder for [`PackagingRequest`].
///
/// # Examples
///
/// ```no_run
/// use jini::packager::RequestBuilder;
///
/// # fn example() -> jini::packager::Result<()> {
/// let request = RequestBuilder::new()
///     .main_class("com.sb.Test")
///     .executable_name("jini-test.exe")
///     .vm_arg("-Xmx64m")
///     .archive("build/libs/foo.jar")
///     .output_dir("build/jini")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RequestBuilder {
    main_class: Option<String>,
    executable_name: Option<String>,
    console_executable_name: Option<String>,
    vm_args: Vec<String>,
    args: Vec<String>,
    metadata: ResourceMetadata,
    archives: Vec<PathBuf>,
    class_outputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    path_separator: Option<char>,
}

impl RequestBuilder {
    /// Creates a new request builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the main class. Required.
    pub fn main_class(mut self, main_class: impl Into<String>) -> Self {
        self.main_class = Some(main_class.into());
        self
    }

    /// Sets the GUI launcher file name. Required.
    pub fn executable_name(mut self, name: impl Into<String>) -> Self {
        self.executable_name = Some(name.into());
        self
    }

    /// Sets the console launcher file name.
    pub fn console_executable_name(mut self, name: impl Into<String>) -> Self {
        self.console_executable_name = Some(name.into());
        self
    }

    /// Adds one JVM flag.
    pub fn vm_arg(mut self, arg: impl Into<String>) -> Self {
        self.vm_args.push(arg.into());
        self
    }

    /// Adds JVM flags.
    pub fn vm_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vm_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds one program argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds program arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets launcher resource metadata.
    ///
    /// Default: empty (no patching)
    pub fn metadata(mut self, metadata: ResourceMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Adds a dependency archive.
    pub fn archive<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.archives.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds dependency archives.
    pub fn archives<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.archives
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Adds a loose compiled-output entry.
    pub fn class_output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.class_outputs.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds loose compiled-output entries.
    pub fn class_outputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.class_outputs
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Sets the output root. Required.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the classpath separator.
    ///
    /// Default: the host's path separator
    pub fn path_separator(mut self, separator: char) -> Self {
        self.path_separator = Some(separator);
        self
    }

    /// Validates the collected values and builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when:
    /// - `main_class`, `executable_name` or `output_dir` is missing
    /// - `main_class` is blank
    /// - an executable name is blank or contains a directory separator
    /// - an executable name clashes with a temporary file cleanup removes
    /// - the console name equals the GUI executable name
    pub fn build(self) -> Result<PackagingRequest> {
        let main_class = self
            .main_class
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .ok_or_else(|| Error::InvalidRequest("main class is required".into()))?;

        let executable_name = self
            .executable_name
            .ok_or_else(|| Error::InvalidRequest("executable name is required".into()))?;
        validate_file_name("executable name", &executable_name)?;

        if let Some(console) = &self.console_executable_name {
            validate_file_name("console executable name", console)?;
            if console.eq_ignore_ascii_case(&executable_name) {
                return Err(Error::InvalidRequest(format!(
                    "console executable name {console} must differ from the executable name"
                )));
            }
        }

        let output_dir = self
            .output_dir
            .ok_or_else(|| Error::InvalidRequest("output directory is required".into()))?;

        Ok(PackagingRequest {
            main_class,
            executable_name,
            console_executable_name: self.console_executable_name,
            vm_args: dedup_preserving_order(self.vm_args),
            args: dedup_preserving_order(self.args),
            metadata: self.metadata,
            archives: self.archives,
            class_outputs: self.class_outputs,
            output_dir,
            path_separator: self.path_separator.unwrap_or(MAIN_SEPARATOR),
        })
    }
}

/// Files placed in the output root during a run and removed afterwards.
const TEMPORARY_FILES: [&str; 2] = [RESOURCE_EDITOR, CONVERTED_ICON];

/// Rejects names that are empty, would escape the output root, or would be
/// overwritten and then deleted as a temporary file.
fn validate_file_name(label: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidRequest(format!("{label} must not be empty")));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::InvalidRequest(format!(
            "{label} {name} must be a plain file name"
        )));
    }
    if TEMPORARY_FILES.iter().any(|t| t.eq_ignore_ascii_case(name)) {
        return Err(Error::InvalidRequest(format!(
            "{label} {name} is reserved for a temporary packaging file"
        )));
    }
    Ok(())
}

/// Removes repeated entries, keeping the first occurrence of each.
fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> RequestBuilder {
        RequestBuilder::new()
            .main_class("com.sb.Test")
            .executable_name("jini-test.exe")
            .output_dir("build/jini")
    }

    #[test]
    fn test_build_minimal_request() {
        let request = minimal().build().unwrap();
        assert_eq!(request.main_class(), "com.sb.Test");
        assert_eq!(request.executable_name(), "jini-test.exe");
        assert!(request.console_executable_name().is_none());
        assert!(request.metadata().is_empty());
        assert_eq!(request.path_separator(), MAIN_SEPARATOR);
    }

    #[test]
    fn test_blank_main_class_rejected() {
        let err = minimal().main_class("   ").build().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_missing_executable_rejected() {
        let err = RequestBuilder::new()
            .main_class("com.sb.Test")
            .output_dir("out")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("executable name is required"));
    }

    #[test]
    fn test_executable_with_directory_rejected() {
        let err = minimal().executable_name("bin/app.exe").build().unwrap_err();
        assert!(err.to_string().contains("plain file name"));
    }

    #[test]
    fn test_console_name_must_differ() {
        let err = minimal()
            .console_executable_name("JINI-TEST.EXE")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_temporary_file_names_rejected() {
        for name in ["rcedit.exe", "RCEDIT.EXE", "jini-icon.ico"] {
            let err = minimal().executable_name(name).build().unwrap_err();
            assert!(err.to_string().contains("reserved"), "{name}: {err}");

            let err = minimal().console_executable_name(name).build().unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)), "{name}");
        }
    }

    #[test]
    fn test_arguments_are_deduplicated_in_order() {
        let request = minimal()
            .vm_args(["-Xmx64m", "-Dfoo=1", "-Xmx64m"])
            .args(["b", "a", "b"])
            .build()
            .unwrap();
        assert_eq!(request.vm_args(), ["-Xmx64m", "-Dfoo=1"]);
        assert_eq!(request.args(), ["b", "a"]);
    }

    #[test]
    fn test_metadata_emptiness() {
        assert!(ResourceMetadata::default().is_empty());
        let icon_only = ResourceMetadata {
            icon: Some(PathBuf::from("app.ico")),
            ..Default::default()
        };
        assert!(!icon_only.is_empty());
    }
}
