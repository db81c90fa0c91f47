//! Startup descriptor read by the launcher at run time.

use crate::packager::error::{ErrorExt, Result};
use crate::packager::request::PackagingRequest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the descriptor inside the library directory.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// JSON document telling the launcher how to start the JVM.
///
/// Always contains all four keys; absent lists are written as `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(rename = "main.class")]
    pub main_class: String,
    #[serde(rename = "class.path")]
    pub class_path: Vec<String>,
    #[serde(rename = "vm.args")]
    pub vm_args: Vec<String>,
    pub args: Vec<String>,
}

impl Descriptor {
    /// Builds the descriptor for `request` using the given classpath entries.
    pub fn new(request: &PackagingRequest, class_path: Vec<String>) -> Self {
        Self {
            main_class: request.main_class().to_string(),
            class_path,
            vm_args: request.vm_args().to_vec(),
            args: request.args().to_vec(),
        }
    }

    /// Pretty-printed JSON, two-space indented.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the descriptor into `lib_dir`, replacing any existing one.
    pub async fn write(&self, lib_dir: &Path) -> Result<PathBuf> {
        let path = lib_dir.join(DESCRIPTOR_FILE);
        let json = self.to_json()?;
        tokio::fs::write(&path, json)
            .await
            .fs_context("writing startup descriptor", &path)?;
        log::debug!("Wrote descriptor {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::request::RequestBuilder;

    #[test]
    fn test_keys_and_empty_lists() {
        let request = RequestBuilder::new()
            .main_class("com.sb.Test")
            .executable_name("jini-test.exe")
            .output_dir("out")
            .build()
            .unwrap();
        let json = Descriptor::new(&request, vec![]).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "main.class": "com.sb.Test",
                "class.path": [],
                "vm.args": [],
                "args": []
            })
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let request = RequestBuilder::new()
            .main_class("com.sb.Test")
            .executable_name("a.exe")
            .output_dir("out")
            .arg("say \"hi\"\\now")
            .build()
            .unwrap();
        let json = Descriptor::new(&request, vec!["lib/foo.jar".into()])
            .to_json()
            .unwrap();
        let parsed: Descriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.args, ["say \"hi\"\\now"]);
        assert_eq!(parsed.class_path, ["lib/foo.jar"]);
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(DESCRIPTOR_FILE), "stale").unwrap();
        let descriptor = Descriptor {
            main_class: "com.sb.Test".into(),
            class_path: vec![],
            vm_args: vec!["-Xmx64m".into()],
            args: vec![],
        };

        let path = descriptor.write(dir.path()).await.unwrap();
        let written: Descriptor =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, descriptor);
    }
}
