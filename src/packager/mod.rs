//! Packages a compiled JVM application into a Windows launcher directory.
//!
//! The output root receives the renamed launcher executable(s) and a `lib/`
//! directory holding every classpath artifact plus the `package.json`
//! startup descriptor the launcher reads at run time. When version or icon
//! metadata is supplied, the launcher's resource section is patched with an
//! external resource editor.
//!
//! # Example
//!
//! ```no_run
//! use jini::packager::{MemoryResources, Packager, RequestBuilder, SystemCommandRunner};
//!
//! # async fn example() -> jini::packager::Result<()> {
//! let request = RequestBuilder::new()
//!     .main_class("com.sb.Test")
//!     .executable_name("jini-test.exe")
//!     .vm_arg("-Xmx64m")
//!     .archive("foo.jar")
//!     .output_dir("build/jini")
//!     .build()?;
//!
//! let resources = MemoryResources::new()
//!     .with("jini.exe", std::fs::read("jini.exe")?)
//!     .with("rcedit.exe", std::fs::read("rcedit.exe")?);
//!
//! Packager::new(request, resources, SystemCommandRunner::new())
//!     .package()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod classpath;
pub mod cleanup;
pub mod command;
pub mod descriptor;
pub mod error;
pub mod icon;
pub mod patcher;
mod pipeline;
pub mod request;
pub mod resources;
pub mod stager;
pub mod utils;

pub use classpath::{Artifact, ArtifactSet, LIB_DIR};
pub use command::{CommandOutput, CommandRunner, Invocation, SystemCommandRunner};
pub use descriptor::{DESCRIPTOR_FILE, Descriptor};
pub use error::{Context, Error, ErrorExt, Result};
pub use pipeline::{PackagedOutput, Packager};
pub use request::{PackagingRequest, RequestBuilder, ResourceMetadata};
pub use resources::{
    CONSOLE_LAUNCHER, DirectoryResources, LAUNCHER, MemoryResources, RESOURCE_EDITOR,
    ResourceProvider,
};
pub use stager::{FailedArtifact, StagingReport};
