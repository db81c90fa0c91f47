//! # jini
//!
//! Packages a compiled JVM application into a directory that starts it
//! through a native Windows launcher.
//!
//! ## Output layout
//!
//! ```text
//! build/jini/
//! ├── app.exe            renamed GUI launcher, optionally resource-patched
//! ├── app-cli.exe        optional console launcher
//! └── lib/
//!     ├── foo.jar        every classpath artifact, by base name
//!     └── package.json   startup descriptor read by the launcher
//! ```
//!
//! ## Usage
//!
//! ```bash
//! jini package                                   # values from ./jini.toml
//! jini package --main-class com.sb.Test --executable app.exe --archive 'libs/*.jar'
//! jini validate                                  # check without writing
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod error;
pub mod packager;

pub use cli::Args;
pub use config::JiniConfig;
pub use error::{CliError, ConfigError, JiniError, Result};
pub use packager::{PackagedOutput, Packager, PackagingRequest, RequestBuilder};
