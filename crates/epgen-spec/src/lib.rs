//! epgen Request and Configuration Library
//!
//! This crate provides the types shared by every part of epgen: the
//! generator actions, the typed generation request that is rendered into a
//! generator command line, and the project configuration that supplies
//! directories, classpath, and service classes.
//!
//! # Example
//!
//! ```
//! use epgen_spec::{ActionKind, DocFormat, GenerationRequest};
//!
//! let request = GenerationRequest::builder(ActionKind::GetDiscoveryDoc, "/out/discovery-docs")
//!     .format(DocFormat::Rest)
//!     .classpath("/project/target/classes")
//!     .webapp_dir("/project/src/main/webapp")
//!     .hostname("my.hostname.com")
//!     .target("com.example.TestApi")
//!     .build();
//!
//! let args = request.to_args();
//! assert_eq!(args[0], "get-discovery-doc");
//! assert_eq!(args.last().map(String::as_str), Some("com.example.TestApi"));
//! ```
//!
//! # Modules
//!
//! - [`action`] - Generator actions, document formats, client targets
//! - [`request`] - Generation requests and argument rendering
//! - [`config`] - Project configuration and defaults
//! - [`error`] - Stable error codes shared by all stages

pub mod action;
pub mod config;
pub mod error;
pub mod request;

pub use action::{ActionKind, ClientTarget, DocFormat};
pub use config::{ConfigError, GeneratorSettings, ProjectConfig, CONFIG_FILE_NAME};
pub use error::StageError;
pub use request::{GenerationRequest, GenerationRequestBuilder};
