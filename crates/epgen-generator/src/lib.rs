//! epgen Generation Pipeline
//!
//! This crate drives the Endpoints Framework generator tool to produce API
//! description documents, client library archives, and client source trees
//! for a project.
//!
//! # Architecture
//!
//! The pipeline is built from four pieces, leaf first:
//!
//! 1. **Workspace** - Allocates a private staging directory and removes it on
//!    every exit path
//! 2. **Invoker** - Renders a [`GenerationRequest`](epgen_spec::GenerationRequest)
//!    into a command line and runs the generator
//! 3. **Archive** - Copies the `src/main/java` subtree of a generated client
//!    library archive into a source root, never overwriting existing files
//! 4. **Pipeline** - Generates one archive per discovery document into the
//!    staging area, then extracts all of them
//!
//! # Example
//!
//! ```ignore
//! use epgen_generator::{CommandGenerator, Pipeline};
//! use std::path::{Path, PathBuf};
//!
//! let pipeline = Pipeline::new(CommandGenerator::new());
//! let report = pipeline.run(
//!     &[PathBuf::from("target/discovery-docs/testApi-v1-rest.discovery")],
//!     Path::new("target/generated-sources/endpoints"),
//! )?;
//!
//! for file in report.written() {
//!     println!("Generated: {}", file.display());
//! }
//! ```
//!
//! # Generator Requirements
//!
//! [`CommandGenerator`] looks for the generator in:
//!
//! 1. `generator.command` in the project configuration
//! 2. `EPGEN_TOOL_PATH` environment variable
//! 3. `endpoints-framework-tools` in the system PATH
//!
//! # Crate Structure
//!
//! - [`workspace`] - Staging area management
//! - [`invoker`] - Generator trait and subprocess implementation
//! - [`archive`] - Archive layout contract and extractor
//! - [`pipeline`] - Source generation pipeline
//! - [`goals`] - Discovery, OpenAPI, client library, and source goals
//! - [`error`] - Error types

pub mod archive;
pub mod error;
pub mod goals;
pub mod invoker;
pub mod pipeline;
pub mod workspace;

// Re-export main types at crate root
pub use archive::{ArchiveLayout, ExtractionSummary, Extractor, MavenLayout};
pub use error::{
    ExtractionError, GeneratorError, GoalError, PipelineError, WorkspaceError,
};
pub use goals::GoalReport;
pub use invoker::{CommandConfig, CommandGenerator, Generator, GeneratorOutput, ProgramSource};
pub use pipeline::{ArchiveReport, Pipeline, PipelineReport};
pub use workspace::{StagingArea, WorkspaceManager};
