//! Project goals.
//!
//! Each goal turns a [`ProjectConfig`](epgen_spec::ProjectConfig) into one
//! or more generator invocations:
//!
//! - [`discovery_docs`] - discovery documents from service classes
//! - [`openapi_docs`] - an OpenAPI document from service classes
//! - [`client_libs`] - client library archives from service classes
//! - [`gen_src`] - client sources extracted from discovery documents

pub mod client_libs;
pub mod discovery_docs;
pub mod gen_src;
pub mod openapi_docs;

use std::path::{Path, PathBuf};

use epgen_spec::{ActionKind, GenerationRequestBuilder, ProjectConfig};
use walkdir::WalkDir;

use crate::error::{GoalResult, WorkspaceError};

/// Outcome of a document or library goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalReport {
    /// The generator action that ran.
    pub action: ActionKind,
    /// Directory the generator wrote to.
    pub output_dir: PathBuf,
    /// Matching files found in `output_dir` after the run, sorted.
    pub artifacts: Vec<PathBuf>,
}

/// Starts a request with the flags shared by the service-class goals:
/// classpath, webapp directory, host overrides, and service classes.
pub(crate) fn service_request(
    config: &ProjectConfig,
    action: ActionKind,
    output: PathBuf,
) -> GoalResult<GenerationRequestBuilder> {
    Ok(GenerationRequestBuilder::new(action, output)
        .classpath(config.classpath_string()?)
        .webapp_dir(config.webapp_dir())
        .maybe_hostname(config.hostname.as_deref())
        .maybe_base_path(config.base_path.as_deref())
        .targets(config.service_classes.iter().cloned()))
}

/// Lists files directly inside `dir` whose names satisfy `matches`.
pub(crate) fn collect_artifacts(
    dir: &Path,
    matches: impl Fn(&str) -> bool,
) -> GoalResult<Vec<PathBuf>> {
    let mut artifacts = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| WorkspaceError::List {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && matches(&entry.file_name().to_string_lossy()) {
            artifacts.push(entry.into_path());
        }
    }
    Ok(artifacts)
}
