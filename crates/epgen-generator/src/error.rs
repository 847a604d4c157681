//! Error types for the generation pipeline.

use std::path::PathBuf;
use std::time::Duration;

use epgen_spec::{ConfigError, StageError};
use thiserror::Error;

/// Result type for generator invocations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Result type for archive extraction.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Result type for staging and output directory management.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Result type for source generation pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for goal runs.
pub type GoalResult<T> = Result<T, GoalError>;

/// Errors raised by the external generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Generator executable not found.
    #[error("Endpoints generator '{program}' not found. Install it in PATH, set EPGEN_TOOL_PATH, or configure generator.command")]
    NotFound { program: String },

    /// Failed to spawn the generator process.
    #[error("Failed to spawn generator {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generator process timed out.
    #[error("Generator timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Generator exited with a non-zero status.
    #[error("Generator exited with status {exit_code}: {stderr}")]
    Failed { exit_code: i32, stderr: String },
}

impl GeneratorError {
    /// Creates a new non-zero exit error.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::Failed {
            exit_code,
            stderr: stderr.into(),
        }
    }
}

impl StageError for GeneratorError {
    fn code(&self) -> &'static str {
        match self {
            GeneratorError::NotFound { .. } => "GEN_001",
            GeneratorError::Spawn { .. } => "GEN_002",
            GeneratorError::Timeout { .. } => "GEN_003",
            GeneratorError::Failed { .. } => "GEN_004",
        }
    }

    fn stage(&self) -> &'static str {
        "generator"
    }
}

/// Errors raised while extracting an archive.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Archive could not be opened, is corrupt, or an entry could not be read.
    #[error("Failed to read archive {archive}: {source}")]
    Unreadable {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Destination file or directory could not be written.
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StageError for ExtractionError {
    fn code(&self) -> &'static str {
        match self {
            ExtractionError::Unreadable { .. } => "EXTRACT_001",
            ExtractionError::WriteFailed { .. } => "EXTRACT_002",
        }
    }

    fn stage(&self) -> &'static str {
        "extraction"
    }
}

/// Errors raised while preparing staging or output directories.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Staging area could not be created.
    #[error("Failed to create staging area: {0}")]
    Staging(#[source] std::io::Error),

    /// Output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory listing failed.
    #[error("Failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StageError for WorkspaceError {
    fn code(&self) -> &'static str {
        match self {
            WorkspaceError::Staging(_) => "WORKSPACE_001",
            WorkspaceError::Destination { .. } => "WORKSPACE_002",
            WorkspaceError::List { .. } => "WORKSPACE_003",
        }
    }

    fn stage(&self) -> &'static str {
        "workspace"
    }
}

/// Errors raised by a source generation run.
///
/// Each variant names the stage that failed and, where there is one, the
/// document or archive being processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Staging or destination setup failed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Generator failed for a document.
    #[error("Generator failed for {document}: {source}")]
    Generation {
        document: PathBuf,
        #[source]
        source: GeneratorError,
    },

    /// Extraction failed for an archive.
    #[error("Failed to extract {archive}: {source}")]
    Extraction {
        archive: PathBuf,
        #[source]
        source: ExtractionError,
    },
}

impl StageError for PipelineError {
    fn code(&self) -> &'static str {
        match self {
            PipelineError::Workspace(e) => e.code(),
            PipelineError::Generation { source, .. } => source.code(),
            PipelineError::Extraction { source, .. } => source.code(),
        }
    }

    fn stage(&self) -> &'static str {
        match self {
            PipelineError::Workspace(e) => e.stage(),
            PipelineError::Generation { source, .. } => source.stage(),
            PipelineError::Extraction { source, .. } => source.stage(),
        }
    }
}

/// Errors raised by a goal.
#[derive(Debug, Error)]
pub enum GoalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl StageError for GoalError {
    fn code(&self) -> &'static str {
        match self {
            GoalError::Config(e) => e.code(),
            GoalError::Workspace(e) => e.code(),
            GoalError::Generator(e) => e.code(),
            GoalError::Pipeline(e) => e.code(),
        }
    }

    fn stage(&self) -> &'static str {
        match self {
            GoalError::Config(e) => e.stage(),
            GoalError::Workspace(e) => e.stage(),
            GoalError::Generator(e) => e.stage(),
            GoalError::Pipeline(e) => e.stage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::NotFound {
            program: "endpoints-framework-tools".to_string(),
        };
        assert!(err.to_string().contains("endpoints-framework-tools"));

        let err = GeneratorError::Timeout {
            timeout: Duration::from_secs(30),
        };
        assert!(err.to_string().contains("30s"));

        let err = GeneratorError::Timeout {
            timeout: Duration::from_millis(250),
        };
        assert!(err.to_string().contains("250ms"));

        let err = GeneratorError::failed(2, "No such service class");
        assert!(err.to_string().contains("status 2"));
        assert!(err.to_string().contains("No such service class"));
    }

    #[test]
    fn test_pipeline_error_names_document_and_stage() {
        let err = PipelineError::Generation {
            document: PathBuf::from("docs/testApi-v1-rest.discovery"),
            source: GeneratorError::failed(1, "bad doc"),
        };

        assert!(err.to_string().contains("testApi-v1-rest.discovery"));
        assert_eq!(err.stage(), "generator");
        assert_eq!(err.code(), "GEN_004");
    }

    #[test]
    fn test_goal_error_delegates_codes() {
        let err = GoalError::from(WorkspaceError::Destination {
            path: PathBuf::from("/readonly/out"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });

        assert_eq!(err.code(), "WORKSPACE_002");
        assert_eq!(err.stage(), "workspace");
        assert!(err.to_string().contains("/readonly/out"));
    }
}
