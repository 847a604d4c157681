//! Client source generation pipeline.
//!
//! For every discovery document the generator writes a client library
//! archive into a private staging area; once all documents have been
//! generated, the Java sources of each archive are extracted into the
//! destination source root. The staging area is removed on every exit path.

use std::path::{Path, PathBuf};

use epgen_spec::{ClientTarget, GenerationRequest};
use tracing::info;

use crate::archive::{ArchiveLayout, ExtractionSummary, Extractor, MavenLayout};
use crate::error::{PipelineError, PipelineResult};
use crate::invoker::Generator;
use crate::workspace::{ensure_dir, StagingArea, WorkspaceManager};

/// Outcome of extracting one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Archive file name, e.g. `testApi-v1-java.zip`.
    pub name: String,
    pub summary: ExtractionSummary,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Directory to register as a compile source root.
    pub source_root: PathBuf,
    /// Per-archive results, in extraction order.
    pub archives: Vec<ArchiveReport>,
}

impl PipelineReport {
    /// Returns every file written across all archives.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.archives
            .iter()
            .flat_map(|a| a.summary.written.iter().map(PathBuf::as_path))
    }

    /// Returns the number of files left alone because they already existed.
    pub fn skipped_count(&self) -> usize {
        self.archives.iter().map(|a| a.summary.skipped.len()).sum()
    }
}

/// Runs `gen-client-lib` for each document and extracts the sources.
#[derive(Debug, Clone)]
pub struct Pipeline<G, L = MavenLayout> {
    generator: G,
    workspace: WorkspaceManager,
    extractor: Extractor<L>,
    client: ClientTarget,
}

impl<G: Generator> Pipeline<G, MavenLayout> {
    /// Creates a pipeline with the default workspace, Maven layout, and
    /// Java/Maven client target.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            workspace: WorkspaceManager::new(),
            extractor: Extractor::new(),
            client: ClientTarget::java_maven(),
        }
    }
}

impl<G: Generator, L: ArchiveLayout> Pipeline<G, L> {
    /// Sets where staging areas are allocated.
    pub fn workspace(mut self, workspace: WorkspaceManager) -> Self {
        self.workspace = workspace;
        self
    }

    /// Sets the archive layout.
    pub fn layout<M: ArchiveLayout>(self, layout: M) -> Pipeline<G, M> {
        Pipeline {
            generator: self.generator,
            workspace: self.workspace,
            extractor: Extractor::with_layout(layout),
            client: self.client,
        }
    }

    /// Sets the client language and build system requested from the generator.
    pub fn client(mut self, client: ClientTarget) -> Self {
        self.client = client;
        self
    }

    /// Generates and extracts client sources for `documents` into `destination`.
    ///
    /// Documents are generated in the order given and the first generator
    /// failure ends the run before anything is extracted. Archives are
    /// extracted in file name order; when two archives contain the same
    /// source path the first one extracted wins.
    pub fn run(&self, documents: &[PathBuf], destination: &Path) -> PipelineResult<PipelineReport> {
        ensure_dir(destination)?;
        info!(source_root = %destination.display(), "Registered generated source root");

        let staging = self.workspace.acquire()?;
        let result = self.run_staged(&staging, documents, destination);
        staging.release();
        result
    }

    fn run_staged(
        &self,
        staging: &StagingArea,
        documents: &[PathBuf],
        destination: &Path,
    ) -> PipelineResult<PipelineReport> {
        for document in documents {
            let request = GenerationRequest::gen_client_lib(
                staging.archive_dir(),
                self.client.clone(),
                document,
            );
            self.generator
                .invoke(&request)
                .map_err(|source| PipelineError::Generation {
                    document: document.clone(),
                    source,
                })?;
        }

        let mut report = PipelineReport {
            source_root: destination.to_path_buf(),
            archives: Vec::new(),
        };

        for archive in staging.archives()? {
            let summary = self
                .extractor
                .extract(&archive, destination)
                .map_err(|source| PipelineError::Extraction {
                    archive: archive.clone(),
                    source,
                })?;

            let name = archive
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!(
                archive = %name,
                written = summary.written.len(),
                skipped = summary.skipped.len(),
                "Extracted client sources"
            );
            report.archives.push(ArchiveReport { name, summary });
        }

        Ok(report)
    }
}
