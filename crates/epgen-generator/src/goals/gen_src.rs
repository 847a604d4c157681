//! Client source generation from discovery documents.

use epgen_spec::ProjectConfig;

use crate::error::GoalResult;
use crate::invoker::Generator;
use crate::pipeline::{Pipeline, PipelineReport};
use crate::workspace::WorkspaceManager;

/// Generates client sources for the configured discovery documents into the
/// generated source directory.
pub fn run<G: Generator + ?Sized>(
    config: &ProjectConfig,
    generator: &G,
) -> GoalResult<PipelineReport> {
    run_in(config, generator, WorkspaceManager::new())
}

/// Like [`run`], staging generator output through `workspace`.
pub fn run_in<G: Generator + ?Sized>(
    config: &ProjectConfig,
    generator: &G,
    workspace: WorkspaceManager,
) -> GoalResult<PipelineReport> {
    config.validate_for_gen_src()?;

    let report = Pipeline::new(generator)
        .workspace(workspace)
        .run(&config.discovery_docs(), &config.generated_src_dir())?;
    Ok(report)
}
