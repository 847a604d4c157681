//! Client source generation command.

use std::process::ExitCode;

use anyhow::{Context, Result};
use epgen_generator::goals::gen_src;
use epgen_generator::{Generator, WorkspaceManager};
use epgen_spec::ProjectConfig;

use super::reporting::print_pipeline_report;
use crate::project;

/// Generates client sources with the configured generator.
pub fn run(config: &ProjectConfig) -> Result<ExitCode> {
    let generator = project::generator(config);
    run_with(config, &generator, WorkspaceManager::new())
}

/// Generates client sources with the given generator and staging location.
pub fn run_with<G: Generator + ?Sized>(
    config: &ProjectConfig,
    generator: &G,
    workspace: WorkspaceManager,
) -> Result<ExitCode> {
    let report =
        gen_src::run_in(config, generator, workspace).context("generate-src failed")?;
    print_pipeline_report(&report);
    Ok(ExitCode::SUCCESS)
}
