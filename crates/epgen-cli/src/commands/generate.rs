//! Document and client library commands.

use std::process::ExitCode;

use anyhow::{Context, Result};
use epgen_generator::goals::{client_libs, discovery_docs, openapi_docs};
use epgen_generator::{Generator, GoalReport};
use epgen_spec::ProjectConfig;

use super::reporting::print_goal_report;
use crate::project;

/// Goals that generate from service classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceGoal {
    DiscoveryDocs,
    OpenApiDocs,
    ClientLibs,
}

impl ServiceGoal {
    /// Returns the command name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceGoal::DiscoveryDocs => "discovery-docs",
            ServiceGoal::OpenApiDocs => "openapi-docs",
            ServiceGoal::ClientLibs => "client-libs",
        }
    }
}

/// Runs a service goal with the configured generator.
pub fn run(goal: ServiceGoal, config: &ProjectConfig) -> Result<ExitCode> {
    let generator = project::generator(config);
    run_with(goal, config, &generator)
}

/// Runs a service goal with the given generator.
pub fn run_with<G: Generator + ?Sized>(
    goal: ServiceGoal,
    config: &ProjectConfig,
    generator: &G,
) -> Result<ExitCode> {
    let report = execute(goal, config, generator)
        .with_context(|| format!("{} failed", goal.as_str()))?;
    print_goal_report(&report);
    Ok(ExitCode::SUCCESS)
}

fn execute<G: Generator + ?Sized>(
    goal: ServiceGoal,
    config: &ProjectConfig,
    generator: &G,
) -> Result<GoalReport, epgen_generator::GoalError> {
    match goal {
        ServiceGoal::DiscoveryDocs => discovery_docs::run(config, generator),
        ServiceGoal::OpenApiDocs => openapi_docs::run(config, generator),
        ServiceGoal::ClientLibs => client_libs::run(config, generator),
    }
}
