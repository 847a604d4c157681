//! Discovery document generation.

use epgen_spec::{ActionKind, ProjectConfig};

use super::{collect_artifacts, service_request, GoalReport};
use crate::error::GoalResult;
use crate::invoker::Generator;
use crate::workspace::ensure_dir;

/// File suffix of generated discovery documents
/// (`<api>-<version>-<format>.discovery`).
pub const DISCOVERY_SUFFIX: &str = ".discovery";

/// Generates discovery documents for the configured service classes.
pub fn run<G: Generator + ?Sized>(config: &ProjectConfig, generator: &G) -> GoalResult<GoalReport> {
    let output_dir = config.discovery_doc_dir();
    ensure_dir(&output_dir)?;

    let request = service_request(config, ActionKind::GetDiscoveryDoc, output_dir.clone())?
        .format(config.format)
        .build();
    generator.invoke(&request)?;

    let artifacts = collect_artifacts(&output_dir, |name| name.ends_with(DISCOVERY_SUFFIX))?;
    Ok(GoalReport {
        action: ActionKind::GetDiscoveryDoc,
        output_dir,
        artifacts,
    })
}
