//! Client library generation.

use epgen_spec::{ActionKind, ClientTarget, ProjectConfig};

use super::{collect_artifacts, service_request, GoalReport};
use crate::error::GoalResult;
use crate::invoker::Generator;
use crate::workspace::ensure_dir;

/// Generates client library archives (`<api>-<version>-<language>.zip`) for
/// the configured service classes.
pub fn run<G: Generator + ?Sized>(config: &ProjectConfig, generator: &G) -> GoalResult<GoalReport> {
    let output_dir = config.client_lib_dir();
    ensure_dir(&output_dir)?;

    let request = service_request(config, ActionKind::GetClientLib, output_dir.clone())?
        .client(ClientTarget::java_maven())
        .build();
    generator.invoke(&request)?;

    let artifacts = collect_artifacts(&output_dir, |name| {
        name.to_ascii_lowercase().ends_with(crate::workspace::ARCHIVE_SUFFIX)
    })?;
    Ok(GoalReport {
        action: ActionKind::GetClientLib,
        output_dir,
        artifacts,
    })
}
