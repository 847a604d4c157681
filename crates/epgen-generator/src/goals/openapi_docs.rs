//! OpenAPI document generation.

use epgen_spec::{ActionKind, ProjectConfig};

use super::{collect_artifacts, service_request, GoalReport};
use crate::error::GoalResult;
use crate::invoker::Generator;
use crate::workspace::ensure_dir;

/// File name of the generated OpenAPI document.
pub const OPENAPI_FILE_NAME: &str = "openapi.json";

/// Generates `openapi.json` for the configured service classes.
///
/// Unlike the other goals the generator is given the document path rather
/// than its directory.
pub fn run<G: Generator + ?Sized>(config: &ProjectConfig, generator: &G) -> GoalResult<GoalReport> {
    let output_dir = config.openapi_doc_dir();
    ensure_dir(&output_dir)?;

    let request = service_request(
        config,
        ActionKind::GetOpenApiDoc,
        output_dir.join(OPENAPI_FILE_NAME),
    )?
    .build();
    generator.invoke(&request)?;

    let artifacts = collect_artifacts(&output_dir, |name| name == OPENAPI_FILE_NAME)?;
    Ok(GoalReport {
        action: ActionKind::GetOpenApiDoc,
        output_dir,
        artifacts,
    })
}
