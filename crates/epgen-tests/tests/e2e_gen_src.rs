//! End-to-End Source Generation Tests
//!
//! Drives discovery documents through generation, staging, and extraction
//! with a scripted generator.
//!
//! ```bash
//! cargo test -p epgen-tests --test e2e_gen_src
//! ```

use std::fs;

use epgen_generator::goals::gen_src;
use epgen_generator::{GeneratorError, GoalError, PipelineError, WorkspaceManager};
use epgen_spec::StageError;
use epgen_tests::{list_files, maven_client_archive, ArchiveBuilder, FakeGenerator, ProjectFixture};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

const TEST_API_DOC: &str = "testApi-v1-rest.discovery";

fn test_api_project() -> ProjectFixture {
    let project = ProjectFixture::new();
    project.add_discovery_doc(TEST_API_DOC);
    project.write_config(json!({
        "discovery_docs": [format!("docs/{}", TEST_API_DOC)],
    }));
    project
}

fn test_api_generator() -> FakeGenerator {
    FakeGenerator::new().archive_for(
        TEST_API_DOC,
        "testApi-v1-java.zip",
        maven_client_archive(
            "testApi",
            &[("com/example/TestApi.java", "package com.example;\nclass TestApi {}\n")],
        ),
    )
}

fn assert_staging_removed(staging: &TempDir) {
    let leftover: Vec<_> = fs::read_dir(staging.path()).unwrap().collect();
    assert!(leftover.is_empty(), "staging not removed: {:?}", leftover);
}

// ============================================================================
// Extraction
// ============================================================================

/// Only the Java sources of the client archive reach the source root.
#[test]
fn test_gen_src_extracts_java_sources() {
    let project = test_api_project();
    let staging = TempDir::new().unwrap();
    let generator = test_api_generator();
    let config = project.config();

    let report =
        gen_src::run_in(&config, &generator, WorkspaceManager::in_dir(staging.path())).unwrap();

    let source_root = project.path().join("target/generated-sources/endpoints");
    assert_eq!(report.source_root, source_root);
    assert_eq!(list_files(&source_root), vec!["com/example/TestApi.java"]);
    assert_eq!(
        fs::read_to_string(source_root.join("com/example/TestApi.java")).unwrap(),
        "package com.example;\nclass TestApi {}\n"
    );
    assert_eq!(report.archives.len(), 1);
    assert_eq!(report.archives[0].name, "testApi-v1-java.zip");
    assert_staging_removed(&staging);
}

/// The generator sees one gen-client-lib call per document with the Maven target.
#[test]
fn test_gen_src_invocation_arguments() {
    let project = test_api_project();
    let staging = TempDir::new().unwrap();
    let generator = test_api_generator();

    gen_src::run_in(
        &project.config(),
        &generator,
        WorkspaceManager::in_dir(staging.path()),
    )
    .unwrap();

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    let args = &calls[0];
    assert_eq!(args[0], "gen-client-lib");
    assert_eq!(args[1], "-o");
    assert!(args[2].starts_with(&staging.path().to_string_lossy().into_owned()));
    assert!(args[2].ends_with("archives"));
    assert_eq!(&args[3..7], ["-l", "java", "-bs", "maven"]);
    assert_eq!(
        args[7],
        project
            .path()
            .join("docs")
            .join(TEST_API_DOC)
            .to_string_lossy()
    );
    assert_eq!(args.len(), 8);
}

/// Running twice leaves the source root unchanged and reports skips.
#[test]
fn test_gen_src_is_idempotent() {
    let project = test_api_project();
    let staging = TempDir::new().unwrap();
    let generator = test_api_generator();
    let config = project.config();

    gen_src::run_in(&config, &generator, WorkspaceManager::in_dir(staging.path())).unwrap();
    let source_root = config.generated_src_dir();
    let first = list_files(&source_root);

    let report =
        gen_src::run_in(&config, &generator, WorkspaceManager::in_dir(staging.path())).unwrap();

    assert_eq!(list_files(&source_root), first);
    assert_eq!(report.written().count(), 0);
    assert_eq!(report.skipped_count(), 1);
    assert_staging_removed(&staging);
}

/// Files already present in the source root are never overwritten.
#[test]
fn test_gen_src_preserves_existing_files() {
    let project = test_api_project();
    let staging = TempDir::new().unwrap();
    let generator = test_api_generator();
    let existing = project.add_file(
        "target/generated-sources/endpoints/com/example/TestApi.java",
        "// hand edited\n",
    );

    gen_src::run_in(
        &project.config(),
        &generator,
        WorkspaceManager::in_dir(staging.path()),
    )
    .unwrap();

    assert_eq!(fs::read_to_string(existing).unwrap(), "// hand edited\n");
}

/// When two archives carry the same path, the archive sorted first wins.
#[test]
fn test_gen_src_first_archive_wins() {
    let project = ProjectFixture::new();
    project.add_discovery_doc("alpha-v1-rest.discovery");
    project.add_discovery_doc("beta-v1-rest.discovery");
    project.write_config(json!({
        "discovery_docs": ["docs/beta-v1-rest.discovery", "docs/alpha-v1-rest.discovery"],
    }));
    let generator = FakeGenerator::new()
        .archive_for(
            "alpha-v1-rest.discovery",
            "alpha-v1-java.zip",
            maven_client_archive(
                "alpha",
                &[
                    ("com/example/Shared.java", "// alpha\n"),
                    ("com/example/Alpha.java", "class Alpha {}\n"),
                ],
            ),
        )
        .archive_for(
            "beta-v1-rest.discovery",
            "beta-v1-java.zip",
            maven_client_archive(
                "beta",
                &[
                    ("com/example/Shared.java", "// beta\n"),
                    ("com/example/Beta.java", "class Beta {}\n"),
                ],
            ),
        );
    let staging = TempDir::new().unwrap();
    let config = project.config();

    let report =
        gen_src::run_in(&config, &generator, WorkspaceManager::in_dir(staging.path())).unwrap();

    let source_root = config.generated_src_dir();
    assert_eq!(
        list_files(&source_root),
        vec![
            "com/example/Alpha.java",
            "com/example/Beta.java",
            "com/example/Shared.java",
        ]
    );
    assert_eq!(
        fs::read_to_string(source_root.join("com/example/Shared.java")).unwrap(),
        "// alpha\n"
    );
    let names: Vec<&str> = report.archives.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["alpha-v1-java.zip", "beta-v1-java.zip"]);
    assert_eq!(report.archives[1].summary.skipped.len(), 1);

    // Documents are still generated in configured order.
    let calls = generator.calls();
    assert!(calls[0].last().unwrap().ends_with("beta-v1-rest.discovery"));
    assert!(calls[1].last().unwrap().ends_with("alpha-v1-rest.discovery"));
}

/// Entries that try to escape the source root are dropped.
#[test]
fn test_gen_src_ignores_traversal_entries() {
    let project = test_api_project();
    let generator = FakeGenerator::new().archive_for(
        TEST_API_DOC,
        "testApi-v1-java.zip",
        ArchiveBuilder::new()
            .dir("testApi/")
            .file("testApi/src/main/java/../../../../escape.java", "x")
            .file("testApi/src/main/java/com/example/Ok.java", "ok"),
    );
    let staging = TempDir::new().unwrap();
    let config = project.config();

    gen_src::run_in(&config, &generator, WorkspaceManager::in_dir(staging.path())).unwrap();

    assert_eq!(
        list_files(&config.generated_src_dir()),
        vec!["com/example/Ok.java"]
    );
    assert!(!project.path().join("target/escape.java").exists());
    assert!(!project.path().join("escape.java").exists());
}

// ============================================================================
// Failures
// ============================================================================

/// A failing generator names the document, cleans up, and writes nothing.
#[test]
fn test_gen_src_generator_failure() {
    let project = test_api_project();
    let staging = TempDir::new().unwrap();
    let generator = FakeGenerator::new().fail_on(TEST_API_DOC, 2, "Unable to parse discovery doc");
    let config = project.config();

    let err = gen_src::run_in(&config, &generator, WorkspaceManager::in_dir(staging.path()))
        .unwrap_err();

    assert_eq!(err.code(), "GEN_004");
    assert_eq!(err.stage(), "generator");
    match err {
        GoalError::Pipeline(PipelineError::Generation { document, source }) => {
            assert_eq!(document, project.path().join("docs").join(TEST_API_DOC));
            match source {
                GeneratorError::Failed { exit_code, stderr } => {
                    assert_eq!(exit_code, 2);
                    assert!(stderr.contains("Unable to parse"));
                }
                other => panic!("expected Failed, got {:?}", other),
            }
        }
        other => panic!("expected Generation error, got {:?}", other),
    }
    assert!(list_files(&config.generated_src_dir()).is_empty());
    assert_staging_removed(&staging);
}

/// Earlier documents are not extracted when a later one fails.
#[test]
fn test_gen_src_failure_stops_before_extraction() {
    let project = test_api_project();
    project.add_discovery_doc("broken-v1-rest.discovery");
    project.write_config(json!({
        "discovery_docs": [
            format!("docs/{}", TEST_API_DOC),
            "docs/broken-v1-rest.discovery",
        ],
    }));
    let staging = TempDir::new().unwrap();
    let generator = test_api_generator().fail_on("broken-v1-rest.discovery", 1, "boom");
    let config = project.config();

    let err = gen_src::run_in(&config, &generator, WorkspaceManager::in_dir(staging.path()))
        .unwrap_err();

    assert!(err.to_string().contains("broken-v1-rest.discovery"));
    assert_eq!(generator.calls().len(), 2);
    assert!(list_files(&config.generated_src_dir()).is_empty());
    assert_staging_removed(&staging);
}

/// A corrupt archive surfaces as an extraction error naming it.
#[test]
fn test_gen_src_corrupt_archive() {
    struct CorruptGenerator;

    impl epgen_generator::Generator for CorruptGenerator {
        fn execute(
            &self,
            args: &[String],
        ) -> Result<epgen_generator::GeneratorOutput, GeneratorError> {
            fs::write(
                std::path::Path::new(&args[2]).join("testApi-v1-java.zip"),
                b"not a zip",
            )
            .unwrap();
            Ok(Default::default())
        }
    }

    let project = test_api_project();
    let staging = TempDir::new().unwrap();
    let config = project.config();

    let err = gen_src::run_in(&config, &CorruptGenerator, WorkspaceManager::in_dir(staging.path()))
        .unwrap_err();

    assert_eq!(err.code(), "EXTRACT_001");
    match err {
        GoalError::Pipeline(PipelineError::Extraction { archive, .. }) => {
            assert_eq!(archive.file_name().unwrap(), "testApi-v1-java.zip");
        }
        other => panic!("expected Extraction error, got {:?}", other),
    }
    assert_staging_removed(&staging);
}

/// Source generation without documents is a configuration error.
#[test]
fn test_gen_src_requires_documents() {
    let project = ProjectFixture::new();
    let generator = FakeGenerator::new();

    let err = gen_src::run(&project.config(), &generator).unwrap_err();

    assert!(matches!(err, GoalError::Config(_)));
    assert_eq!(err.stage(), "config");
    assert!(generator.calls().is_empty());
}
