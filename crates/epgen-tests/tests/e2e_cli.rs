//! End-to-End CLI Tests
//!
//! Runs the `epgen` binary against a shell script standing in for the
//! Endpoints tool.
//!
//! ```bash
//! cargo test -p epgen-tests --test e2e_cli
//! ```

#![cfg(unix)]

use std::fs;

use epgen_tests::harness::{run_cli, write_tool_script};
use epgen_tests::{list_files, maven_client_archive, ProjectFixture};
use pretty_assertions::assert_eq;

fn project_with_tool() -> (ProjectFixture, String) {
    let project = ProjectFixture::new();
    let archive = maven_client_archive(
        "testApi",
        &[("com/example/TestApi.java", "class TestApi {}\n")],
    )
    .write_to(&project.path().join("fixtures/testApi-v1-java.zip"));
    let script = write_tool_script(project.path(), &archive);
    project.add_discovery_doc("testApi-v1-rest.discovery");
    project.add_discovery_doc("broken-v1-rest.discovery");
    (project, script.to_string_lossy().into_owned())
}

#[test]
fn test_cli_generate_src() {
    let (project, tool) = project_with_tool();
    let project_dir = project.path().to_string_lossy().into_owned();

    let result = run_cli(
        project.path(),
        &[
            "--project",
            &project_dir,
            "generate-src",
            "--discovery-doc",
            "docs/testApi-v1-rest.discovery",
            "--tool",
            &tool,
        ],
    );

    result.assert_success();
    let source_root = project.path().join("target/generated-sources/endpoints");
    assert_eq!(list_files(&source_root), vec!["com/example/TestApi.java"]);
    assert_eq!(
        fs::read_to_string(source_root.join("com/example/TestApi.java")).unwrap(),
        "class TestApi {}\n"
    );
    assert!(result.stdout.contains("client.zip"));
}

#[test]
fn test_cli_generate_src_failure() {
    let (project, tool) = project_with_tool();
    let project_dir = project.path().to_string_lossy().into_owned();

    let result = run_cli(
        project.path(),
        &[
            "--project",
            &project_dir,
            "generate-src",
            "--discovery-doc",
            "docs/broken-v1-rest.discovery",
            "--tool",
            &tool,
        ],
    );

    result.assert_failure();
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("broken-v1-rest.discovery"));
    assert!(result.stderr.contains("cannot parse"));
    assert!(!project.path().join("target/generated-sources/endpoints/com").exists());
}

#[test]
fn test_cli_generate_src_without_documents() {
    let (project, tool) = project_with_tool();
    let project_dir = project.path().to_string_lossy().into_owned();

    let result = run_cli(
        project.path(),
        &["--project", &project_dir, "generate-src", "--tool", &tool],
    );

    result.assert_failure();
    assert!(result.stderr.contains("No discovery documents configured"));
}

#[test]
fn test_cli_doctor_missing_tool() {
    let project = ProjectFixture::new();
    let project_dir = project.path().to_string_lossy().into_owned();

    let result = run_cli(
        project.path(),
        &[
            "doctor",
            "--project",
            &project_dir,
            "--tool",
            "epgen-no-such-generator-tool",
        ],
    );

    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("not found"));
}

#[test]
fn test_cli_doctor_with_tool() {
    let (project, tool) = project_with_tool();
    let project_dir = project.path().to_string_lossy().into_owned();

    let result = run_cli(
        project.path(),
        &["--project", &project_dir, "doctor", "--tool", &tool],
    );

    result.assert_success();
    assert!(result.stdout.contains("fake-endpoints-tool.sh"));
    assert!(result.stdout.contains("configured"));
}
