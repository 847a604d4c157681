//! Test harness utilities: a scripted generator and output inspection.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Mutex, OnceLock};

use epgen_generator::{Generator, GeneratorError, GeneratorOutput};
use walkdir::WalkDir;

use crate::fixtures::ArchiveBuilder;

/// A generator that writes scripted outputs instead of running the tool.
///
/// Every call is recorded. For `gen-client-lib`, archives are keyed by the
/// document file name and written into the `-o` directory. For the other
/// actions, files registered with [`FakeGenerator::output_file`] are written
/// into the `-o` directory (or, for `get-openapi-doc`, to the `-o` path).
#[derive(Default)]
pub struct FakeGenerator {
    calls: Mutex<Vec<Vec<String>>>,
    archives: HashMap<String, Vec<(String, ArchiveBuilder)>>,
    failures: HashMap<String, (i32, String)>,
    outputs: Vec<(String, String)>,
}

impl FakeGenerator {
    /// Create a generator that succeeds and writes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce `archive` named `archive_name` when generating from `document`.
    pub fn archive_for(
        mut self,
        document: &str,
        archive_name: &str,
        archive: ArchiveBuilder,
    ) -> Self {
        self.archives
            .entry(document.to_string())
            .or_default()
            .push((archive_name.to_string(), archive));
        self
    }

    /// Exit with `exit_code` and `stderr` when generating from `document`.
    pub fn fail_on(mut self, document: &str, exit_code: i32, stderr: &str) -> Self {
        self.failures
            .insert(document.to_string(), (exit_code, stderr.to_string()));
        self
    }

    /// Write `name` with `contents` for document and library actions.
    pub fn output_file(mut self, name: &str, contents: &str) -> Self {
        self.outputs.push((name.to_string(), contents.to_string()));
        self
    }

    /// All argument lists received, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

impl Generator for FakeGenerator {
    fn execute(&self, args: &[String]) -> Result<GeneratorOutput, GeneratorError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(args.to_vec());

        let action = args.first().map(String::as_str).unwrap_or_default();
        let output = PathBuf::from(args.get(2).expect("missing -o value"));

        if action == "gen-client-lib" {
            let document = args.last().expect("missing document");
            let name = Path::new(document)
                .file_name()
                .expect("document has no file name")
                .to_string_lossy()
                .into_owned();
            if let Some((code, stderr)) = self.failures.get(&name) {
                return Err(GeneratorError::failed(*code, stderr.clone()));
            }
            for (archive_name, archive) in self.archives.get(&name).into_iter().flatten() {
                archive.write_to(&output.join(archive_name));
            }
        } else if action == "get-openapi-doc" {
            if let Some((_, contents)) = self.outputs.first() {
                fs::write(&output, contents).expect("Failed to write output");
            }
        } else {
            for (name, contents) in &self.outputs {
                fs::write(output.join(name), contents).expect("Failed to write output");
            }
        }

        Ok(GeneratorOutput::default())
    }
}

/// Lists files under `root` as sorted `/`-separated relative paths.
pub fn list_files(root: &Path) -> Vec<String> {
    if !root.exists() {
        return Vec::new();
    }
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .expect("walked path outside root")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

/// Result of running the epgen CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }
}

/// Run the epgen CLI in `dir` through `cargo run`.
pub fn run_cli(dir: &Path, args: &[&str]) -> CliResult {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--manifest-path"])
        .arg(manifest_path())
        .args(["-p", "epgen-cli", "--bin", "epgen", "--"])
        .args(args)
        .current_dir(dir)
        .env_remove("EPGEN_TOOL_PATH")
        .output();

    match output {
        Ok(out) => CliResult::from_output(out),
        Err(e) => CliResult {
            success: false,
            exit_code: -1,
            stdout: String::new(),
            stderr: format!("Failed to run CLI: {}", e),
        },
    }
}

fn manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let manifest_path = manifest_dir.join("..").join("..").join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

/// Write an executable shell script standing in for the generator tool.
///
/// The script copies `archive` into its `-o` directory for `gen-client-lib`
/// and exits with status 3 when the document name contains `broken`.
#[cfg(unix)]
pub fn write_tool_script(dir: &Path, archive: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-endpoints-tool.sh");
    let body = format!(
        r#"#!/bin/sh
out="$3"
for last; do :; done
case "$last" in
  *broken*) echo "cannot parse $last" >&2; exit 3 ;;
esac
cp "{}" "$out/client.zip"
"#,
        archive.display()
    );
    fs::write(&script, body).expect("Failed to write tool script");
    let mut permissions = fs::metadata(&script)
        .expect("Failed to stat tool script")
        .permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&script, permissions).expect("Failed to chmod tool script");
    script
}
