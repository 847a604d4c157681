//! Test fixture utilities for building archives and project trees.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use epgen_spec::{ProjectConfig, CONFIG_FILE_NAME};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

#[derive(Debug, Clone)]
enum Entry {
    Dir(String),
    File(String, Vec<u8>),
}

/// Builds zip archives entry by entry, in order.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    entries: Vec<Entry>,
}

impl ArchiveBuilder {
    /// Create an empty archive builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory entry.
    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push(Entry::Dir(name.to_string()));
        self
    }

    /// Add a file entry.
    pub fn file(mut self, name: &str, contents: impl AsRef<[u8]>) -> Self {
        self.entries
            .push(Entry::File(name.to_string(), contents.as_ref().to_vec()));
        self
    }

    /// Encode the archive.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for entry in &self.entries {
            match entry {
                Entry::Dir(name) => writer
                    .add_directory(name.as_str(), options)
                    .expect("Failed to add directory entry"),
                Entry::File(name, contents) => {
                    writer
                        .start_file(name.as_str(), options)
                        .expect("Failed to start file entry");
                    writer.write_all(contents).expect("Failed to write entry");
                }
            }
        }
        writer
            .finish()
            .expect("Failed to finish archive")
            .into_inner()
    }

    /// Write the archive to `path`.
    pub fn write_to(&self, path: &Path) -> PathBuf {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create archive dir");
        }
        fs::write(path, self.to_bytes()).expect("Failed to write archive");
        path.to_path_buf()
    }
}

/// An archive laid out the way the generator packages a Maven client library:
/// `<api>/`, `<api>/pom.xml`, then each source under `<api>/src/main/java/`.
///
/// # Arguments
/// * `api` - The API name used as the top-level directory
/// * `sources` - `(package path, contents)` pairs, e.g. `("com/example/TestApi.java", "...")`
pub fn maven_client_archive(api: &str, sources: &[(&str, &str)]) -> ArchiveBuilder {
    let mut builder = ArchiveBuilder::new()
        .dir(&format!("{}/", api))
        .file(&format!("{}/pom.xml", api), "<project/>");
    for (path, contents) in sources {
        builder = builder.file(&format!("{}/src/main/java/{}", api, path), contents);
    }
    builder
}

/// A test fixture representing a project directory.
pub struct ProjectFixture {
    pub root: TempDir,
}

impl ProjectFixture {
    /// Create a new empty project fixture.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the project root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write `epgen.json` with the given JSON value.
    pub fn write_config(&self, config: serde_json::Value) -> PathBuf {
        let path = self.path().join(CONFIG_FILE_NAME);
        let text = serde_json::to_string_pretty(&config).expect("Failed to encode config");
        fs::write(&path, text).expect("Failed to write config");
        path
    }

    /// Add a discovery document under `docs/` and return its path.
    pub fn add_discovery_doc(&self, name: &str) -> PathBuf {
        let dir = self.path().join("docs");
        fs::create_dir_all(&dir).expect("Failed to create docs dir");
        let path = dir.join(name);
        fs::write(&path, r#"{"kind": "discovery#restDescription"}"#)
            .expect("Failed to write discovery doc");
        path
    }

    /// Add a file relative to the project root.
    pub fn add_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Load the project configuration.
    pub fn config(&self) -> ProjectConfig {
        ProjectConfig::load(self.path()).expect("Failed to load config")
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
