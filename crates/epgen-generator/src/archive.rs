//! Client library archive extraction.
//!
//! Generated client library archives contain a whole project: the first
//! entry is the project directory and the Java sources live under its
//! `src/main/java`. Only that subtree is copied into the destination, and a
//! file that already exists there is never overwritten.
//!
//! The layout assumption lives behind [`ArchiveLayout`] so a different
//! generator layout only needs a new implementation.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ExtractionError, ExtractionResult};

/// Source directory of a Maven project.
pub const MAVEN_SOURCE_DIR: &str = "src/main/java";

/// Describes where sources live inside a generated archive.
pub trait ArchiveLayout {
    /// Computes the entry-name prefix of the source subtree from the name of
    /// the archive's first entry.
    fn extraction_root(&self, first_entry: &str) -> String;
}

/// Layout of archives produced by `gen-client-lib -bs maven`.
///
/// The first entry is the project directory (`testApi/`), so the source root
/// is `testApi/src/main/java`. Entry names always use `/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MavenLayout;

impl ArchiveLayout for MavenLayout {
    fn extraction_root(&self, first_entry: &str) -> String {
        format!("{}{}", first_entry, MAVEN_SOURCE_DIR)
    }
}

/// What an extraction did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Files created in the destination.
    pub written: Vec<PathBuf>,
    /// Destination files that already existed and were left alone.
    pub skipped: Vec<PathBuf>,
    /// Entries outside the source root, directory markers, and unsafe names.
    pub ignored: usize,
}

/// Copies the source subtree of an archive into a destination directory.
#[derive(Debug, Clone, Default)]
pub struct Extractor<L = MavenLayout> {
    layout: L,
}

impl Extractor<MavenLayout> {
    /// Creates an extractor for Maven-layout archives.
    pub fn new() -> Self {
        Self {
            layout: MavenLayout,
        }
    }
}

impl<L: ArchiveLayout> Extractor<L> {
    /// Creates an extractor with a custom layout.
    pub fn with_layout(layout: L) -> Self {
        Self { layout }
    }

    /// Extracts `archive` into `destination`.
    ///
    /// An archive with no entries is a no-op. Files written before a failure
    /// stay on disk.
    pub fn extract(
        &self,
        archive: &Path,
        destination: &Path,
    ) -> ExtractionResult<ExtractionSummary> {
        let unreadable = |source: ZipError| ExtractionError::Unreadable {
            archive: archive.to_path_buf(),
            source,
        };

        let file = fs::File::open(archive).map_err(|e| unreadable(ZipError::Io(e)))?;
        let mut zip = ZipArchive::new(file).map_err(unreadable)?;

        let mut summary = ExtractionSummary::default();
        if zip.len() == 0 {
            debug!(archive = %archive.display(), "Archive is empty");
            return Ok(summary);
        }

        let root = {
            let first = zip.by_index(0).map_err(unreadable)?;
            self.layout.extraction_root(first.name())
        };
        debug!(archive = %archive.display(), root = %root, "Extracting sources");

        for index in 1..zip.len() {
            let mut entry = zip.by_index(index).map_err(unreadable)?;
            if entry.is_dir() {
                summary.ignored += 1;
                continue;
            }

            let name = entry.name().to_string();
            let relative = match name.strip_prefix(root.as_str()) {
                Some(rest) if !rest.trim_start_matches('/').is_empty() => rest,
                _ => {
                    summary.ignored += 1;
                    continue;
                }
            };

            let Some(relative) = safe_relative_path(relative) else {
                warn!(entry = %name, "Skipping archive entry outside the destination");
                summary.ignored += 1;
                continue;
            };

            let target = destination.join(&relative);
            if target.exists() {
                debug!(path = %target.display(), "Already exists, skipping");
                summary.skipped.push(target);
                continue;
            }

            let mut contents = Vec::new();
            entry
                .read_to_end(&mut contents)
                .map_err(|e| unreadable(ZipError::Io(e)))?;

            if write_new(&target, &contents)? {
                summary.written.push(target);
            } else {
                summary.skipped.push(target);
            }
        }

        Ok(summary)
    }
}

/// Writes `contents` to `target` unless it already exists.
///
/// Creation and the existence check are one step, so two writers racing for
/// the same path cannot both win. Returns `false` when the file was there.
fn write_new(target: &Path, contents: &[u8]) -> ExtractionResult<bool> {
    let write_failed = |path: &Path, source: io::Error| ExtractionError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| write_failed(parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(target) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(write_failed(target, e)),
    };
    file.write_all(contents)
        .and_then(|()| file.flush())
        .map_err(|e| write_failed(target, e))?;

    debug!(path = %target.display(), bytes = contents.len(), "Wrote source file");
    Ok(true)
}

/// Converts a `/`-separated entry path into a relative path that stays
/// inside the destination. Returns `None` for `..`, absolute, or prefixed
/// components.
fn safe_relative_path(name: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();
    for part in name.split('/') {
        match part {
            "" | "." => continue,
            ".." => return None,
            _ => {
                let mut components = Path::new(part).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(component)), None) => path.push(component),
                    _ => return None,
                }
            }
        }
    }

    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}
