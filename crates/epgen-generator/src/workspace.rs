//! Staging area management.
//!
//! A [`StagingArea`] is a private temporary directory that holds generator
//! output until it is copied into its final location. It is scoped: calling
//! [`StagingArea::release`] or simply dropping it removes the whole tree, so
//! every exit path of a pipeline run cleans up after itself.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{WorkspaceError, WorkspaceResult};

/// Name of the subdirectory that receives generated archives.
pub const ARCHIVE_DIR_NAME: &str = "archives";

/// Suffix of archive files collected from the staging area (case-insensitive).
pub const ARCHIVE_SUFFIX: &str = ".zip";

const STAGING_PREFIX: &str = "epgen-staging-";

/// Allocates staging areas.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceManager {
    parent: Option<PathBuf>,
}

impl WorkspaceManager {
    /// Creates a manager that allocates under the system temp directory.
    pub fn new() -> Self {
        Self { parent: None }
    }

    /// Creates a manager that allocates under `parent`.
    pub fn in_dir(parent: impl Into<PathBuf>) -> Self {
        Self {
            parent: Some(parent.into()),
        }
    }

    /// Creates a fresh, empty staging area with its archive subdirectory.
    pub fn acquire(&self) -> WorkspaceResult<StagingArea> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);

        let dir = match self.parent {
            Some(ref parent) => {
                fs::create_dir_all(parent).map_err(WorkspaceError::Staging)?;
                builder.tempdir_in(parent)
            }
            None => builder.tempdir(),
        }
        .map_err(WorkspaceError::Staging)?;

        let archive_dir = dir.path().join(ARCHIVE_DIR_NAME);
        fs::create_dir(&archive_dir).map_err(WorkspaceError::Staging)?;

        debug!(root = %dir.path().display(), "Acquired staging area");
        Ok(StagingArea { dir, archive_dir })
    }
}

/// An exclusively owned staging directory.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    archive_dir: PathBuf,
}

impl StagingArea {
    /// Returns the staging root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the directory generated archives are written to.
    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Lists archives in the archive directory, sorted by file name.
    pub fn archives(&self) -> WorkspaceResult<Vec<PathBuf>> {
        let list_error = |source| WorkspaceError::List {
            path: self.archive_dir.clone(),
            source,
        };

        let mut archives = Vec::new();
        for entry in fs::read_dir(&self.archive_dir).map_err(list_error)? {
            let entry = entry.map_err(list_error)?;
            let path = entry.path();
            if path.is_file() && is_archive_name(&entry.file_name().to_string_lossy()) {
                archives.push(path);
            }
        }
        archives.sort();
        Ok(archives)
    }

    /// Removes the staging tree.
    ///
    /// Removal is best effort: a failure is logged and otherwise ignored so it
    /// never replaces the outcome of the run that used the staging area.
    pub fn release(self) {
        let root = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!(root = %root.display(), "Released staging area"),
            Err(e) => warn!(
                root = %root.display(),
                error = %e,
                "Failed to remove staging area"
            ),
        }
    }
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> WorkspaceResult<()> {
    fs::create_dir_all(path).map_err(|source| WorkspaceError::Destination {
        path: path.to_path_buf(),
        source,
    })
}

fn is_archive_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(ARCHIVE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_acquire_creates_empty_archive_dir() {
        let parent = tempfile::tempdir().unwrap();
        let staging = WorkspaceManager::in_dir(parent.path()).acquire().unwrap();

        assert!(staging.root().starts_with(parent.path()));
        assert!(staging.archive_dir().is_dir());
        assert_eq!(staging.archive_dir(), staging.root().join(ARCHIVE_DIR_NAME));
        assert!(staging.archives().unwrap().is_empty());
    }

    #[test]
    fn test_acquire_never_reuses_a_root() {
        let parent = tempfile::tempdir().unwrap();
        let manager = WorkspaceManager::in_dir(parent.path());

        let first = manager.acquire().unwrap();
        let second = manager.acquire().unwrap();
        assert_ne!(first.root(), second.root());
    }

    #[test]
    fn test_release_removes_everything() {
        let parent = tempfile::tempdir().unwrap();
        let staging = WorkspaceManager::in_dir(parent.path()).acquire().unwrap();
        let root = staging.root().to_path_buf();
        fs::write(staging.archive_dir().join("a.zip"), b"zip").unwrap();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();

        staging.release();

        assert!(!root.exists());
        assert_eq!(fs::read_dir(parent.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_drop_removes_staging_area() {
        let parent = tempfile::tempdir().unwrap();
        let root = {
            let staging = WorkspaceManager::in_dir(parent.path()).acquire().unwrap();
            staging.root().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn test_archives_filters_suffix_case_insensitively() {
        let parent = tempfile::tempdir().unwrap();
        let staging = WorkspaceManager::in_dir(parent.path()).acquire().unwrap();
        let dir = staging.archive_dir();
        fs::write(dir.join("b-v1-java.ZIP"), b"").unwrap();
        fs::write(dir.join("a-v1-java.zip"), b"").unwrap();
        fs::write(dir.join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.join("folder.zip")).unwrap();

        let names: Vec<String> = staging
            .archives()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a-v1-java.zip", "b-v1-java.ZIP"]);
    }

    #[test]
    fn test_ensure_dir_creates_parents() {
        let parent = tempfile::tempdir().unwrap();
        let nested = parent.path().join("target/generated-sources/endpoints");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_fails_on_file() {
        let parent = tempfile::tempdir().unwrap();
        let file = parent.path().join("occupied");
        fs::write(&file, b"").unwrap();

        let err = ensure_dir(&file.join("child")).unwrap_err();
        assert!(matches!(err, WorkspaceError::Destination { .. }));
    }
}
