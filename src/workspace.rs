// workspace.rs - Scoped temporary directory for intermediate files

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{AttotreeError, Result};

const PREFIX: &str = "attotree.";

/// Raw `mash triangle` output
pub const RAW_MATRIX: &str = "distances.phylip";
/// Matrix with SampleId row labels
pub const NORMALIZED_MATRIX: &str = "distances.normalized.phylip";
/// Raw `quicktree` output
pub const RAW_TREE: &str = "tree.nw";
/// Captured copy of a file-of-files input
pub const FILE_OF_FILES: &str = "inputs.fof";

/// Directory owning every intermediate file of one run.
///
/// Removed when dropped, unless [`Workspace::release`] is called with
/// `retain = true`, in which case the caller owns the directory.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under `parent`, or the system temp dir
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|e| AttotreeError::io("Failed to create temporary directory", e))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn raw_matrix(&self) -> PathBuf {
        self.path().join(RAW_MATRIX)
    }

    pub fn normalized_matrix(&self) -> PathBuf {
        self.path().join(NORMALIZED_MATRIX)
    }

    pub fn raw_tree(&self) -> PathBuf {
        self.path().join(RAW_TREE)
    }

    pub fn file_of_files(&self) -> PathBuf {
        self.path().join(FILE_OF_FILES)
    }

    /// End the workspace's life.
    ///
    /// Returns the directory path when it is retained, `None` once removed.
    pub fn release(self, retain: bool) -> Result<Option<PathBuf>> {
        if retain {
            Ok(Some(self.dir.keep()))
        } else {
            let path = self.path().to_path_buf();
            self.dir.close().map_err(|e| {
                AttotreeError::io(format!("Failed to remove '{}'", path.display()), e)
            })?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_removed_on_release() {
        let parent = tempfile::tempdir().unwrap();
        let ws = Workspace::create(Some(parent.path())).unwrap();
        let path = ws.path().to_path_buf();
        std::fs::write(ws.raw_matrix(), "\t1\n").unwrap();

        assert!(path.starts_with(parent.path()));
        assert_eq!(ws.release(false).unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_workspace_removed_on_drop() {
        let parent = tempfile::tempdir().unwrap();
        let path = {
            let ws = Workspace::create(Some(parent.path())).unwrap();
            ws.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_workspace_retained() {
        let parent = tempfile::tempdir().unwrap();
        let ws = Workspace::create(Some(parent.path())).unwrap();
        std::fs::write(ws.raw_tree(), "(a,b);\n").unwrap();

        let kept = ws.release(true).unwrap().expect("retained path");
        assert!(kept.join(RAW_TREE).exists());
        assert!(kept
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(PREFIX));
    }
}
