// mod.rs - Final tree destination

use std::fmt;
use std::fs::{self, create_dir_all, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::newick::write_tree;
use crate::error::{AttotreeError, Result};

/// Where the canonical tree goes: a file or standard output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `None` and `-` mean standard output
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(PathBuf::from(path)),
        }
    }

    /// Open the destination for writing
    pub fn open(&self) -> Result<Box<dyn Write>> {
        match self {
            OutputTarget::Stdout => Ok(Box::new(io::stdout().lock())),
            OutputTarget::File(path) => {
                ensure_parent_dir(path)?;
                let file = File::create(path).map_err(|e| {
                    AttotreeError::io(format!("Failed to create output file '{}'", path.display()), e)
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }

    /// Fail early if the destination cannot be written.
    ///
    /// Existing files are left untouched and a probe file is removed again.
    pub fn check_writable(&self) -> Result<()> {
        let path = match self {
            OutputTarget::Stdout => return Ok(()),
            OutputTarget::File(path) => path,
        };
        ensure_parent_dir(path)?;
        let existed = path.exists();
        OpenOptions::new()
            .write(true)
            .create(true)
            .open(path)
            .map_err(|e| {
                AttotreeError::io(format!("Cannot write output file '{}'", path.display()), e)
            })?;
        if !existed {
            fs::remove_file(path).map_err(|e| {
                AttotreeError::io(format!("Failed to remove '{}'", path.display()), e)
            })?;
        }
        Ok(())
    }

    /// Write the canonical tree as a single line
    pub fn write_tree(&self, tree: &str) -> Result<()> {
        let mut writer = self.open()?;
        write_tree(tree, &mut writer)
            .map_err(|e| AttotreeError::io(format!("Failed to write tree to {}", self), e))
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "stdout"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                AttotreeError::io(
                    format!("Failed to create parent directory '{}'", parent.display()),
                    e,
                )
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg() {
        assert_eq!(OutputTarget::from_arg(None), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_arg(Some("-")), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_arg(Some("out/tree.nw")),
            OutputTarget::File(PathBuf::from("out/tree.nw"))
        );
    }

    #[test]
    fn test_write_tree_to_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tree.nw");
        let target = OutputTarget::File(path.clone());

        target.write_tree("(a:1,b:1);").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "(a:1,b:1);\n");
    }

    #[test]
    fn test_check_writable() {
        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join("out").join("tree.nw");
        OutputTarget::File(fresh.clone()).check_writable().unwrap();
        assert!(!fresh.exists());
        assert!(dir.path().join("out").is_dir());

        let existing = dir.path().join("old.nw");
        std::fs::write(&existing, "(x,y);\n").unwrap();
        OutputTarget::File(existing.clone()).check_writable().unwrap();
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "(x,y);\n");

        let blocker = dir.path().join("plain-file");
        std::fs::write(&blocker, "").unwrap();
        assert!(OutputTarget::File(blocker.join("tree.nw")).check_writable().is_err());
        assert!(OutputTarget::File(dir.path().to_path_buf()).check_writable().is_err());
        assert!(OutputTarget::Stdout.check_writable().is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputTarget::Stdout.to_string(), "stdout");
        assert_eq!(OutputTarget::File(PathBuf::from("t.nw")).to_string(), "t.nw");
    }
}
