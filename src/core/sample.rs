// sample.rs - Canonical leaf identifiers derived from genome paths

use std::fmt;
use std::path::Path;

/// Suffixes of compressed genome files, stripped before the extension itself
pub const COMPRESSION_SUFFIXES: &[&str] = &["gz", "bz2", "xz", "zst"];

/// Leaf label of a genome: its basename without directory and extension.
///
/// `/data/genomeA.fasta` and `/data/genomeA.fa.gz` both become `genomeA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleId(String);

impl SampleId {
    pub fn from_path(path: &str) -> Self {
        let basename = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());

        let mut parts: Vec<&str> = basename.split('.').collect();
        let compressed = parts.len() > 2
            && parts
                .last()
                .map(|s| COMPRESSION_SUFFIXES.contains(&s.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
        if compressed {
            parts.pop();
        }
        if parts.len() > 1 {
            parts.pop();
        }

        let stem = parts.join(".");
        if stem.is_empty() {
            SampleId(basename)
        } else {
            SampleId(stem)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SampleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(path: &str) -> String {
        SampleId::from_path(path).to_string()
    }

    #[test]
    fn test_strips_directory_and_extension() {
        assert_eq!(id("/a/genomeA.fasta"), "genomeA");
        assert_eq!(id("relative/dir/x.fna"), "x");
        assert_eq!(id("plain.fa"), "plain");
    }

    #[test]
    fn test_strips_compression_suffix() {
        assert_eq!(id("/b/genomeB.fa.gz"), "genomeB");
        assert_eq!(id("/b/genomeC.fasta.XZ"), "genomeC");
    }

    #[test]
    fn test_only_final_extension_dropped() {
        assert_eq!(id("/x/strain.v2.fasta"), "strain.v2");
        // A lone compression suffix is the extension
        assert_eq!(id("/x/reads.gz"), "reads");
    }

    #[test]
    fn test_no_extension_keeps_basename() {
        assert_eq!(id("/data/genome"), "genome");
        assert_eq!(id("genome"), "genome");
        assert_eq!(id("/data/dir/"), "dir");
    }

    #[test]
    fn test_never_empty() {
        assert_eq!(id("/x/.hidden"), ".hidden");
        assert_eq!(id("/x/trailing."), "trailing");
    }

    #[test]
    fn test_idempotent_once_extensionless() {
        for path in ["/a/genomeA.fasta", "/b/genomeB.fa.gz", "/c/plain", "d.fna"] {
            let once = SampleId::from_path(path);
            let twice = SampleId::from_path(once.as_str());
            assert_eq!(once, twice, "path {}", path);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            SampleId::from_path("/same/path.fa"),
            SampleId::from_path("/same/path.fa")
        );
    }
}
