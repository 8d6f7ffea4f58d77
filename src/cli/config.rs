// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{AttotreeError, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Sketching
    pub kmer_size: Option<u32>,
    pub sketch_size: Option<u32>,
    pub threads: Option<usize>,

    // Tree inference
    pub algorithm: Option<String>,

    // Output
    pub output: Option<String>,

    // Flags
    pub debug: Option<bool>,
    pub verbose: Option<bool>,

    // Environment
    pub tmp_dir: Option<String>,
    pub mash: Option<String>,
    pub quicktree: Option<String>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AttotreeError::Config(format!("Failed to parse configuration: {}", e)))
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AttotreeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            AttotreeError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# attotree.toml - Configuration file for attotree
# Command line arguments override these settings

# =============================================================================
# SKETCHING (mash)
# =============================================================================

# k-mer size (1-32)
kmer_size = 21

# Sketch size
sketch_size = 10000

# Number of threads passed to mash (omit for auto-detection)
# threads = 8

# =============================================================================
# TREE INFERENCE (quicktree)
# =============================================================================

# Tree inference algorithm: nj, upgma
algorithm = "nj"

# =============================================================================
# OUTPUT
# =============================================================================

# Newick output file (omit for stdout)
# output = "tree.nw"

# =============================================================================
# FLAGS
# =============================================================================

# Keep the temporary directory with intermediate files
debug = false

# Report full commands in diagnostic messages
verbose = false

# =============================================================================
# ENVIRONMENT
# =============================================================================

# Parent directory of the temporary workspace (omit for the system default)
# tmp_dir = "/scratch"

# External executables
mash = "mash"
quicktree = "quicktree"
"#
        .to_string()
    }
}
