// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Sketching
        if self.kmer_size.is_none() {
            self.kmer_size = config.kmer_size;
        }
        if self.sketch_size.is_none() {
            self.sketch_size = config.sketch_size;
        }
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Tree inference
        if self.algorithm.is_none() {
            self.algorithm = config.algorithm;
        }

        // Output
        if self.output.is_none() {
            self.output = config.output;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.debug && config.debug.unwrap_or(false) {
            self.debug = true;
        }
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }

        // Environment
        if self.tmp_dir.is_none() {
            self.tmp_dir = config.tmp_dir;
        }
        if self.mash.is_none() {
            self.mash = config.mash;
        }
        if self.quicktree.is_none() {
            self.quicktree = config.quicktree;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
