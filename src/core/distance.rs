// distance.rs - Distance matrix acquisition through the sketching engine

use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::exec::{run_checked, CommandSpec, ProcessRunner};

pub const DEFAULT_KMER_SIZE: u32 = 21;
pub const DEFAULT_SKETCH_SIZE: u32 = 10000;
pub const DEFAULT_MASH: &str = "mash";

/// Parameters forwarded to `mash triangle`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchParams {
    pub kmer_size: u32,
    pub sketch_size: u32,
    /// Worker count; parallelism happens inside the engine only
    pub threads: usize,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            kmer_size: DEFAULT_KMER_SIZE,
            sketch_size: DEFAULT_SKETCH_SIZE,
            threads: num_cpus::get(),
        }
    }
}

/// Genome inputs as handed to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenomeInputs {
    /// Genome files, in command-line order
    Paths(Vec<String>),
    /// A file listing one genome path per line
    FileOfFiles(PathBuf),
}

impl GenomeInputs {
    pub fn is_file_of_files(&self) -> bool {
        matches!(self, GenomeInputs::FileOfFiles(_))
    }
}

/// Wrapper around the k-mer sketch distance estimator.
///
/// Produces a PHYLIP-like lower-triangular matrix whose row labels are the
/// input path strings exactly as given.
#[derive(Debug, Clone)]
pub struct DistanceEngine {
    program: String,
    params: SketchParams,
}

impl DistanceEngine {
    pub fn new(program: impl Into<String>, params: SketchParams) -> Self {
        Self {
            program: program.into(),
            params,
        }
    }

    pub fn params(&self) -> &SketchParams {
        &self.params
    }

    /// `mash triangle -s S -k K -p T [-l] inputs...`
    pub fn command(&self, inputs: &GenomeInputs) -> CommandSpec {
        let spec = CommandSpec::new(self.program.as_str())
            .arg("triangle")
            .arg("-s")
            .arg(self.params.sketch_size.to_string())
            .arg("-k")
            .arg(self.params.kmer_size.to_string())
            .arg("-p")
            .arg(self.params.threads.to_string());

        match inputs {
            GenomeInputs::Paths(paths) => spec.args(paths.iter().cloned()),
            GenomeInputs::FileOfFiles(list) => spec.arg("-l").path_arg(list),
        }
    }

    /// Run the engine, writing the raw matrix to `matrix_path`
    pub fn build_matrix(
        &self,
        inputs: &GenomeInputs,
        matrix_path: &Path,
        runner: &dyn ProcessRunner,
        diag: &Diagnostics,
    ) -> Result<()> {
        diag.message("Running mash");
        let spec = self.command(inputs);
        run_checked(runner, &spec, matrix_path, diag)
    }
}
