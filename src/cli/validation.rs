// validation.rs - Input validation utilities

use std::path::PathBuf;

use crate::cli::args::Args;
use crate::core::distance::{SketchParams, DEFAULT_KMER_SIZE, DEFAULT_MASH, DEFAULT_SKETCH_SIZE};
use crate::core::tree::{Algorithm, DEFAULT_QUICKTREE};
use crate::core::PipelineOptions;
use crate::error::{AttotreeError, Result};
use crate::output::OutputTarget;

/// Largest k-mer size mash accepts
pub const MAX_KMER_SIZE: u32 = 32;

/// Validate all command line arguments and resolve defaults
pub fn validate_args(args: &Args) -> Result<PipelineOptions> {
    if args.genomes.is_empty() {
        return invalid("at least one input genome is required".to_string());
    }
    if args.list && args.genomes.len() != 1 {
        return invalid(format!(
            "-L expects exactly one list file, got {}",
            args.genomes.len()
        ));
    }

    let kmer_size = args.kmer_size.unwrap_or(DEFAULT_KMER_SIZE);
    if kmer_size == 0 || kmer_size > MAX_KMER_SIZE {
        return invalid(format!(
            "k-mer size must be between 1 and {}, got {}",
            MAX_KMER_SIZE, kmer_size
        ));
    }

    let sketch_size = args.sketch_size.unwrap_or(DEFAULT_SKETCH_SIZE);
    if sketch_size == 0 {
        return invalid("sketch size must be positive".to_string());
    }

    let threads = args.threads.unwrap_or_else(num_cpus::get);
    if threads == 0 {
        return invalid("number of threads must be positive".to_string());
    }

    let algorithm = match &args.algorithm {
        Some(name) => name.parse::<Algorithm>().map_err(AttotreeError::ArgumentError)?,
        None => Algorithm::default(),
    };

    let mash = non_empty(args.mash.as_deref(), DEFAULT_MASH, "--mash")?;
    let quicktree = non_empty(args.quicktree.as_deref(), DEFAULT_QUICKTREE, "--quicktree")?;

    let tmp_dir = match &args.tmp_dir {
        Some(dir) => {
            let path = PathBuf::from(dir);
            if !path.is_dir() {
                return invalid(format!("temporary directory '{}' does not exist", dir));
            }
            Some(path)
        }
        None => None,
    };

    let output = OutputTarget::from_arg(args.output.as_deref());
    output
        .check_writable()
        .map_err(|e| AttotreeError::ArgumentError(e.to_string()))?;

    Ok(PipelineOptions {
        inputs: args.genomes.clone(),
        file_of_files: args.list,
        params: SketchParams {
            kmer_size,
            sketch_size,
            threads,
        },
        algorithm,
        output,
        debug: args.debug,
        verbose: args.verbose,
        tmp_dir,
        mash,
        quicktree,
    })
}

fn invalid<T>(message: String) -> Result<T> {
    Err(AttotreeError::ArgumentError(message))
}

fn non_empty(value: Option<&str>, default: &str, flag: &str) -> Result<String> {
    match value {
        Some(v) if v.trim().is_empty() => invalid(format!("{} must not be empty", flag)),
        Some(v) => Ok(v.to_string()),
        None => Ok(default.to_string()),
    }
}
