// lib.rs - attotree library root

//! # attotree - rapid estimation of phylogenetic trees using sketching
//!
//! attotree turns a collection of genome files into a phylogenetic tree by
//! delegating the heavy lifting to two external programs. `mash triangle`
//! estimates pairwise Mash distances from MinHash sketches and `quicktree`
//! infers a tree from the resulting PHYLIP matrix. In between, matrix labels
//! are rewritten to sample names, and the final tree is emitted as a single
//! Newick line.
//!
//! ## Features
//!
//! - **Sketch-based distances**: `mash triangle` with configurable k-mer and sketch sizes
//! - **Two tree algorithms**: neighbor joining (default) and UPGMA
//! - **Clean labels**: leaves are named after file basenames without extensions
//! - **Debug mode**: keep the intermediate files for inspection
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use attotree::prelude::*;
//!
//! let options = PipelineOptions {
//!     inputs: vec!["genomes/a.fa.gz".to_string(), "genomes/b.fa".to_string()],
//!     ..PipelineOptions::default()
//! };
//! let diag = Diagnostics::stderr(false);
//! let report = Pipeline::new(&options, &SystemRunner::new(), &diag).run()?;
//! assert_eq!(report.leaf_count, 2);
//! # Ok::<(), attotree::AttotreeError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod exec;
pub mod output;
pub mod workspace;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config};
    pub use crate::core::{Algorithm, DistanceEngine, SketchParams, TreeEngine};
    pub use crate::core::{Pipeline, PipelineOptions, RunReport, SampleId, Stage};
    pub use crate::diagnostics::Diagnostics;
    pub use crate::error::{AttotreeError, Result};
    pub use crate::exec::{CommandSpec, ProcessRunner, SystemRunner};
    pub use crate::output::OutputTarget;
}

// Re-export main types at the root level for convenience
pub use cli::Args;
pub use core::{Pipeline, PipelineOptions, SampleId};
pub use error::AttotreeError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "attotree v{} - rapid estimation of phylogenetic trees using sketching",
        VERSION
    )
}
