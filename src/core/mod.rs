// mod.rs - Core pipeline module

pub mod distance;
pub mod newick;
pub mod normalize;
pub mod pipeline;
pub mod sample;
pub mod tree;

// Re-export main types for convenience
pub use distance::{DistanceEngine, GenomeInputs, SketchParams};
pub use newick::{canonicalize, canonicalize_file, leaf_labels, structure_problem};
pub use normalize::{normalize_matrix, NormalizedMatrix};
pub use pipeline::{Pipeline, PipelineOptions, RunReport, Stage};
pub use sample::SampleId;
pub use tree::{Algorithm, TreeEngine};
