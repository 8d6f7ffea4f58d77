// pipeline.rs - Orchestration of the four stages inside one workspace

use std::fmt;
use std::fs;
use std::path::PathBuf;

use super::distance::{DistanceEngine, GenomeInputs, SketchParams, DEFAULT_MASH};
use super::newick::{canonicalize_file, leaf_labels, structure_problem};
use super::normalize::normalize_matrix;
use super::tree::{Algorithm, TreeEngine, DEFAULT_QUICKTREE};
use crate::diagnostics::Diagnostics;
use crate::error::{AttotreeError, Result};
use crate::exec::ProcessRunner;
use crate::output::OutputTarget;
use crate::workspace::Workspace;

/// Pipeline lifecycle. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    BuildingMatrix,
    NormalizingMatrix,
    BuildingTree,
    PostprocessingTree,
    Done,
    Failed,
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    /// Successor on the success path
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::BuildingMatrix),
            Stage::BuildingMatrix => Some(Stage::NormalizingMatrix),
            Stage::NormalizingMatrix => Some(Stage::BuildingTree),
            Stage::BuildingTree => Some(Stage::PostprocessingTree),
            Stage::PostprocessingTree => Some(Stage::Done),
            Stage::Done | Stage::Failed => None,
        }
    }

    /// Whether the lifecycle permits moving from `self` to `to`
    pub fn can_enter(&self, to: Stage) -> bool {
        match to {
            Stage::Failed => !self.is_terminal(),
            _ => self.next() == Some(to),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::BuildingMatrix => "building distance matrix",
            Stage::NormalizingMatrix => "normalizing matrix labels",
            Stage::BuildingTree => "building tree",
            Stage::PostprocessingTree => "postprocessing tree",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Fully resolved settings of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Genome paths, or the single file-of-files path
    pub inputs: Vec<String>,
    pub file_of_files: bool,
    pub params: SketchParams,
    pub algorithm: Algorithm,
    pub output: OutputTarget,
    /// Keep the workspace and report its path
    pub debug: bool,
    pub verbose: bool,
    /// Parent directory of the workspace
    pub tmp_dir: Option<PathBuf>,
    pub mash: String,
    pub quicktree: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            file_of_files: false,
            params: SketchParams::default(),
            algorithm: Algorithm::default(),
            output: OutputTarget::default(),
            debug: false,
            verbose: false,
            tmp_dir: None,
            mash: DEFAULT_MASH.to_string(),
            quicktree: DEFAULT_QUICKTREE.to_string(),
        }
    }
}

impl PipelineOptions {
    /// Active flags as shown in the start message
    pub fn summary(&self) -> String {
        format!(
            "k={} s={} t={} f={} L={} D={} V={} output={}",
            self.params.kmer_size,
            self.params.sketch_size,
            self.params.threads,
            self.algorithm,
            self.file_of_files,
            self.debug,
            self.verbose,
            self.output
        )
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Canonical single-line tree
    pub tree: String,
    pub leaf_count: usize,
    /// Retained workspace (debug mode only)
    pub workspace: Option<PathBuf>,
}

/// Runs the stages strictly in sequence; consumed by [`Pipeline::run`].
pub struct Pipeline<'a> {
    options: &'a PipelineOptions,
    runner: &'a dyn ProcessRunner,
    diag: &'a Diagnostics,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        options: &'a PipelineOptions,
        runner: &'a dyn ProcessRunner,
        diag: &'a Diagnostics,
    ) -> Self {
        Self {
            options,
            runner,
            diag,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn run(mut self) -> Result<RunReport> {
        self.diag.message(&format!(
            "Attotree v{} starting ({})",
            crate::VERSION,
            self.options.summary()
        ));

        let workspace = match Workspace::create(self.options.tmp_dir.as_deref()) {
            Ok(ws) => ws,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };
        self.diag.message(&format!(
            "Created a temporary directory {}",
            workspace.path().display()
        ));

        let result = self.execute(&workspace);
        if let Err(e) = &result {
            self.fail(e);
        }

        let released = workspace.release(self.options.debug);
        self.conclude(result, released)
    }

    /// Settle the run once the workspace has been released.
    ///
    /// A cleanup failure is only a warning.
    fn conclude(
        &mut self,
        result: Result<(String, usize)>,
        released: Result<Option<PathBuf>>,
    ) -> Result<RunReport> {
        let retained = match released {
            Ok(retained) => retained,
            Err(cleanup) => {
                self.diag.message(&format!(
                    "Warning: could not remove the temporary directory: {}",
                    cleanup
                ));
                None
            }
        };
        if let Some(path) = &retained {
            self.diag.message(&format!(
                "Debug mode: intermediate files kept in {} (remove manually)",
                path.display()
            ));
        }

        let (tree, leaf_count) = result?;
        self.enter(Stage::Done);
        match &retained {
            Some(path) => self.diag.message(&format!(
                "Finished: tree with {} leaves written to {}; workspace {}",
                leaf_count,
                self.options.output,
                path.display()
            )),
            None => self.diag.message(&format!(
                "Finished: tree with {} leaves written to {}",
                leaf_count, self.options.output
            )),
        }

        Ok(RunReport {
            tree,
            leaf_count,
            workspace: retained,
        })
    }

    fn execute(&mut self, workspace: &Workspace) -> Result<(String, usize)> {
        self.enter(Stage::BuildingMatrix);
        let inputs = self.capture_inputs(workspace)?;
        let engine = DistanceEngine::new(self.options.mash.as_str(), self.options.params.clone());
        engine.build_matrix(&inputs, &workspace.raw_matrix(), self.runner, self.diag)?;

        self.enter(Stage::NormalizingMatrix);
        let matrix = normalize_matrix(&workspace.raw_matrix(), &workspace.normalized_matrix())?;
        for label in matrix.duplicate_labels() {
            self.diag.message(&format!(
                "Warning: several inputs map to the sample name '{}'",
                label
            ));
        }

        self.enter(Stage::BuildingTree);
        let engine = TreeEngine::new(self.options.quicktree.as_str(), self.options.algorithm);
        engine.build_tree(
            &workspace.normalized_matrix(),
            &workspace.raw_tree(),
            self.runner,
            self.diag,
        )?;

        self.enter(Stage::PostprocessingTree);
        let tree = canonicalize_file(&workspace.raw_tree())?;
        if let Some(problem) = structure_problem(&tree) {
            self.diag.message(&format!("Warning: tree looks malformed ({})", problem));
        }
        let leaf_count = leaf_labels(&tree).len();
        if leaf_count != matrix.leaf_count {
            self.diag.message(&format!(
                "Warning: tree has {} leaves but the matrix has {} rows",
                leaf_count, matrix.leaf_count
            ));
        }
        self.options.output.write_tree(&tree)?;

        Ok((tree, leaf_count))
    }

    /// Genome inputs for the distance engine; a file-of-files is read once
    /// and copied into the workspace
    fn capture_inputs(&self, workspace: &Workspace) -> Result<GenomeInputs> {
        if !self.options.file_of_files {
            return Ok(GenomeInputs::Paths(self.options.inputs.clone()));
        }

        let source = match self.options.inputs.as_slice() {
            [single] => single,
            other => {
                return Err(AttotreeError::ArgumentError(format!(
                    "-L expects exactly one list file, got {}",
                    other.len()
                )))
            }
        };
        let content = fs::read(source).map_err(|e| {
            AttotreeError::ArgumentError(format!("cannot read list of files '{}': {}", source, e))
        })?;

        let local = workspace.file_of_files();
        fs::write(&local, &content)
            .map_err(|e| AttotreeError::io(format!("Failed to write '{}'", local.display()), e))?;
        self.diag.message(&format!(
            "Copied list of files '{}' to {}",
            source,
            local.display()
        ));
        Ok(GenomeInputs::FileOfFiles(local))
    }

    fn enter(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_enter(next),
            "illegal transition {:?} -> {:?}",
            self.stage,
            next
        );
        self.stage = next;
        match next {
            Stage::Done | Stage::Failed | Stage::Idle => {}
            _ => self.diag.message(&format!("Stage: {}", next)),
        }
    }

    fn fail(&mut self, error: &AttotreeError) {
        let during = self.stage;
        self.enter(Stage::Failed);
        self.diag.message(&format!("Pipeline failed while {}: {}", during, error));
    }
}
