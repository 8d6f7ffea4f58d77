// tree.rs - Tree inference through the distance-based tree engine

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::exec::{run_checked, CommandSpec, ProcessRunner};

pub const DEFAULT_QUICKTREE: &str = "quicktree";

/// Tree inference algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    NeighborJoining,
    Upgma,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nj" | "neighbor-joining" => Ok(Algorithm::NeighborJoining),
            "upgma" => Ok(Algorithm::Upgma),
            _ => Err(format!("Invalid tree inference algorithm: {}. Use: nj, upgma", s)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::NeighborJoining => "nj",
            Algorithm::Upgma => "upgma",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::NeighborJoining => "neighbor-joining",
            Algorithm::Upgma => "UPGMA",
        }
    }

    /// QuickTree switch selecting this algorithm; neighbor-joining is its default
    pub fn engine_flag(&self) -> Option<&'static str> {
        match self {
            Algorithm::NeighborJoining => None,
            Algorithm::Upgma => Some("-upgma"),
        }
    }
}

/// Wrapper around the tree inference engine.
///
/// Labels are passed through untouched, so the leaves of the resulting tree
/// are exactly the row labels of the input matrix.
#[derive(Debug, Clone)]
pub struct TreeEngine {
    program: String,
    algorithm: Algorithm,
}

impl TreeEngine {
    pub fn new(program: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            program: program.into(),
            algorithm,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// `quicktree -in m [-upgma] matrix`
    pub fn command(&self, matrix_path: &Path) -> CommandSpec {
        let mut spec = CommandSpec::new(self.program.as_str()).args(["-in", "m"]);
        if let Some(flag) = self.algorithm.engine_flag() {
            spec = spec.arg(flag);
        }
        spec.path_arg(matrix_path)
    }

    /// Run the engine on `matrix_path`, writing raw Newick text to `tree_path`
    pub fn build_tree(
        &self,
        matrix_path: &Path,
        tree_path: &Path,
        runner: &dyn ProcessRunner,
        diag: &Diagnostics,
    ) -> Result<()> {
        diag.message("Running quicktree");
        let spec = self.command(matrix_path);
        run_checked(runner, &spec, tree_path, diag)
    }
}
