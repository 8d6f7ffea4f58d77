// args.rs - Command line arguments definition

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "attotree",
    version,
    about = "attotree - rapid estimation of phylogenetic trees using sketching",
    disable_version_flag = true
)]
pub struct Args {
    /// input genome files (fasta / gzipped fasta), or a list of files with -L
    #[arg(value_name = "GENOMES", required_unless_present = "generate_config")]
    pub genomes: Vec<String>,

    /// k-mer size [21]
    #[arg(short = 'k', long = "kmer-size", value_name = "INT")]
    pub kmer_size: Option<u32>,

    /// sketch size [10000]
    #[arg(short = 's', long = "sketch-size", value_name = "INT")]
    pub sketch_size: Option<u32>,

    /// number of threads passed to mash [number of CPUs]
    #[arg(short = 't', long = "threads", value_name = "INT")]
    pub threads: Option<usize>,

    /// newick output file, '-' for stdout [stdout]
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,

    /// tree inference algorithm (nj/upgma) [nj]
    #[arg(short = 'f', long = "algorithm", value_name = "STR")]
    pub algorithm: Option<String>,

    /// input file is a list of genome files, one per line
    #[arg(short = 'L', long = "list")]
    pub list: bool,

    /// debug mode: keep the temporary directory and report its path
    #[arg(short = 'D', long = "debug")]
    pub debug: bool,

    /// verbose mode: report full commands
    #[arg(short = 'V', long = "verbose")]
    pub verbose: bool,

    /// mash executable
    #[arg(long = "mash", value_name = "PATH", env = "ATTOTREE_MASH")]
    pub mash: Option<String>,

    /// quicktree executable
    #[arg(long = "quicktree", value_name = "PATH", env = "ATTOTREE_QUICKTREE")]
    pub quicktree: Option<String>,

    /// directory for the temporary workspace [system temp dir]
    #[arg(long = "tmp-dir", value_name = "DIR")]
    pub tmp_dir: Option<String>,

    /// path to TOML configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// print a sample configuration file and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    /// print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}
