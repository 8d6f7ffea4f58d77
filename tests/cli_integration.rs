//! CLI integration tests
//!
//! These tests drive the attotree binary end to end with small shell scripts
//! standing in for mash and quicktree, and check:
//! - Tree output and leaf names
//! - File-of-files input
//! - Failure propagation and workspace cleanup
//! - Exit codes

#![cfg(unix)]

use std::collections::BTreeSet;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const MASH_STUB: &str = r#"#!/bin/sh
# triangle -s S -k K -p T
shift 7
if [ "$1" = "-l" ]; then
  set -- $(grep -v '^[[:space:]]*$' "$2")
fi
printf '\t%s\n' "$#"
i=0
for p in "$@"; do
  printf '%s' "$p"
  j=0
  while [ "$j" -lt "$i" ]; do
    printf '\t0.%s%s' "$i" "$j"
    j=$((j + 1))
  done
  printf '\n'
  i=$((i + 1))
done
"#;

const QUICKTREE_STUB: &str = r#"#!/bin/sh
for matrix in "$@"; do :; done
echo "("
tail -n +2 "$matrix" | cut -f1 | sed 's/$/:0.01,/' | sed '$ s/,$//'
echo ");"
"#;

const FAILING_QUICKTREE_STUB: &str = r#"#!/bin/sh
echo "quicktree: matrix is corrupt" >&2
exit 2
"#;

/// Scratch area holding the stub tools and the workspace parent
struct Sandbox {
    dir: TempDir,
    mash: PathBuf,
    quicktree: PathBuf,
}

impl Sandbox {
    fn new(quicktree: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create sandbox");
        fs::create_dir(dir.path().join("tmp")).expect("Failed to create tmp dir");
        let mash = install_script(dir.path(), "mash", MASH_STUB);
        let quicktree = install_script(dir.path(), "quicktree", quicktree);
        Self {
            dir,
            mash,
            quicktree,
        }
    }

    fn tmp_dir(&self) -> PathBuf {
        self.dir.path().join("tmp")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_attotree"))
            .env_remove("ATTOTREE_MASH")
            .env_remove("ATTOTREE_QUICKTREE")
            .arg("--mash")
            .arg(&self.mash)
            .arg("--quicktree")
            .arg(&self.quicktree)
            .arg("--tmp-dir")
            .arg(self.tmp_dir())
            .args(args)
            .output()
            .expect("Failed to execute attotree")
    }
}

fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write stub script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make stub executable");
    path
}

fn leaf_set(tree: &str) -> BTreeSet<String> {
    tree.trim()
        .trim_end_matches(';')
        .split(|c| matches!(c, '(' | ')' | ','))
        .filter_map(|node| node.split(':').next())
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect()
}

fn expected(labels: &[&str]) -> BTreeSet<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_two_genomes_to_stdout() {
    let sandbox = Sandbox::new(QUICKTREE_STUB);
    let output = sandbox.run(&["/data/genomeA.fa", "/data/other/genomeB.fa.gz"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let tree = stdout(&output);
    assert_eq!(tree.lines().count(), 1);
    assert!(tree.ends_with(";\n"));
    assert_eq!(leaf_set(&tree), expected(&["genomeA", "genomeB"]));
    assert!(stderr(&output)
        .lines()
        .all(|line| line.starts_with("[attotree] ")));
}

#[test]
fn test_output_file_and_file_of_files() {
    let sandbox = Sandbox::new(QUICKTREE_STUB);
    let list = sandbox.dir.path().join("genomes.txt");
    fs::write(&list, "/g/s1.fasta\n\n/g/s2.fna.gz\n/g/s3.fa\n").unwrap();
    let out = sandbox.dir.path().join("trees").join("result.nw");

    let output = sandbox.run(&["-L", "-o", out.to_str().unwrap(), list.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    let tree = fs::read_to_string(&out).unwrap();
    assert_eq!(leaf_set(&tree), expected(&["s1", "s2", "s3"]));
}

#[test]
fn test_quicktree_failure_exits_one() {
    let sandbox = Sandbox::new(FAILING_QUICKTREE_STUB);
    let out = sandbox.dir.path().join("tree.nw");

    let output = sandbox.run(&["-o", out.to_str().unwrap(), "/g/a.fa", "/g/b.fa"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("attotree error:"));
    assert!(err.contains("quicktree"));
    assert!(err.contains("exit code 2"));
    assert!(!out.exists());
    assert!(fs::read_dir(sandbox.tmp_dir()).unwrap().next().is_none());
}

#[test]
fn test_debug_keeps_workspace() {
    let sandbox = Sandbox::new(QUICKTREE_STUB);
    let output = sandbox.run(&["-D", "/g/a.fa", "/g/b.fa"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let entries: Vec<PathBuf> = fs::read_dir(sandbox.tmp_dir())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    let workspace = &entries[0];
    assert!(workspace.join("distances.phylip").is_file());
    assert!(workspace.join("distances.normalized.phylip").is_file());
    assert!(workspace.join("tree.nw").is_file());

    let err = stderr(&output);
    let last = err.lines().last().unwrap();
    assert!(last.contains(workspace.to_str().unwrap()));
}

#[test]
fn test_invalid_arguments_exit_one() {
    let sandbox = Sandbox::new(QUICKTREE_STUB);

    let output = sandbox.run(&["-k", "0", "/g/a.fa"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("k-mer size"));

    let output = sandbox.run(&["-f", "ml", "/g/a.fa"]);
    assert_eq!(output.status.code(), Some(1));

    let output = sandbox.run(&["--no-such-flag", "/g/a.fa"]);
    assert_eq!(output.status.code(), Some(1));

    let output = sandbox.run(&["-L", "one.txt", "two.txt"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unwritable_output_fails_before_mash() {
    let sandbox = Sandbox::new(QUICKTREE_STUB);
    let out_dir = sandbox.dir.path().to_str().unwrap().to_string();

    let output = sandbox.run(&["-o", &out_dir, "/g/a.fa", "/g/b.fa"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Cannot write output file"));
    assert!(!err.contains("Running mash"));
}

#[test]
fn test_unreadable_list_exits_one() {
    let sandbox = Sandbox::new(QUICKTREE_STUB);
    let output = sandbox.run(&["-L", "/no/such/list.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("/no/such/list.txt"));
    assert!(fs::read_dir(sandbox.tmp_dir()).unwrap().next().is_none());
}

#[test]
fn test_config_file_supplies_algorithm() {
    let sandbox = Sandbox::new(QUICKTREE_STUB);
    let config = sandbox.dir.path().join("attotree.toml");
    fs::write(&config, "algorithm = \"upgma\"\nverbose = true\n").unwrap();

    let output = sandbox.run(&["--config", config.to_str().unwrap(), "/g/a.fa", "/g/b.fa"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("-upgma"));
}

#[test]
fn test_generate_config_and_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_attotree"))
        .arg("--generate-config")
        .output()
        .expect("Failed to execute attotree");
    assert!(output.status.success());
    assert!(stdout(&output).contains("kmer_size = 21"));

    let output = Command::new(env!("CARGO_BIN_EXE_attotree"))
        .arg("-v")
        .output()
        .expect("Failed to execute attotree");
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
