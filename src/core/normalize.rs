// normalize.rs - Relabel matrix rows from raw paths to sample identifiers

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::sample::SampleId;
use crate::error::{AttotreeError, Result};

/// Rows of a normalized matrix, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMatrix {
    pub leaf_count: usize,
    pub labels: Vec<SampleId>,
}

impl NormalizedMatrix {
    /// SampleIds occurring on more than one row, in first-seen order
    pub fn duplicate_labels(&self) -> Vec<&SampleId> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.labels
            .iter()
            .filter(|label| !seen.insert(*label) && reported.insert(*label))
            .collect()
    }
}

/// Rewrite the row labels of the matrix at `input` into `output`.
///
/// The header line and everything after the first tab of each row are copied
/// byte for byte.
pub fn normalize_matrix(input: &Path, output: &Path) -> Result<NormalizedMatrix> {
    let file = File::open(input)
        .map_err(|e| AttotreeError::format(input, format!("cannot open matrix: {}", e)))?;
    let out = File::create(output).map_err(|e| {
        AttotreeError::io(format!("Failed to create '{}'", output.display()), e)
    })?;

    let mut writer = BufWriter::new(out);
    let matrix = normalize_lines(BufReader::new(file), &mut writer, input)?;
    writer.flush().map_err(|e| {
        AttotreeError::io(format!("Failed to write '{}'", output.display()), e)
    })?;
    Ok(matrix)
}

/// Streaming core of [`normalize_matrix`]; `source` only labels errors.
///
/// Works on raw bytes: labels that are not valid UTF-8 are converted lossily,
/// distances and line terminators are written back unchanged.
pub fn normalize_lines<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    source: &Path,
) -> Result<NormalizedMatrix> {
    let write_err = |e: std::io::Error| AttotreeError::io("Failed to write normalized matrix", e);
    let mut line = Vec::new();

    let read = reader
        .read_until(b'\n', &mut line)
        .map_err(|e| AttotreeError::format(source, format!("cannot read header: {}", e)))?;
    if read == 0 {
        return Err(AttotreeError::format(source, "empty matrix, missing leaf count"));
    }
    let header = String::from_utf8_lossy(&line);
    let leaf_count: usize = header.trim().parse().map_err(|_| {
        AttotreeError::format(source, format!("invalid leaf count '{}'", header.trim()))
    })?;
    writer.write_all(&line).map_err(write_err)?;

    let mut labels = Vec::with_capacity(leaf_count);
    for line_num in 2.. {
        line.clear();
        let read = reader.read_until(b'\n', &mut line).map_err(|e| {
            AttotreeError::format(source, format!("cannot read line {}: {}", line_num, e))
        })?;
        if read == 0 {
            break;
        }

        let sample_id = match line.iter().position(|&b| b == b'\t') {
            Some(tab) => {
                let id = SampleId::from_path(&String::from_utf8_lossy(&line[..tab]));
                writer.write_all(id.as_str().as_bytes()).map_err(write_err)?;
                writer.write_all(&line[tab..]).map_err(write_err)?;
                id
            }
            // Lower-triangular output: the first row has no distances
            None if line_num == 2 => {
                let (label, terminator) = split_terminator(&line);
                let id = SampleId::from_path(&String::from_utf8_lossy(label));
                writer.write_all(id.as_str().as_bytes()).map_err(write_err)?;
                writer.write_all(terminator).map_err(write_err)?;
                id
            }
            None => {
                return Err(AttotreeError::format(
                    source,
                    format!("line {} has no tab separator", line_num),
                ))
            }
        };
        labels.push(sample_id);
    }

    if labels.len() != leaf_count {
        return Err(AttotreeError::format(
            source,
            format!(
                "header declares {} leaves but {} rows follow",
                leaf_count,
                labels.len()
            ),
        ));
    }

    Ok(NormalizedMatrix { leaf_count, labels })
}

/// Split a line into its content and its `\n` or `\r\n` terminator
fn split_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    let content_len = if line.ends_with(b"\r\n") {
        line.len() - 2
    } else if line.ends_with(b"\n") {
        line.len() - 1
    } else {
        line.len()
    };
    line.split_at(content_len)
}
