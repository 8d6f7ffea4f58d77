// newick.rs - Canonicalize engine-formatted Newick text to one line

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{AttotreeError, Result};

/// Join the stripped, non-blank lines of `reader` into a single line.
///
/// Topology, labels and branch lengths are left exactly as written; only
/// surrounding whitespace and line breaks disappear. Bytes that are not
/// valid UTF-8 are replaced rather than rejected.
pub fn canonicalize<R: BufRead>(mut reader: R, source: &Path) -> Result<String> {
    let mut tree = String::new();
    let mut line = Vec::new();
    let mut line_num = 0;
    loop {
        line.clear();
        line_num += 1;
        let read = reader.read_until(b'\n', &mut line).map_err(|e| {
            AttotreeError::format(source, format!("cannot read line {}: {}", line_num, e))
        })?;
        if read == 0 {
            break;
        }
        tree.push_str(String::from_utf8_lossy(&line).trim());
    }
    Ok(tree)
}

/// Canonicalize the tree stored at `path`
pub fn canonicalize_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .map_err(|e| AttotreeError::format(path, format!("cannot open tree: {}", e)))?;
    canonicalize(BufReader::new(file), path)
}

/// Write a canonical tree followed by a newline
pub fn write_tree<W: Write + ?Sized>(tree: &str, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", tree)?;
    writer.flush()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Comma,
    Colon,
    End,
    Label(char),
}

/// Structural tokens of a tree.
///
/// Labels come from file names and are written unquoted, so `'` and `(` only
/// act as syntax at the start of a label, and a `)` pairs with a `(` opened
/// inside the same label before it closes a subtree. Returns the tokens and
/// whether a quoted label was left open.
fn scan(tree: &str) -> (Vec<Token>, bool) {
    let mut tokens = Vec::with_capacity(tree.len());
    let mut quoted = false;
    let mut in_label = false;
    let mut label_depth = 0usize;

    for c in tree.chars() {
        if quoted {
            if c == '\'' {
                quoted = false;
            }
            tokens.push(Token::Label(c));
            continue;
        }
        let token = match c {
            '\'' if !in_label => {
                quoted = true;
                Token::Label(c)
            }
            '(' if in_label => {
                label_depth += 1;
                Token::Label(c)
            }
            ')' if label_depth > 0 => {
                label_depth -= 1;
                Token::Label(c)
            }
            '(' => Token::Open,
            ')' => Token::Close,
            ',' => Token::Comma,
            ':' => Token::Colon,
            ';' => Token::End,
            _ => Token::Label(c),
        };
        match token {
            Token::Label(_) => in_label = true,
            _ => {
                in_label = false;
                label_depth = 0;
            }
        }
        tokens.push(token);
    }
    (tokens, quoted)
}

/// Leaf labels of a canonical tree, in order of appearance.
///
/// Internal node labels (text after a closing parenthesis) and branch lengths
/// are skipped; surrounding quotes are removed.
pub fn leaf_labels(tree: &str) -> Vec<String> {
    let mut labels = Vec::new();
    let mut current = String::new();
    let mut at_leaf = true;
    let mut in_length = false;

    let (tokens, _) = scan(tree);
    for token in tokens {
        match token {
            Token::Open => {
                at_leaf = true;
                in_length = false;
                current.clear();
            }
            Token::Comma | Token::Close | Token::End => {
                let label = current.trim();
                if at_leaf && !label.is_empty() {
                    labels.push(unquote(label));
                }
                current.clear();
                in_length = false;
                at_leaf = token == Token::Comma;
            }
            Token::Colon => in_length = true,
            Token::Label(c) if !in_length => current.push(c),
            Token::Label(_) => {}
        }
    }
    labels
}

fn unquote(label: &str) -> String {
    if label.len() >= 2 && label.starts_with('\'') && label.ends_with('\'') {
        label[1..label.len() - 1].replace("''", "'")
    } else {
        label.to_string()
    }
}

/// Describe a structural problem of `tree`, if any.
///
/// The tree is still passed through unchanged; callers report this as a
/// warning.
pub fn structure_problem(tree: &str) -> Option<String> {
    let (tokens, open_quote) = scan(tree);
    let mut depth: usize = 0;
    for token in tokens {
        match token {
            Token::Open => depth += 1,
            Token::Close => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return Some("unmatched ')'".to_string()),
            },
            _ => {}
        }
    }
    if open_quote {
        Some("unterminated quoted label".to_string())
    } else if depth > 0 {
        Some(format!("{} unclosed '('", depth))
    } else {
        None
    }
}
