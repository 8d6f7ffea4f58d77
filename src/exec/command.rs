// command.rs - Typed command specification

use std::fmt;
use std::path::Path;

/// Number of arguments shown before a command is shortened in non-verbose mode
pub const SHOWN_ARGS: usize = 8;

/// Program name plus ordered argument list.
///
/// Arguments are handed to the OS one by one; the rendered string is for
/// display only and is never executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Human-readable command line, shortened unless `verbose`
    pub fn render(&self, verbose: bool) -> String {
        let mut parts = vec![quote(&self.program)];
        let shown = if verbose {
            self.args.len()
        } else {
            self.args.len().min(SHOWN_ARGS)
        };
        parts.extend(self.args[..shown].iter().map(|a| quote(a)));

        let hidden = self.args.len() - shown;
        if hidden > 0 {
            parts.push(format!("... (+{} more)", hidden));
        }
        parts.join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(true))
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.contains(char::is_whitespace) {
        format!("\"{}\"", part)
    } else {
        part.to_string()
    }
}
