// diagnostics.rs - Timestamped lifecycle messages on a dedicated stream

use std::io::{self, Write};
use std::sync::Mutex;
#[cfg(test)]
use std::sync::Arc;

use crate::exec::CommandSpec;

const PREFIX: &str = "[attotree]";

/// Process-wide diagnostic sink.
///
/// Created once in `main` and handed to every stage by reference. Messages
/// never go to the tree output stream.
pub struct Diagnostics {
    writer: Mutex<Box<dyn Write + Send>>,
    verbose: bool,
}

impl Diagnostics {
    pub fn new(writer: Box<dyn Write + Send>, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            verbose,
        }
    }

    pub fn stderr(verbose: bool) -> Self {
        Self::new(Box::new(io::stderr()), verbose)
    }

    /// Sink that swallows everything
    pub fn silent() -> Self {
        Self::new(Box::new(io::sink()), false)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Write one timestamped line
    pub fn message(&self, msg: &str) {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} {} {}\n", PREFIX, stamp, msg);
        if let Ok(mut writer) = self.writer.lock() {
            // A closed diagnostic stream must not abort the pipeline
            let _ = writer.write_all(line.as_bytes());
            let _ = writer.flush();
        }
    }

    /// Command text as it should appear in messages
    pub fn command(&self, spec: &CommandSpec) -> String {
        spec.render(self.verbose)
    }
}

/// Cloneable in-memory writer for inspecting diagnostics
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

#[cfg(test)]
impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        match self.inner.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => String::new(),
        }
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "diagnostic buffer poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
