//! Output sinks for rendered text.

use std::io::Write;

/// Where rendered output goes.
#[derive(Debug)]
pub enum Emitter {
    /// Collect into a string.
    Buffer(String),
    /// Write through to stdout as rendering proceeds.
    Stdout,
    /// Discard.
    Silent,
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter::buffer()
    }
}

impl Emitter {
    pub fn buffer() -> Self {
        Emitter::Buffer(String::new())
    }

    pub fn write(&mut self, text: &str) {
        match self {
            Emitter::Buffer(buffer) => buffer.push_str(text),
            Emitter::Stdout => {
                if let Err(err) = std::io::stdout().lock().write_all(text.as_bytes()) {
                    tracing::warn!(error = %err, "failed to write rendered output");
                }
            }
            Emitter::Silent => {}
        }
    }

    /// Captured output so far; empty for non-buffering sinks.
    pub fn output(&self) -> &str {
        match self {
            Emitter::Buffer(buffer) => buffer,
            Emitter::Stdout | Emitter::Silent => "",
        }
    }

    pub fn into_output(self) -> String {
        match self {
            Emitter::Buffer(buffer) => buffer,
            Emitter::Stdout | Emitter::Silent => String::new(),
        }
    }
}
