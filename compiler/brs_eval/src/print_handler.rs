//! Destination for `print` output.
//!
//! Scripts print to stdout by default; hosts and tests capture output in a
//! buffer instead. Enum dispatch keeps the hot `print` path free of vtables.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Output captured in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout,
    /// Captures to a buffer.
    Buffer(BufferPrintHandler),
    /// Discards everything.
    Silent,
}

impl PrintHandlerImpl {
    /// Write `text` as is; callers add their own newlines.
    pub fn print(&self, text: &str) {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                // A closed stdout is not a script error.
                let _ = stdout.write_all(text.as_bytes());
                let _ = stdout.flush();
            }
            Self::Buffer(buffer) => buffer.print(text),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.output(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.clear();
        }
    }
}

/// Print handler shared between an interpreter and its host.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
