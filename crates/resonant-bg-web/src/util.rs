//! Console bindings and the tracing writer that targets them

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);

    /// Console.error binding for WASM
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn log_error(s: &str);
}

/// Install the global `tracing` subscriber
///
/// One formatted line per event, no timestamps (the console adds its own)
/// and no ANSI colors. Calling this twice leaves the first subscriber in place.
pub fn init_logging() {
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(Level::INFO)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();

    if installed.is_err() {
        log("[resonant-bg] tracing subscriber already installed");
    }
}

/// Route WARN and ERROR to `console.error`
#[inline]
fn is_error_level(level: &Level) -> bool {
    *level <= Level::WARN
}

/// [`MakeWriter`] that hands each event to the browser console
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(false)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(is_error_level(meta.level()))
    }
}

/// Buffers one formatted event and flushes it to the console on drop
pub struct ConsoleWriter {
    buf: Vec<u8>,
    error: bool,
}

impl ConsoleWriter {
    fn new(error: bool) -> Self {
        Self {
            buf: Vec::with_capacity(128),
            error,
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end_matches('\n');
        if self.error {
            log_error(line);
        } else {
            log(line);
        }
    }
}
