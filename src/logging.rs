//! `tracing` setup. Events go to the browser console on wasm32 and to stderr
//! on native targets.

use std::io::{self, Write};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Install the global subscriber. Later calls are no-ops.
pub fn init(level: Level) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        // std::time is unavailable on wasm32-unknown-unknown
        .without_time()
        .with_target(false)
        .with_writer(ConsoleWriter)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(%level, "logging initialized");
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::default()
    }
}

/// Buffers one formatted event and emits it when dropped.
#[derive(Default)]
pub struct ConsoleLine {
    buf: Vec<u8>,
}

impl Write for ConsoleLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buf);
        emit(line.trim_end());
        self.buf.clear();
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&line.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init(Level::DEBUG);
        init(Level::INFO);
        tracing::info!("still logging");
    }

    #[test]
    fn console_line_buffers_until_flush() {
        let mut line = ConsoleLine::default();
        write!(line, "hello {}", 3).unwrap();
        assert_eq!(line.buf, b"hello 3");
        line.flush().unwrap();
        assert!(line.buf.is_empty());
    }
}
