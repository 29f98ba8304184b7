//! Plain-text diagnostic log
//!
//! Each input file gets a `=== <file> ===` banner followed by any rejection or
//! unknown-cell messages for it. Every message is mirrored as a `warn!` event.

use super::DiagnosticSink;
use crate::{Error, Result};
use std::io::Write;
use tracing::warn;

pub struct DiagnosticLog<W: Write> {
    writer: W,
    label: String,
    messages: usize,
}

impl<W: Write> DiagnosticLog<W> {
    pub fn new(writer: W, label: impl Into<String>) -> Self {
        Self {
            writer,
            label: label.into(),
            messages: 0,
        }
    }

    fn sink_error(&self, error: std::io::Error) -> Error {
        Error::output_sink(&self.label, "cannot write diagnostic log", Some(error))
    }

    /// Start the section for an input file
    pub fn banner(&mut self, file: &str) -> Result<()> {
        writeln!(self.writer, "=== {} ===", file).map_err(|e| self.sink_error(e))
    }

    /// Append a multi-line block such as the site report
    pub fn append_block(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text.trim_end()).map_err(|e| self.sink_error(e))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.sink_error(e))
    }

    /// Number of diagnostic messages written
    pub fn message_count(&self) -> usize {
        self.messages
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for DiagnosticLog<W> {
    fn diagnostic(&mut self, message: &str) -> Result<()> {
        warn!("{}", message);
        writeln!(self.writer, "{}", message).map_err(|e| self.sink_error(e))?;
        self.messages += 1;
        Ok(())
    }
}
