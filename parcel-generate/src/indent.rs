// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::io::{Result, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentConfig {
    Tab,
    Space(usize),
}

/// A writer inserting the current indentation at the beginning of every non-empty line.
pub struct IndentedWriter<T> {
    out: T,
    indentation: Vec<u8>,
    config: IndentConfig,
    at_beginning_of_line: bool,
}

impl<T> IndentedWriter<T> {
    pub fn new(out: T, config: IndentConfig) -> Self {
        Self {
            out,
            indentation: Vec::new(),
            config,
            at_beginning_of_line: true,
        }
    }

    pub fn indent(&mut self) {
        match self.config {
            IndentConfig::Tab => self.indentation.push(b'\t'),
            IndentConfig::Space(n) => self
                .indentation
                .resize(self.indentation.len() + n, b' '),
        }
    }

    pub fn unindent(&mut self) {
        let width = match self.config {
            IndentConfig::Tab => 1,
            IndentConfig::Space(n) => n,
        };
        self.indentation
            .truncate(self.indentation.len().saturating_sub(width));
    }

    pub fn into_inner(self) -> T {
        self.out
    }
}

impl<T: Write> IndentedWriter<T> {
    /// Write `header {` and indent the following lines.
    pub fn open_block(&mut self, header: &str) -> Result<()> {
        writeln!(self, "{} {{", header)?;
        self.indent();
        Ok(())
    }

    /// Unindent, then write `}` followed by `trailer`.
    pub fn close_block(&mut self, trailer: &str) -> Result<()> {
        self.unindent();
        writeln!(self, "}}{}", trailer)
    }

    /// Close the current block and open a new one on the same line, as in `} else {`.
    pub fn continue_block(&mut self, header: &str) -> Result<()> {
        self.unindent();
        writeln!(self, "}} {} {{", header)?;
        self.indent();
        Ok(())
    }
}

impl<T: Write> Write for IndentedWriter<T> {
    fn write(&mut self, mut buf: &[u8]) -> Result<usize> {
        let mut bytes_written = 0;

        while !buf.is_empty() {
            let (line, newline, rest) = match buf.iter().position(|&b| b == b'\n') {
                Some(index) => (&buf[..index], true, &buf[index + 1..]),
                None => (buf, false, &buf[buf.len()..]),
            };

            if self.at_beginning_of_line && !line.is_empty() {
                self.out.write_all(&self.indentation)?;
                self.at_beginning_of_line = false;
            }
            self.out.write_all(line)?;
            bytes_written += line.len();

            if newline {
                self.out.write_all(b"\n")?;
                bytes_written += 1;
                self.at_beginning_of_line = true;
            }
            buf = rest;
        }

        Ok(bytes_written)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()
    }
}
