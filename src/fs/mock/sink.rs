//! Output sinks that misbehave on purpose.

use std::io::{self, Write};

/// A sink that accepts at most `max_per_write` bytes per `write` call.
///
/// Simulates short writes on pipes and terminals.
#[derive(Debug, Clone)]
pub struct ShortWriter {
    max_per_write: usize,
    written: Vec<u8>,
    calls: usize,
}

impl ShortWriter {
    pub fn new(max_per_write: usize) -> Self {
        assert!(max_per_write > 0, "max_per_write must be positive");
        Self {
            max_per_write,
            written: Vec::new(),
            calls: 0,
        }
    }

    /// Everything accepted so far.
    pub fn bytes(&self) -> &[u8] {
        &self.written
    }

    /// Number of `write` calls made.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = buf.len().min(self.max_per_write);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that accepts `budget` bytes and then fails every write.
#[derive(Debug, Clone)]
pub struct FailingWriter {
    budget: usize,
    written: Vec<u8>,
}

impl FailingWriter {
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            written: Vec::new(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.written
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
