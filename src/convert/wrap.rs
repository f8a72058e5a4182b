//! Line wrapping for already-converted output.

use std::io::{self, Write};

/// A [`Write`] adaptor that inserts `\n` after every `width` bytes.
///
/// It sits between a pipeline and its sink and knows nothing about the
/// converter; a `width` of zero disables wrapping.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use c8::LineWrap;
///
/// let mut wrap = LineWrap::new(Vec::new(), 4);
/// wrap.write_all(b"abcdef")?;
/// let out = wrap.finish()?;
/// assert_eq!(out, b"abcd\nef\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct LineWrap<W: Write> {
    inner: W,
    width: usize,
    column: usize,
    written: u64,
}

impl<W: Write> LineWrap<W> {
    /// Wraps `inner`, breaking lines every `width` bytes.
    pub fn new(inner: W, width: usize) -> Self {
        Self {
            inner,
            width,
            column: 0,
            written: 0,
        }
    }

    /// Returns the number of bytes on the current, unterminated line.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Terminates the last line and returns the inner writer.
    ///
    /// A partial line gets a closing `\n`. An empty stream produces a single
    /// `\n`. A stream ending exactly on a line boundary gets nothing more.
    pub fn finish(mut self) -> io::Result<W> {
        if self.column > 0 || self.written == 0 {
            self.inner.write_all(b"\n")?;
            self.column = 0;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for LineWrap<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.width == 0 {
            self.inner.write_all(buf)?;
            self.column += buf.len();
            self.written += buf.len() as u64;
            return Ok(buf.len());
        }

        let mut rest = buf;
        while !rest.is_empty() {
            let take = rest.len().min(self.width - self.column);
            self.inner.write_all(&rest[..take])?;
            self.column += take;
            self.written += take as u64;
            rest = &rest[take..];

            if self.column == self.width {
                self.inner.write_all(b"\n")?;
                self.column = 0;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
