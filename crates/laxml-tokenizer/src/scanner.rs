//! Raw chunk scanner.
//!
//! Splits a character stream into maximal runs that are either a `<...>`
//! markup run or a span of text between markup runs. The scanner knows
//! nothing about tag names, comments or quoting: the first `>` after an
//! opening `<` ends the run, so `<!-- a > b -->` yields `<!-- a >` followed by
//! the text ` b -->`.

use std::io::Read;

use tracing::trace;

use crate::error::TokenizeError;
use crate::reader::CharReader;

/// Pull-based splitter producing raw chunk strings.
#[derive(Debug)]
pub struct MarkupScanner<R> {
    reader: CharReader<R>,
    finished: bool,
}

impl<'a> MarkupScanner<&'a [u8]> {
    /// Scan an in-memory string.
    #[must_use]
    pub fn from_markup(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<R: Read> MarkupScanner<R> {
    /// Scan the UTF-8 contents of `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: CharReader::new(reader),
            finished: false,
        }
    }

    /// Produce the next chunk, or `None` once the input is exhausted.
    ///
    /// A `<` starts a new chunk unless it directly follows collected text and
    /// is itself followed by whitespace; that stray `<` is kept in the text
    /// run. Input that ends inside a markup run yields the partial run.
    /// Chunks are never empty.
    ///
    /// # Errors
    ///
    /// Propagates read and decoding failures from the underlying reader.
    pub fn next_chunk(&mut self) -> Result<Option<String>, TokenizeError> {
        if self.finished {
            return Ok(None);
        }

        let mut chunk = String::new();
        let mut in_markup = false;

        while let Some(c) = self.reader.read_char()? {
            if c == '<' {
                let mut current = c;
                if !chunk.is_empty() {
                    match self.reader.read_char()? {
                        Some(next) if next.is_whitespace() => {
                            // Stray '<' inside text: keep both characters.
                            chunk.push('<');
                            current = next;
                        }
                        peeked => {
                            if let Some(next) = peeked {
                                self.reader.unread(next);
                            }
                            self.reader.unread('<');
                            trace!(chunk = %chunk, "chunk");
                            return Ok(Some(chunk));
                        }
                    }
                }
                in_markup = true;
                chunk.push(current);
            } else if in_markup && c == '>' {
                chunk.push(c);
                trace!(chunk = %chunk, "chunk");
                return Ok(Some(chunk));
            } else {
                chunk.push(c);
            }
        }

        if chunk.is_empty() {
            self.finished = true;
            return Ok(None);
        }
        trace!(chunk = %chunk, "trailing chunk");
        Ok(Some(chunk))
    }
}

impl<R: Read> Iterator for MarkupScanner<R> {
    type Item = Result<String, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_chunk() {
            Ok(chunk) => chunk.map(Ok),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
