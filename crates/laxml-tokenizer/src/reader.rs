//! UTF-8 character source with a two-character pushback window.
//!
//! Both the chunk scanner and the key-value pair parser pull characters one
//! at a time from arbitrary readers. The scanner needs to look one character
//! past a `<` and, when a new tag starts, give both characters back.

use std::io::{self, BufRead, BufReader, Read};

use crate::error::TokenizeError;

/// `<` plus the peeked character following it.
const PUSHBACK_WINDOW: usize = 2;

/// Decodes UTF-8 from a reader, one `char` per call.
///
/// Once the underlying reader reports end of input, every later call keeps
/// returning `None` (after draining any pushed-back characters), even if the
/// reader would produce more bytes.
#[derive(Debug)]
pub struct CharReader<R> {
    inner: BufReader<R>,
    /// Characters given back by the caller, most recent last.
    pushback: Vec<char>,
    /// Bytes consumed from `inner` so far.
    offset: usize,
    exhausted: bool,
}

impl<R: Read> CharReader<R> {
    /// Wrap a reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            pushback: Vec::with_capacity(PUSHBACK_WINDOW),
            offset: 0,
            exhausted: false,
        }
    }

    /// Consume the next character, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::Io`] if the reader fails and
    /// [`TokenizeError::InvalidUtf8`] if the bytes do not decode.
    pub fn read_char(&mut self) -> Result<Option<char>, TokenizeError> {
        if let Some(c) = self.pushback.pop() {
            return Ok(Some(c));
        }
        if self.exhausted {
            return Ok(None);
        }

        let start = self.offset;
        let Some(first) = self.read_byte()? else {
            self.exhausted = true;
            return Ok(None);
        };
        let invalid = TokenizeError::InvalidUtf8 { offset: start };
        let Some(width) = utf8_width(first) else {
            return Err(invalid);
        };

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.read_byte()? {
                Some(byte) => *slot = byte,
                // Truncated sequence at end of input.
                None => return Err(invalid),
            }
        }

        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map_or(Err(invalid), |c| Ok(Some(c)))
    }

    /// Give a character back; the next [`read_char`](Self::read_char) returns it.
    ///
    /// Characters come back in reverse order of unreading, so to restore
    /// `a` then `b` unread `b` first.
    pub fn unread(&mut self, c: char) {
        debug_assert!(
            self.pushback.len() < PUSHBACK_WINDOW,
            "pushback window of {PUSHBACK_WINDOW} characters exceeded"
        );
        self.pushback.push(c);
    }

    /// Number of bytes consumed from the underlying reader.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let byte = buf[0];
                    self.inner.consume(1);
                    self.offset += 1;
                    return Ok(Some(byte));
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

/// Length of the UTF-8 sequence introduced by `first`, if it can start one.
const fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
