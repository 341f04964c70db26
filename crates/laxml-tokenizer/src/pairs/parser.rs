//! Key-value pair state machine.

use std::io::Read;

use crate::error::TokenizeError;
use crate::reader::CharReader;

use super::config::{CharClassConfig, DefaultConfig};

/// One parsed pair, before continuations are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    /// `None` when no separator preceded the value. The value then continues
    /// the previous pair (see [`assemble`](super::assemble)).
    pub name: Option<String>,
    /// The value with surrounding whitespace and quotes removed.
    pub value: String,
}

impl RawPair {
    /// Returns true if this pair continues the previous one.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.name.is_none()
    }
}

/// Pull parser for `name=value` lists such as tag attributes.
///
/// Handles quoting (`"..."`, `'...'`), escaped quotes (`\"`), inline
/// `/* comments */` and unterminated quotes, all as classified by the
/// installed [`CharClassConfig`].
#[derive(Debug)]
pub struct KeyValuePairParser<R, C = DefaultConfig> {
    reader: CharReader<R>,
    config: C,
    finished: bool,
}

impl<'a> KeyValuePairParser<&'a [u8]> {
    /// Parse an in-memory attribute list with the default configuration.
    #[must_use]
    pub fn from_markup(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<R: Read> KeyValuePairParser<R> {
    /// Parse the UTF-8 contents of `reader` with the default configuration.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: CharReader::new(reader),
            config: DefaultConfig,
            finished: false,
        }
    }
}

impl<R: Read, C: CharClassConfig> KeyValuePairParser<R, C> {
    /// Replace the character classification, keeping the read position.
    #[must_use]
    pub fn with_config<D: CharClassConfig>(self, config: D) -> KeyValuePairParser<R, D> {
        KeyValuePairParser {
            reader: self.reader,
            config,
            finished: self.finished,
        }
    }

    /// The installed character classification.
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// Install a different classification of the same type.
    pub fn set_config(&mut self, config: C) {
        self.config = config;
    }

    /// Parse the next pair, or `None` once the input holds no more pairs.
    ///
    /// Per character, in order: an opening comment pair discards input up to
    /// the closing pair; the first unquoted separator ends the name; a quote
    /// not preceded by an escape toggles quoted mode and is dropped (an
    /// escaped quote replaces its escape character); a terminator outside
    /// quotes ends the pair once a name is known. An unterminated quote is
    /// closed by repeating the value's first character.
    ///
    /// # Errors
    ///
    /// Propagates read and decoding failures from the underlying reader.
    pub fn next_pair(&mut self) -> Result<Option<RawPair>, TokenizeError> {
        if self.finished {
            return Ok(None);
        }

        let mut buffer = String::new();
        let mut name: Option<String> = None;
        let mut quoted = false;
        let mut prev: Option<char> = None;
        let mut current = self.skip_whitespace()?;

        loop {
            if let (Some(p), Some(c)) = (prev, current)
                && self.config.is_comment_start(p, c)
            {
                // The opening character was already collected.
                let _ = buffer.pop();
                while let Some(c) = current {
                    if prev.is_some_and(|p| self.config.is_comment_end(p, c)) {
                        break;
                    }
                    prev = current;
                    current = self.reader.read_char()?;
                }
                current = self.skip_whitespace()?;
            }

            if let Some(c) = current
                && self.config.is_separator(c)
                && !quoted
                && name.is_none()
            {
                name = Some(buffer.trim().to_owned());
                buffer.clear();
                current = self.skip_whitespace()?;
            }

            let mut literal = current;
            if let Some(c) = current {
                if self.config.is_quote_start(c) || self.config.is_quote_end(c) {
                    if prev.is_some_and(|p| self.config.is_escape_char(p)) {
                        let _ = buffer.pop();
                    } else {
                        quoted = !quoted;
                        literal = None;
                    }
                } else if self.config.is_pair_end(c) && !quoted && name.is_some() {
                    break;
                }
            }

            if let Some(c) = literal {
                buffer.push(c);
            }
            prev = literal;

            if current.is_none() {
                break;
            }
            current = self.reader.read_char()?;
            if current.is_none() {
                break;
            }
        }

        let mut value = buffer.trim().to_owned();
        if current.is_none() && name.is_none() && value.is_empty() {
            self.finished = true;
            return Ok(None);
        }

        if quoted && let Some(first) = value.chars().next() {
            value.push(first);
        }

        Ok(Some(RawPair { name, value }))
    }

    fn skip_whitespace(&mut self) -> Result<Option<char>, TokenizeError> {
        loop {
            match self.reader.read_char()? {
                Some(c) if self.config.skip_whitespace() && self.config.is_whitespace(c) => {}
                other => return Ok(other),
            }
        }
    }
}

impl<R: Read, C: CharClassConfig> Iterator for KeyValuePairParser<R, C> {
    type Item = Result<RawPair, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_pair() {
            Ok(pair) => pair.map(Ok),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
