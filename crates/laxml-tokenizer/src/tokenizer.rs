//! Chunk classifier.
//!
//! Pulls raw chunks from a [`MarkupScanner`] and turns each into a [`Token`]
//! by its leading delimiter, first match wins:
//!
//! | prefix   | kind                     |
//! |----------|--------------------------|
//! | `<?`     | processing instruction   |
//! | `<!--`   | comment                  |
//! | `<!`     | doctype                  |
//! | `<`      | tag                      |
//! | other    | text                     |

use std::io::Read;

use tracing::debug;

use crate::error::TokenizeError;
use crate::options::TokenizerOptions;
use crate::pairs::{KeyValuePairParser, assemble};
use crate::scanner::MarkupScanner;
use crate::token::{Attribute, Token};

/// Pull-based tokenizer over a character stream.
#[derive(Debug)]
pub struct Tokenizer<R> {
    scanner: MarkupScanner<R>,
    options: TokenizerOptions,
    finished: bool,
}

impl<'a> Tokenizer<&'a [u8]> {
    /// Tokenize an in-memory string with default options.
    #[must_use]
    pub fn from_markup(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<R: Read> Tokenizer<R> {
    /// Tokenize the UTF-8 contents of `reader` with default options.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, TokenizerOptions::default())
    }

    /// Tokenize the UTF-8 contents of `reader`.
    #[must_use]
    pub fn with_options(reader: R, options: TokenizerOptions) -> Self {
        Self {
            scanner: MarkupScanner::new(reader),
            options,
            finished: false,
        }
    }

    /// The options this tokenizer classifies with.
    #[must_use]
    pub const fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Scan and classify the next chunk, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates scanner failures, and attribute failures when the options
    /// ask for [`Propagate`](crate::AttributeErrorPolicy::Propagate).
    pub fn next_token(&mut self) -> Result<Option<Token>, TokenizeError> {
        if self.finished {
            return Ok(None);
        }
        let Some(chunk) = self.scanner.next_chunk()? else {
            self.finished = true;
            return Ok(None);
        };
        classify(&chunk, &self.options).map(Some)
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Classify one raw chunk as produced by [`MarkupScanner`].
///
/// # Errors
///
/// Only when attribute parsing fails under
/// [`Propagate`](crate::AttributeErrorPolicy::Propagate).
pub fn classify(chunk: &str, options: &TokenizerOptions) -> Result<Token, TokenizeError> {
    let token = if chunk.starts_with("<?") {
        processing_instruction(chunk, options)?
    } else if chunk.starts_with("<!--") {
        // A missing "-->" leaves the trailing text in place.
        Token::comment(strip(chunk, "<!--", "-->"))
    } else if chunk.starts_with("<!") {
        doctype(chunk, options)
    } else if chunk.starts_with('<') {
        tag(chunk, options)?
    } else {
        Token::text(chunk)
    };

    debug!(
        kind = %token.kind(),
        name = token.name().unwrap_or_default(),
        attributes = token.attributes().len(),
        "classified chunk"
    );
    Ok(token)
}

fn processing_instruction(chunk: &str, options: &TokenizerOptions) -> Result<Token, TokenizeError> {
    let (name, rest) = split_name(strip(chunk, "<?", "?>"));
    let token = Token::processing_instruction(name);
    Ok(match rest {
        Some(rest) => token.with_attributes(attributes(rest, options)?),
        None => token,
    })
}

fn doctype(chunk: &str, options: &TokenizerOptions) -> Token {
    let (root, rest) = split_name(strip(chunk, "<!DOCTYPE", ">"));
    let root = if root.is_empty() {
        options.default_root_element.clone()
    } else {
        root.to_owned()
    };
    let external_id = rest
        .filter(|rest| starts_with_keyword(rest, "PUBLIC") || starts_with_keyword(rest, "SYSTEM"))
        .map_or_else(|| options.default_external_id.clone(), str::to_owned);
    Token::doctype(root, external_id)
}

fn tag(chunk: &str, options: &TokenizerOptions) -> Result<Token, TokenizeError> {
    let text = strip(chunk, "<", ">");
    let (candidate, _) = split_name(text);

    let name = candidate.trim_matches('/');
    let mut end_tag = false;
    let mut empty_element = false;
    let mut body = text;
    if candidate.starts_with('/') {
        end_tag = true;
    } else if candidate.ends_with('/') {
        empty_element = true;
    } else if let Some(rest) = text.strip_suffix('/') {
        // `<input type="x" />`: the slash is detached from the name.
        empty_element = true;
        body = rest.trim_end();
    }

    let remainder = body.replacen(name, "", 1);
    let mut rest = remainder.trim();
    if candidate.len() > name.len() {
        // The flag slashes sat next to the name.
        rest = rest.trim_start_matches('/').trim_start();
    }
    if let Some(head) = rest.strip_suffix('/')
        && (head.is_empty() || head.ends_with(char::is_whitespace))
    {
        // A detached flag slash, as in `<a/ />` or `</a />`.
        rest = head.trim_end();
    }

    let token = Token::tag(name, end_tag, empty_element);
    Ok(if rest.is_empty() {
        token
    } else {
        token.with_attributes(attributes(rest, options)?)
    })
}

fn attributes(text: &str, options: &TokenizerOptions) -> Result<Vec<Attribute>, TokenizeError> {
    let mut parser = KeyValuePairParser::from_markup(text);
    assemble(&mut parser, options.attribute_errors)
}

/// Trim, drop `start` and `end` where present, trim again.
fn strip<'a>(chunk: &'a str, start: &str, end: &str) -> &'a str {
    let text = chunk.trim();
    let text = text.strip_prefix(start).unwrap_or(text);
    let text = text.strip_suffix(end).unwrap_or(text);
    text.trim()
}

/// Split trimmed text at its first whitespace run.
fn split_name(text: &str) -> (&str, Option<&str>) {
    match text.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim_start())),
        None => (text, None),
    }
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .is_some_and(|word| word.eq_ignore_ascii_case(keyword))
}
