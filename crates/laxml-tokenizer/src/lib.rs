//! Lenient streaming tokenizer for loose markup.
//!
//! # Scope
//!
//! This crate implements a two-stage pipeline:
//! - **Chunk scanner** ([`MarkupScanner`]) - splits a character stream into
//!   `<...>` runs and text spans, with one character of look-ahead
//! - **Chunk classifier** ([`Tokenizer`]) - turns each chunk into a typed
//!   [`Token`]: tag, comment, doctype, processing instruction or text
//! - **Attribute parser** ([`pairs`]) - a configurable key-value state machine
//!   handling quotes, escapes, inline comments and unterminated values
//!
//! Malformed input is never rejected. Unterminated comments, stray `<`
//! characters, missing quotes and bare attribute words all produce a
//! best-guess token. Only failures of the input source itself surface as
//! [`TokenizeError`].
//!
//! # Not Implemented
//!
//! - Entity and character reference resolution
//! - DTD or schema validation
//! - Tree construction (see the `laxml-tree` crate)
//!
//! ```
//! use laxml_tokenizer::{Attribute, TokenKind, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::from_markup(r#"<a href="/">home</a>"#);
//! let first = tokenizer.next_token().unwrap().unwrap();
//! assert_eq!(first.kind(), TokenKind::Tag);
//! assert!(first.has_attribute(&Attribute::new("href", "/")));
//! ```

/// Error type shared by every stage.
pub mod error;
/// Tokenizer configuration.
pub mod options;
/// Key-value pair parsing for attribute lists.
pub mod pairs;
/// UTF-8 character source with pushback.
pub mod reader;
/// Raw chunk scanner.
pub mod scanner;
/// Token model.
pub mod token;
/// Chunk classifier.
pub mod tokenizer;

pub use error::TokenizeError;
pub use options::TokenizerOptions;
pub use pairs::{AttributeErrorPolicy, CharClassConfig, DefaultConfig, KeyValuePairParser, RawPair, parse_attributes};
pub use scanner::MarkupScanner;
pub use token::{Attribute, Token, TokenData, TokenKind};
pub use tokenizer::{Tokenizer, classify};
