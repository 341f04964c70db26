//! Attribute-list assembly on top of the pair parser.

use std::io::Read;

use laxml_common::warning::warn_once;
use serde::{Deserialize, Serialize};

use crate::error::TokenizeError;
use crate::token::Attribute;

use super::config::CharClassConfig;
use super::parser::KeyValuePairParser;

/// What to do when the attribute source fails mid-list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeErrorPolicy {
    /// Log the failure and keep the attributes parsed so far.
    ///
    /// The warning goes through [`warn_once`], so an identical failure later
    /// in the same process is not logged again until
    /// [`clear_warnings`](laxml_common::warning::clear_warnings) is called.
    #[default]
    Degrade,
    /// Return the failure to the caller.
    Propagate,
}

/// Drain `parser` into a list of attributes.
///
/// A continuation pair (no name) is appended to the previous attribute's
/// value after a single space. A continuation with nothing before it is a
/// bare word such as `disabled`, and becomes an attribute whose name and
/// value are both that word.
///
/// # Errors
///
/// Only with [`AttributeErrorPolicy::Propagate`]: the first failure reported
/// by the parser.
pub fn assemble<R: Read, C: CharClassConfig>(
    parser: &mut KeyValuePairParser<R, C>,
    policy: AttributeErrorPolicy,
) -> Result<Vec<Attribute>, TokenizeError> {
    let mut attributes: Vec<Attribute> = Vec::new();

    loop {
        let pair = match parser.next_pair() {
            Ok(Some(pair)) => pair,
            Ok(None) => break,
            Err(err) => match policy {
                AttributeErrorPolicy::Degrade => {
                    warn_once(
                        "attributes",
                        &format!("dropping remaining attributes after read failure: {err}"),
                    );
                    break;
                }
                AttributeErrorPolicy::Propagate => return Err(err),
            },
        };

        let attribute = match pair.name {
            Some(name) => Attribute::new(name, pair.value),
            None => match attributes.pop() {
                Some(last) => last.continued_by(&pair.value),
                None => Attribute::shorthand(pair.value),
            },
        };
        attributes.push(attribute);
    }

    Ok(attributes)
}

/// Parse an in-memory attribute list such as `href="/" class=nav`.
#[must_use]
pub fn parse_attributes(input: &str) -> Vec<Attribute> {
    let mut parser = KeyValuePairParser::from_markup(input);
    // In-memory UTF-8 cannot fail to read, so degrading never drops anything.
    assemble(&mut parser, AttributeErrorPolicy::Degrade).unwrap_or_default()
}
