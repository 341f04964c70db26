//! Token model.
//!
//! Every chunk classifies into exactly one [`TokenKind`]. A [`Token`] holds
//! the name and attributes shared by all kinds plus a [`TokenData`] with the
//! fields only one kind carries. Tokens are flat: nesting is the business of
//! whoever consumes them (see the `laxml-tree` crate).

use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::error::TokenizeError;

/// External identifier used when a doctype does not name one.
pub const XHTML_TRANSITIONAL_EXTERNAL_ID: &str = "PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\"";

/// Root element name used when a doctype does not name one.
pub const DEFAULT_ROOT_ELEMENT: &str = "html";

/// A `name="value"` pair on a tag or processing instruction.
///
/// Two attributes are equal iff name and value match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Create an attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A bare word such as `selected`, stored as `selected="selected"`.
    #[must_use]
    pub fn shorthand(word: impl Into<String>) -> Self {
        let name = word.into();
        let value = name.clone();
        Self { name, value }
    }

    /// The attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute value, quotes removed.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// This attribute with `more` appended to its value after one space.
    #[must_use]
    pub fn continued_by(&self, more: &str) -> Self {
        Self {
            name: self.name.clone(),
            value: format!("{} {more}", self.value),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.name, self.value)
    }
}

/// The five token kinds, fixed when a token is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// `<name ...>`, `</name>` or `<name/>`.
    Tag,
    /// `<!-- ... -->`
    Comment,
    /// `<!DOCTYPE ...>` and any other `<!` declaration.
    Doctype,
    /// `<?name ...?>`
    ProcessingInstruction,
    /// Everything between markup runs.
    Text,
}

/// Fields specific to one token kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenData {
    /// Element tag flags. An end tag is never also marked empty by the
    /// tokenizer, but nothing here forbids it.
    Tag {
        /// Written as `</name>`.
        end_tag: bool,
        /// Written as `<name/>` or `<name ... />`.
        empty_element: bool,
    },
    /// Comment body, trimmed.
    Comment {
        /// The text between the delimiters.
        text: String,
    },
    /// Document type declaration.
    Doctype {
        /// Root element name, `html` unless the declaration names another.
        root_element: String,
        /// `PUBLIC ...` or `SYSTEM ...` identifier as written.
        external_id: String,
    },
    /// Processing instruction; name and attributes live on the [`Token`].
    ProcessingInstruction,
    /// Raw text, untrimmed.
    Text {
        /// The chunk exactly as scanned.
        text: String,
    },
}

/// A classified chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    name: Option<String>,
    attributes: Vec<Attribute>,
    #[serde(flatten)]
    data: TokenData,
}

impl Token {
    const fn with_data(name: Option<String>, data: TokenData) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            data,
        }
    }

    /// An element tag. `name` must already be stripped of `/` markers.
    #[must_use]
    pub fn tag(name: impl Into<String>, end_tag: bool, empty_element: bool) -> Self {
        Self::with_data(
            non_empty(name.into()),
            TokenData::Tag {
                end_tag,
                empty_element,
            },
        )
    }

    /// A comment; surrounding whitespace is trimmed.
    #[must_use]
    pub fn comment(text: &str) -> Self {
        Self::with_data(
            None,
            TokenData::Comment {
                text: text.trim().to_owned(),
            },
        )
    }

    /// A doctype with both fields already resolved.
    #[must_use]
    pub fn doctype(root_element: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self::with_data(
            None,
            TokenData::Doctype {
                root_element: root_element.into(),
                external_id: external_id.into(),
            },
        )
    }

    /// A processing instruction such as `<?xml ...?>`.
    #[must_use]
    pub fn processing_instruction(name: impl Into<String>) -> Self {
        Self::with_data(non_empty(name.into()), TokenData::ProcessingInstruction)
    }

    /// A text run, kept verbatim.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_data(None, TokenData::Text { text: text.into() })
    }

    /// This token with `attributes` appended.
    #[must_use]
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// The kind this token was created as.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self.data {
            TokenData::Tag { .. } => TokenKind::Tag,
            TokenData::Comment { .. } => TokenKind::Comment,
            TokenData::Doctype { .. } => TokenKind::Doctype,
            TokenData::ProcessingInstruction => TokenKind::ProcessingInstruction,
            TokenData::Text { .. } => TokenKind::Text,
        }
    }

    /// Kind-specific fields.
    #[must_use]
    pub const fn data(&self) -> &TokenData {
        &self.data
    }

    /// Tag or processing-instruction name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rename a tag, processing instruction or doctype.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::WrongKind`] for comments and text.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TokenizeError> {
        match self.kind() {
            TokenKind::Tag | TokenKind::ProcessingInstruction | TokenKind::Doctype => {
                self.name = non_empty(name.into());
                Ok(())
            }
            kind => Err(TokenizeError::WrongKind {
                operation: "set a name",
                kind,
            }),
        }
    }

    /// Attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(Attribute::value)
    }

    /// Returns true if an identical attribute is present.
    #[must_use]
    pub fn has_attribute(&self, attribute: &Attribute) -> bool {
        self.attributes.contains(attribute)
    }

    /// Append an attribute.
    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// `</name>`
    #[must_use]
    pub const fn is_end_tag(&self) -> bool {
        matches!(self.data, TokenData::Tag { end_tag: true, .. })
    }

    /// `<name/>` or `<name ... />`
    #[must_use]
    pub const fn is_empty_element(&self) -> bool {
        matches!(
            self.data,
            TokenData::Tag {
                empty_element: true,
                ..
            }
        )
    }

    /// A tag that opens an element: neither an end tag nor empty.
    #[must_use]
    pub const fn is_start_tag(&self) -> bool {
        matches!(
            self.data,
            TokenData::Tag {
                end_tag: false,
                empty_element: false
            }
        )
    }

    /// Comment text, for comments.
    #[must_use]
    pub fn comment_text(&self) -> Option<&str> {
        match &self.data {
            TokenData::Comment { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Replace the comment text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::WrongKind`] if this is not a comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> Result<(), TokenizeError> {
        let kind = self.kind();
        match &mut self.data {
            TokenData::Comment { text } => {
                *text = comment.into();
                Ok(())
            }
            _ => Err(TokenizeError::WrongKind {
                operation: "set comment text",
                kind,
            }),
        }
    }

    /// Raw text, for text tokens.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.data {
            TokenData::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Doctype root element name.
    #[must_use]
    pub fn root_element_name(&self) -> Option<&str> {
        match &self.data {
            TokenData::Doctype { root_element, .. } => Some(root_element.as_str()),
            _ => None,
        }
    }

    /// Doctype external identifier.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        match &self.data {
            TokenData::Doctype { external_id, .. } => Some(external_id.as_str()),
            _ => None,
        }
    }
}

fn non_empty(name: String) -> Option<String> {
    if name.is_empty() { None } else { Some(name) }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or_default();
        match &self.data {
            TokenData::Tag {
                end_tag,
                empty_element,
            } => {
                write!(f, "<")?;
                if *end_tag {
                    write!(f, "/")?;
                }
                write!(f, "{name}")?;
                for attr in &self.attributes {
                    write!(f, " {attr}")?;
                }
                if *empty_element {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            TokenData::ProcessingInstruction => {
                write!(f, "<?{name}")?;
                for attr in &self.attributes {
                    write!(f, " {attr}")?;
                }
                write!(f, "?>")
            }
            TokenData::Comment { text } => write!(f, "<!-- {text} -->"),
            TokenData::Doctype {
                root_element,
                external_id,
            } => write!(f, "<!DOCTYPE {root_element} {external_id}>"),
            TokenData::Text { text } => write!(f, "{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_display_round_trips_flags() {
        let token = Token::tag("input", false, true).with_attributes([Attribute::new("type", "text")]);
        assert_eq!(token.to_string(), "<input type=\"text\" />");
        assert_eq!(Token::tag("p", true, false).to_string(), "</p>");
    }

    #[test]
    fn setters_reject_the_wrong_kind() {
        let mut text = Token::text("hello");
        assert!(matches!(
            text.set_name("x"),
            Err(TokenizeError::WrongKind {
                kind: TokenKind::Text,
                ..
            })
        ));
        assert!(text.set_comment("x").is_err());

        let mut comment = Token::comment("  note  ");
        assert_eq!(comment.comment_text(), Some("note"));
        comment.set_comment("  kept as is ").unwrap();
        assert_eq!(comment.comment_text(), Some("  kept as is "));
    }

    #[test]
    fn kind_names_parse_case_insensitively() {
        assert_eq!(
            "processing_instruction".parse::<TokenKind>().unwrap(),
            TokenKind::ProcessingInstruction
        );
        assert_eq!(TokenKind::Doctype.to_string(), "DOCTYPE");
    }

    #[test]
    fn continuation_joins_with_one_space() {
        let attr = Attribute::new("class", "a").continued_by("b");
        assert_eq!(attr, Attribute::new("class", "a b"));
        assert_eq!(Attribute::shorthand("checked").value(), "checked");
    }
}
