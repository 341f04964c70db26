//! Integration tests for the key-value pair parser and attribute assembly.

use std::io::{self, Read};

use laxml_common::warning::has_warned;
use laxml_tokenizer::pairs::assemble;
use laxml_tokenizer::{
    Attribute, AttributeErrorPolicy, CharClassConfig, DefaultConfig, KeyValuePairParser, RawPair,
    TokenizeError, parse_attributes,
};
use pretty_assertions::assert_eq;

/// Helper to drain a parser over a string into raw pairs
fn raw_pairs(input: &str) -> Vec<RawPair> {
    KeyValuePairParser::from_markup(input)
        .collect::<Result<Vec<_>, _>>()
        .expect("in-memory input cannot fail")
}

fn named(name: &str, value: &str) -> RawPair {
    RawPair {
        name: Some(name.to_owned()),
        value: value.to_owned(),
    }
}

fn continuation(value: &str) -> RawPair {
    RawPair {
        name: None,
        value: value.to_owned(),
    }
}

#[test]
fn test_unquoted_pairs() {
    assert_eq!(raw_pairs("a=1 b=2"), [named("a", "1"), named("b", "2")]);
}

#[test]
fn test_whitespace_around_separator() {
    assert_eq!(
        raw_pairs("  lang =  'en'   dir= \"ltr\" "),
        [named("lang", "en"), named("dir", "ltr")]
    );
}

#[test]
fn test_quoted_value_keeps_whitespace_and_separators() {
    assert_eq!(
        raw_pairs("style=\"a = b; c\" x=y"),
        [named("style", "a = b; c"), named("x", "y")]
    );
}

#[test]
fn test_escaped_quotes() {
    assert_eq!(
        raw_pairs(r#"title="say \"hi\"""#),
        [named("title", "say \"hi\"")]
    );
}

#[test]
fn test_inline_comment_between_pairs() {
    assert_eq!(
        raw_pairs("a=1 /* note */ b=2"),
        [named("a", "1"), named("b", "2")]
    );
}

#[test]
fn test_inline_comment_inside_name() {
    assert_eq!(raw_pairs("na/*x*/me=v"), [named("name", "v")]);
}

#[test]
fn test_unterminated_comment_consumes_rest() {
    assert_eq!(raw_pairs("a=1 /* never closed b=2"), [named("a", "1")]);
}

#[test]
fn test_unterminated_quote_is_healed_with_first_character() {
    assert_eq!(raw_pairs("a=\"abc"), [named("a", "abca")]);
    assert_eq!(raw_pairs("a='x y"), [named("a", "x yx")]);
}

#[test]
fn test_bare_value_after_pair_is_continuation() {
    assert_eq!(
        raw_pairs("a=\"x\" \"y\""),
        [named("a", "x"), continuation("y")]
    );
}

#[test]
fn test_name_without_value() {
    assert_eq!(raw_pairs("a="), [named("a", "")]);
}

#[test]
fn test_blank_input_has_no_pairs() {
    assert!(raw_pairs("").is_empty());
    assert!(raw_pairs(" \t\r\n ").is_empty());
}

#[test]
fn test_end_of_input_is_sticky() {
    let mut parser = KeyValuePairParser::from_markup("k=v");
    assert_eq!(parser.next_pair().unwrap(), Some(named("k", "v")));
    assert_eq!(parser.next_pair().unwrap(), None);
    assert_eq!(parser.next_pair().unwrap(), None);
}

/// `name: value; ...` declarations, as found in inline styles.
struct DeclarationConfig;

impl CharClassConfig for DeclarationConfig {
    fn is_comment_start(&self, first: char, second: char) -> bool {
        first == '/' && second == '*'
    }

    fn is_comment_end(&self, first: char, second: char) -> bool {
        first == '*' && second == '/'
    }

    fn is_escape_char(&self, c: char) -> bool {
        c == '\\'
    }

    fn is_pair_end(&self, c: char) -> bool {
        c == ';'
    }

    fn is_separator(&self, c: char) -> bool {
        c == ':'
    }

    fn is_quote_start(&self, c: char) -> bool {
        matches!(c, '"' | '\'')
    }

    fn is_quote_end(&self, c: char) -> bool {
        matches!(c, '"' | '\'')
    }

    fn is_whitespace(&self, c: char) -> bool {
        c.is_whitespace()
    }

    fn skip_whitespace(&self) -> bool {
        true
    }
}

#[test]
fn test_custom_configuration() {
    let pairs: Vec<RawPair> = KeyValuePairParser::from_markup("color: red; margin : 0 auto")
        .with_config(DeclarationConfig)
        .map(Result::unwrap)
        .collect();
    assert_eq!(pairs, [named("color", "red"), named("margin", "0 auto")]);
}

#[test]
fn test_borrowed_configuration() {
    let config = DeclarationConfig;
    let mut parser = KeyValuePairParser::from_markup("font: 'a; b'; x: y").with_config(&config);
    assert_eq!(parser.next_pair().unwrap(), Some(named("font", "a; b")));
    assert_eq!(parser.next_pair().unwrap(), Some(named("x", "y")));
    assert_eq!(parser.next_pair().unwrap(), None);
}

/// Default classification with a switchable whitespace skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FillerConfig {
    skip: bool,
}

impl CharClassConfig for FillerConfig {
    fn is_comment_start(&self, first: char, second: char) -> bool {
        DefaultConfig.is_comment_start(first, second)
    }

    fn is_comment_end(&self, first: char, second: char) -> bool {
        DefaultConfig.is_comment_end(first, second)
    }

    fn is_escape_char(&self, c: char) -> bool {
        DefaultConfig.is_escape_char(c)
    }

    fn is_pair_end(&self, c: char) -> bool {
        DefaultConfig.is_pair_end(c)
    }

    fn is_separator(&self, c: char) -> bool {
        DefaultConfig.is_separator(c)
    }

    fn is_quote_start(&self, c: char) -> bool {
        DefaultConfig.is_quote_start(c)
    }

    fn is_quote_end(&self, c: char) -> bool {
        DefaultConfig.is_quote_end(c)
    }

    fn is_whitespace(&self, c: char) -> bool {
        DefaultConfig.is_whitespace(c)
    }

    fn skip_whitespace(&self) -> bool {
        self.skip
    }
}

#[test]
fn test_unskipped_whitespace_after_separator_ends_the_pair() {
    let pairs: Vec<RawPair> = KeyValuePairParser::from_markup(" a = b c=d")
        .with_config(FillerConfig { skip: false })
        .map(Result::unwrap)
        .collect();
    // The space after `=` is read as a terminator, leaving `b` to start the next name.
    assert_eq!(pairs, [named("a", ""), named("b c", "d")]);
}

#[test]
fn test_skipping_toggle_changes_later_pairs() {
    let unskipped: Vec<RawPair> = KeyValuePairParser::from_markup("a= b c= d")
        .with_config(FillerConfig { skip: false })
        .map(Result::unwrap)
        .collect();
    assert_eq!(
        unskipped,
        [named("a", ""), named("b c", ""), continuation("d")]
    );

    let skipped: Vec<RawPair> = KeyValuePairParser::from_markup("a= b c= d")
        .with_config(FillerConfig { skip: true })
        .map(Result::unwrap)
        .collect();
    assert_eq!(skipped, [named("a", "b"), named("c", "d")]);
}

#[test]
fn test_set_config_applies_from_the_next_pair() {
    let mut parser =
        KeyValuePairParser::from_markup("a= b c= d").with_config(FillerConfig { skip: false });
    assert_eq!(parser.next_pair().unwrap(), Some(named("a", "")));

    parser.set_config(FillerConfig { skip: true });
    assert_eq!(parser.config(), &FillerConfig { skip: true });
    assert_eq!(parser.next_pair().unwrap(), Some(named("b c", "d")));
    assert_eq!(parser.next_pair().unwrap(), None);

    parser.set_config(FillerConfig { skip: false });
    assert_eq!(parser.next_pair().unwrap(), None);
}

#[test]
fn test_assembly_merges_continuations() {
    assert_eq!(
        parse_attributes("id=main class=\"a\" 'b' \"c\""),
        [Attribute::new("id", "main"), Attribute::new("class", "a b c")]
    );
}

#[test]
fn test_bare_words_before_a_separator_join_the_name() {
    // Without a separator the terminator does not end a pair, so the bare
    // words run on until the next `=`.
    assert_eq!(
        parse_attributes("a=1 'b' id=main"),
        [Attribute::new("a", "1"), Attribute::new("b id", "main")]
    );
}

#[test]
fn test_assembly_leading_bare_word_is_shorthand() {
    assert_eq!(parse_attributes("disabled"), [Attribute::shorthand("disabled")]);
    assert_eq!(
        parse_attributes("\"quoted\" more"),
        [Attribute::new("quoted more", "quoted more")]
    );
}

/// Serves its bytes once, then fails every read.
struct FailingReader {
    data: &'static [u8],
    served: bool,
}

impl FailingReader {
    const fn new(data: &'static [u8]) -> Self {
        Self {
            data,
            served: false,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::other("attribute source unplugged"));
        }
        self.served = true;
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        Ok(n)
    }
}

#[test]
fn test_read_failure_degrades_to_fewer_attributes() {
    let mut parser = KeyValuePairParser::new(FailingReader::new(b"a=1 b=2"));
    let attributes = assemble(&mut parser, AttributeErrorPolicy::Degrade).unwrap();
    assert_eq!(attributes, [Attribute::new("a", "1")]);
    assert!(has_warned(
        "attributes",
        "dropping remaining attributes after read failure: \
         failed to read markup input: attribute source unplugged"
    ));
}

#[test]
fn test_read_failure_propagates_on_request() {
    let mut parser = KeyValuePairParser::new(FailingReader::new(b"a=1 b=2"));
    let err = assemble(&mut parser, AttributeErrorPolicy::Propagate).unwrap_err();
    assert!(matches!(err, TokenizeError::Io(_)));
}
