//! Character classification for the key-value pair parser.
//!
//! The parser itself has no opinion on which characters quote, escape,
//! separate or terminate. It asks a [`CharClassConfig`], which is swapped as
//! a whole per parser instance.

/// Predicates the pair parser consults for every character it reads.
///
/// Implementations should be pure: the same characters always classify the
/// same way.
pub trait CharClassConfig {
    /// `first` followed by `second` opens a comment.
    fn is_comment_start(&self, first: char, second: char) -> bool;

    /// `first` followed by `second` closes a comment.
    fn is_comment_end(&self, first: char, second: char) -> bool;

    /// `c` escapes a directly following quote character.
    fn is_escape_char(&self, c: char) -> bool;

    /// `c` ends a pair once its name is known and no quote is open.
    fn is_pair_end(&self, c: char) -> bool;

    /// `c` separates a name from its value.
    fn is_separator(&self, c: char) -> bool;

    /// `c` opens quoted text.
    fn is_quote_start(&self, c: char) -> bool;

    /// `c` closes quoted text.
    fn is_quote_end(&self, c: char) -> bool;

    /// `c` is filler that may be skipped before names and values.
    fn is_whitespace(&self, c: char) -> bool;

    /// Whether filler is skipped at all.
    fn skip_whitespace(&self) -> bool;
}

/// Shell/C-like conventions: `name = "value"`, `\` escapes, `/* ... */` comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultConfig;

impl CharClassConfig for DefaultConfig {
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
        c.is_whitespace()
    }

    fn is_separator(&self, c: char) -> bool {
        c == '='
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

impl<C: CharClassConfig + ?Sized> CharClassConfig for &C {
    fn is_comment_start(&self, first: char, second: char) -> bool {
        (**self).is_comment_start(first, second)
    }

    fn is_comment_end(&self, first: char, second: char) -> bool {
        (**self).is_comment_end(first, second)
    }

    fn is_escape_char(&self, c: char) -> bool {
        (**self).is_escape_char(c)
    }

    fn is_pair_end(&self, c: char) -> bool {
        (**self).is_pair_end(c)
    }

    fn is_separator(&self, c: char) -> bool {
        (**self).is_separator(c)
    }

    fn is_quote_start(&self, c: char) -> bool {
        (**self).is_quote_start(c)
    }

    fn is_quote_end(&self, c: char) -> bool {
        (**self).is_quote_end(c)
    }

    fn is_whitespace(&self, c: char) -> bool {
        (**self).is_whitespace(c)
    }

    fn skip_whitespace(&self) -> bool {
        (**self).skip_whitespace()
    }
}
