//! Property tests for the scanner and tokenizer.

use laxml_tokenizer::{MarkupScanner, TokenKind, Tokenizer};
use quickcheck_macros::quickcheck;

fn chunks(input: &str) -> Vec<String> {
    MarkupScanner::from_markup(input)
        .collect::<Result<Vec<_>, _>>()
        .expect("in-memory input cannot fail")
}

#[quickcheck]
fn text_without_markup_is_a_single_chunk(input: String) -> bool {
    let text = input.replace('<', "");
    let scanned = chunks(&text);
    if text.is_empty() {
        scanned.is_empty()
    } else {
        scanned == [text]
    }
}

#[quickcheck]
fn chunks_reassemble_the_input(input: String) -> bool {
    chunks(&input).concat() == input
}

#[quickcheck]
fn chunks_are_never_empty(input: String) -> bool {
    chunks(&input).iter().all(|chunk| !chunk.is_empty())
}

#[quickcheck]
fn every_chunk_becomes_one_token(input: String) -> bool {
    let tokens: Result<Vec<_>, _> = Tokenizer::from_markup(&input).collect();
    tokens.is_ok_and(|tokens| tokens.len() == chunks(&input).len())
}

#[quickcheck]
fn tag_names_never_carry_slashes(input: String) -> bool {
    Tokenizer::from_markup(&input)
        .filter_map(Result::ok)
        .filter(|token| token.kind() == TokenKind::Tag)
        .all(|token| {
            token
                .name()
                .is_none_or(|name| !name.starts_with('/') && !name.ends_with('/'))
        })
}
