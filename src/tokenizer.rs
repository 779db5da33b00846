use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::Word;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    Punctuation,
}

#[derive(Clone, Debug, Serialize)]
pub struct Token {
    /// Text of the token
    pub text: String,
    pub kind: TokenKind,
    /// Whitespace followed the token in the raw sentence. Punctuation glued to
    /// the next word (`"here"`) renders without a gap.
    pub space_after: bool,
}

impl Word for Token {
    fn text(&self) -> &str {
        &self.text
    }

    fn space_after(&self) -> bool {
        self.space_after
    }
}

// Only the text takes part in comparisons.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Token {}

#[derive(Debug)]
pub struct TokenParser<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> TokenParser<'a> {
    pub fn parse(text: &'a str) -> TokenParser<'a> {
        TokenParser {
            source: text,
            position: 0,
        }
    }

    fn followed_by_whitespace(&self) -> bool {
        self.source[self.position..]
            .chars()
            .next()
            .map(char::is_whitespace)
            .unwrap_or(false)
    }
}

#[derive(PartialEq, Debug)]
enum CharType {
    WhiteSpace,
    Detached,
    Word,
}

/// `-#$%^&_`~'` and anything else not listed here stay inside a word.
fn char_type(c: char) -> CharType {
    if c.is_whitespace() {
        CharType::WhiteSpace
    } else if matches!(
        c,
        '.' | ',' | '"' | '/' | '!' | '?' | '*' | '+' | ';' | ':' | '{' | '}' | '(' | ')' | '['
            | ']' | '='
    ) {
        CharType::Detached
    } else {
        CharType::Word
    }
}

impl<'a> Iterator for TokenParser<'a> {
    type Item = Token;
    fn next(&mut self) -> Option<Self::Item> {
        let rest_of_text = self.source.split_at(self.position).1;
        let skipped = rest_of_text
            .chars()
            .take_while(|x| char_type(*x) == CharType::WhiteSpace)
            .map(|x| x.len_utf8())
            .sum::<usize>();
        self.position += skipped;
        let rest_of_text = self.source.split_at(self.position).1;
        let first = rest_of_text.chars().next()?;
        let (len, kind) = if char_type(first) == CharType::Detached {
            (first.len_utf8(), TokenKind::Punctuation)
        } else {
            let len = rest_of_text
                .chars()
                .take_while(|x| char_type(*x) == CharType::Word)
                .map(|x| x.len_utf8())
                .sum::<usize>();
            (len, TokenKind::Word)
        };
        let text = rest_of_text[..len].to_string();
        self.position += len;
        Some(Token {
            text,
            kind,
            space_after: self.followed_by_whitespace(),
        })
    }
}

/// Splits a raw sentence into words and detached punctuation marks.
pub fn tokenize(raw: &str) -> Result<Vec<String>> {
    Ok(parse_sentence(raw, 0)?
        .into_iter()
        .map(|token| token.text)
        .collect())
}

/// Parses every sentence, failing on the first empty one.
pub fn tokenize_all<S: AsRef<str>>(raws: &[S]) -> Result<Vec<Vec<Token>>> {
    raws.iter()
        .enumerate()
        .map(|(index, raw)| parse_sentence(raw.as_ref(), index))
        .collect()
}

fn parse_sentence(raw: &str, index: usize) -> Result<Vec<Token>> {
    if raw.is_empty() {
        return Err(Error::InvalidInput {
            index,
            reason: "sentence must be a non-empty string".to_string(),
        });
    }
    Ok(TokenParser::parse(raw).collect())
}
