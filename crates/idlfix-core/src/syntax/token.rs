//! Tokens produced by the lexer
//!
//! A token owns the exact text it matched plus the trivia (whitespace and
//! comments) that preceded it, so writing `trivia + raw` for every token in
//! order reproduces the source.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Decimal,
    Integer,
    Identifier,
    String,
    /// Keywords and punctuation, matched by their text
    Inline,
    /// Any other single character
    Other,
    /// End of input; carries the trailing trivia
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Decimal => "decimal",
            TokenKind::Integer => "integer",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Inline => "inline",
            TokenKind::Other => "other",
            TokenKind::Eof => "eof",
        };
        f.write_str(name)
    }
}

/// Stable address of a lexed token within one file
///
/// Ids are assigned in stream order, so they also order tokens by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub usize);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A lexed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact matched text, including a leading `_` escape on identifiers
    pub raw: String,
    /// Whitespace and comments written before `raw`
    pub trivia: String,
    /// 1-based line on which `raw` starts
    pub line: u32,
    /// `None` for tokens synthesized by an autofix
    pub id: Option<TokenId>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        raw: impl Into<String>,
        trivia: impl Into<String>,
        line: u32,
        id: TokenId,
    ) -> Self {
        Self {
            kind,
            raw: raw.into(),
            trivia: trivia.into(),
            line,
            id: Some(id),
        }
    }

    /// Build a token that did not come from the source text
    pub fn synthetic(kind: TokenKind, raw: impl Into<String>, trivia: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            trivia: trivia.into(),
            line: 0,
            id: None,
        }
    }

    /// Semantic value: identifiers lose their leading `_` escape
    pub fn value(&self) -> &str {
        if self.kind == TokenKind::Identifier {
            self.raw.strip_prefix('_').unwrap_or(&self.raw)
        } else {
            &self.raw
        }
    }

    /// Whether this is the keyword or punctuation `text`
    pub fn is(&self, text: &str) -> bool {
        self.kind == TokenKind::Inline && self.raw == text
    }

    /// Replace the matched text, keeping trivia
    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
    }

    /// Length in bytes once written
    pub fn written_len(&self) -> usize {
        self.trivia.len() + self.raw.len()
    }
}
