//! Backtrackable token stream
//!
//! The whole input is lexed up front, so a [`Cursor`] is just an index and
//! rewinding is free. Productions read the stream through the `consume*`
//! family: a successful consume advances and hands back an owned token, a
//! failed one leaves the cursor where it was.

use super::error::{ParseError, ProductionError, WrongVariant};
use super::lexer::tokenise;
use super::registry::Extensions;
use super::token::{Token, TokenKind};

/// Number of preceding tokens quoted in a syntax error
const ERROR_CONTEXT_TOKENS: usize = 5;

/// Saved position in a [`Tokeniser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(usize);

/// Token stream shared by all productions parsing one source
#[derive(Debug)]
pub struct Tokeniser<'g> {
    tokens: Vec<Token>,
    position: usize,
    source_name: String,
    extensions: &'g Extensions,
}

impl<'g> Tokeniser<'g> {
    pub fn new(source: &str, source_name: impl Into<String>, extensions: &'g Extensions) -> Self {
        Self {
            tokens: tokenise(source),
            position: 0,
            source_name: source_name.into(),
            extensions,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Extension members and types registered by the dialect
    pub fn extensions(&self) -> &'g Extensions {
        self.extensions
    }

    pub fn position(&self) -> Cursor {
        Cursor(self.position)
    }

    /// Rewind to a position saved earlier
    pub fn unconsume(&mut self, cursor: Cursor) {
        debug_assert!(cursor.0 < self.tokens.len());
        self.position = cursor.0;
    }

    /// The token under the cursor; `Eof` once the input is exhausted
    pub fn current(&self) -> &Token {
        // The stream always ends with `Eof` and the cursor never passes it.
        &self.tokens[self.position]
    }

    pub fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Whether the current token is the keyword or punctuation `text`
    pub fn probe(&self, text: &str) -> bool {
        self.current().is(text)
    }

    pub fn probe_kind(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consume a keyword or punctuation token matching one of `candidates`
    pub fn consume(&mut self, candidates: &[&str]) -> Option<Token> {
        let current = self.current();
        if current.kind == TokenKind::Inline && candidates.contains(&current.raw.as_str()) {
            return Some(self.advance());
        }
        None
    }

    /// Consume any token of `kind`
    pub fn consume_kind(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current().kind == kind && kind != TokenKind::Eof {
            return Some(self.advance());
        }
        None
    }

    /// Consume the first matching kind out of `kinds`
    pub fn consume_kinds(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds.iter().find_map(|kind| self.consume_kind(*kind))
    }

    /// Consume an identifier whose unescaped value is `value`
    pub fn consume_identifier(&mut self, value: &str) -> Option<Token> {
        let current = self.current();
        if current.kind == TokenKind::Identifier && current.value() == value {
            return Some(self.advance());
        }
        None
    }

    /// Take the end-of-file token
    ///
    /// Returns `None` when tokens remain before it.
    pub fn consume_eof(&mut self) -> Option<Token> {
        self.at_eof().then(|| self.current().clone())
    }

    /// Build a committed syntax error at the current token
    pub fn error(&self, message: impl Into<String>) -> ProductionError {
        ProductionError::Syntax(self.parse_error(message))
    }

    /// Build an error that a production registered for `variant` may recover from
    pub fn wrong_variant(&self, variant: WrongVariant, message: impl Into<String>) -> ProductionError {
        ProductionError::WrongVariant(variant, self.parse_error(message))
    }

    fn parse_error(&self, message: impl Into<String>) -> ParseError {
        let start = self.position.saturating_sub(ERROR_CONTEXT_TOKENS);
        let context: String = self.tokens[start..self.position]
            .iter()
            .map(|t| format!("{}{}", t.trivia, t.raw))
            .collect();
        let context = context
            .trim_start()
            .lines()
            .last()
            .unwrap_or_default()
            .to_string();

        ParseError::new(
            self.source_name.clone(),
            self.current().line,
            message,
            context,
        )
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokeniser<'g>(source: &str, extensions: &'g Extensions) -> Tokeniser<'g> {
        Tokeniser::new(source, "test.webidl", extensions)
    }

    #[test]
    fn test_failed_consume_does_not_advance() {
        let extensions = Extensions::default();
        let mut t = tokeniser("interface Foo;", &extensions);
        let before = t.position();
        assert!(t.consume(&["dictionary", "enum"]).is_none());
        assert!(t.consume_kind(TokenKind::Identifier).is_none());
        assert_eq!(t.position(), before);
    }

    #[test]
    fn test_unconsume_replays_identical_tokens() {
        let extensions = Extensions::default();
        let mut t = tokeniser("callback constructor Ctor", &extensions);
        let start = t.position();
        let first: Vec<_> = (0..3).filter_map(|_| t.consume_kinds(&[TokenKind::Inline, TokenKind::Identifier])).collect();
        t.unconsume(start);
        let second: Vec<_> = (0..3).filter_map(|_| t.consume_kinds(&[TokenKind::Inline, TokenKind::Identifier])).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_consume_identifier_checks_value() {
        let extensions = Extensions::default();
        let mut t = tokeniser("legacycaller", &extensions);
        assert!(t.consume_identifier("getter").is_none());
        assert!(t.consume_identifier("legacycaller").is_some());
        assert!(t.at_eof());
    }

    #[test]
    fn test_eof_is_never_passed() {
        let extensions = Extensions::default();
        let mut t = tokeniser("  ", &extensions);
        assert!(t.consume_kind(TokenKind::Eof).is_none());
        let eof = t.consume_eof().unwrap();
        assert_eq!(eof.trivia, "  ");
    }

    #[test]
    fn test_error_reports_line_and_context() {
        let extensions = Extensions::default();
        let mut t = tokeniser("interface Foo\n{\n  bogus", &extensions);
        t.consume(&["interface"]);
        t.consume_kind(TokenKind::Identifier);
        t.consume(&["{"]);
        let err = t.error("Unknown member").into_parse_error();
        assert_eq!(err.line, 3);
        assert_eq!(err.source_name, "test.webidl");
        assert_eq!(err.context, "{");
    }
}
