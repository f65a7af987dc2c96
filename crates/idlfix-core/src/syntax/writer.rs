//! Serialize syntax nodes back to text

use super::ast::Syntax;
use super::token::Token;

/// Accumulates the text of visited tokens
#[derive(Debug, Default)]
pub struct Writer {
    output: String,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one token: its trivia, then its text
    pub fn token(&mut self, token: &Token) {
        self.output.push_str(&token.trivia);
        self.output.push_str(&token.raw);
    }

    /// Emit every token of `node` in grammar order
    pub fn node<S: Syntax + ?Sized>(&mut self, node: &S) {
        node.visit_tokens(&mut |token| self.token(token));
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Text of a node or a whole tree, with nothing added or dropped
pub fn write_node<S: Syntax + ?Sized>(node: &S) -> String {
    let mut writer = Writer::new();
    writer.node(node);
    writer.finish()
}
