//! WebIDL syntax: tokens, productions and the lossless tree

pub mod ast;
pub mod dialect;
pub mod error;
pub(crate) mod gecko;
pub(crate) mod grammar;
pub mod lexer;
pub mod registry;
pub mod token;
pub mod tokeniser;
pub mod writer;

pub use ast::{Definition, Item, Member, Root, Syntax};
pub use dialect::{Dialect, SourceTweak};
pub use error::{PResult, ParseError, ProductionError, WrongVariant};
pub use registry::{Extensions, Production, ProductionRegistry};
pub use token::{Token, TokenId, TokenKind};
pub use tokeniser::{Cursor, Tokeniser};
pub use writer::{Writer, write_node};

/// Parse a snippet with the baseline grammar, for splicing into a tree
///
/// The snippet must be consumed entirely. Its tokens lose their ids, since
/// ids only address tokens of the file a tree was parsed from.
pub(crate) fn parse_fragment<T: Syntax>(
    text: &str,
    production: Production<T>,
) -> Result<T, ParseError> {
    let extensions = Extensions::default();
    let mut t = Tokeniser::new(text, "<fragment>", &extensions);
    let mut node = production(&mut t)?.ok_or_else(|| t.error("Fragment did not match"))?;
    if !t.at_eof() {
        return Err(t.error("Unrecognised tokens").into_parse_error());
    }
    node.visit_tokens_mut(&mut |token| token.id = None);
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::extended::extended_attributes;

    #[test]
    fn test_fragment_tokens_have_no_ids() {
        let attrs = parse_fragment("[Exposed=Window]", extended_attributes).unwrap();
        let mut ids = Vec::new();
        attrs.visit_tokens(&mut |token| ids.push(token.id));
        assert_eq!(ids.len(), 5);
        assert!(ids.iter().all(Option::is_none));
        assert_eq!(write_node(&attrs), "[Exposed=Window]");
    }

    #[test]
    fn test_fragment_must_be_consumed() {
        let err = parse_fragment("[A] x", extended_attributes).unwrap_err();
        assert_eq!(err.message, "Unrecognised tokens");
        assert!(parse_fragment("x", extended_attributes).is_err());
    }
}
