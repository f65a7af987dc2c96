//! Ordered production lists and the top-level dispatch loop
//!
//! A [`ProductionRegistry`] is a baseline grammar plus whatever a dialect
//! registers on top of it:
//!
//! - top-level definition productions, tried before the baseline ones;
//! - fallbacks keyed by a [`WrongVariant`] tag, tried when an earlier
//!   production failed with that tag;
//! - [`Extensions`], extra member and type productions the baseline
//!   containers consult before their own lists.

use super::ast::{Definition, Item, Member, Root, Type};
use super::error::{PResult, ParseError, ProductionError, WrongVariant};
use super::grammar::definitions::DEFINITIONS;
use super::grammar::extended::extended_attributes;
use super::tokeniser::Tokeniser;

/// A parse function for one grammar alternative
///
/// Returns `Ok(None)` without consuming anything when the input does not
/// start with its leading token(s).
pub type Production<T> = fn(&mut Tokeniser<'_>) -> PResult<T>;

/// Extra productions grafted onto the baseline grammar
///
/// Each member list is prepended to the baseline list of the matching
/// container; `types` is tried before the baseline single types.
#[derive(Debug, Default)]
pub struct Extensions {
    pub interface: Vec<Production<Member>>,
    pub mixin: Vec<Production<Member>>,
    pub callback_interface: Vec<Production<Member>>,
    pub namespace: Vec<Production<Member>>,
    pub dictionary: Vec<Production<Member>>,
    pub types: Vec<Production<Type>>,
}

/// Baseline grammar plus dialect productions
#[derive(Debug, Default)]
pub struct ProductionRegistry {
    definitions: Vec<Production<Definition>>,
    fallbacks: Vec<(WrongVariant, Production<Definition>)>,
    extensions: Extensions,
}

impl ProductionRegistry {
    /// Registry for the baseline grammar alone
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level production, tried after those added before it and
    /// before every baseline production
    pub fn with_definition(mut self, production: Production<Definition>) -> Self {
        self.definitions.push(production);
        self
    }

    /// Add a production for input an earlier production rejected with `variant`
    pub fn with_fallback(mut self, variant: WrongVariant, production: Production<Definition>) -> Self {
        self.fallbacks.push((variant, production));
        self
    }

    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Parse a whole source into its definitions
    pub fn parse(&self, text: &str, source_name: &str) -> Result<Root, ParseError> {
        let mut t = Tokeniser::new(text, source_name, &self.extensions);
        let mut definitions = Vec::new();
        while let Some(item) = self.definition(&mut t)? {
            tracing::trace!(kind = item.node.kind(), name = ?item.node.name(), "matched definition");
            definitions.push(item);
        }
        let eof = t
            .consume_eof()
            .ok_or_else(|| t.error("Unrecognised tokens"))?;

        Ok(Root {
            source_name: source_name.to_string(),
            definitions,
            eof,
            tweaks: Vec::new(),
        })
    }

    fn handles(&self, variant: WrongVariant) -> bool {
        self.fallbacks.iter().any(|(tag, _)| *tag == variant)
    }

    /// One definition with its extended attributes
    fn definition(&self, t: &mut Tokeniser<'_>) -> PResult<Item<Definition>> {
        let ext_attrs = extended_attributes(t)?;
        let start = t.position();
        let mut deferred: Option<ProductionError> = None;

        for production in self.definitions.iter().chain(DEFINITIONS) {
            match production(t) {
                Ok(Some(node)) => return Ok(Some(Item { ext_attrs, node })),
                Ok(None) => {}
                Err(err) => match err.variant() {
                    Some(variant) if self.handles(variant) => {
                        t.unconsume(start);
                        if deferred.is_none() {
                            deferred = Some(err);
                        }
                    }
                    _ => return Err(err),
                },
            }
        }

        if let Some(err) = deferred {
            let fallbacks = self
                .fallbacks
                .iter()
                .filter(|(tag, _)| err.variant() == Some(*tag));
            for (_, production) in fallbacks {
                if let Some(node) = production(t)? {
                    return Ok(Some(Item { ext_attrs, node }));
                }
            }
            return Err(ProductionError::Syntax(err.into_parse_error()));
        }

        if ext_attrs.is_some() {
            return Err(t.error("Stray extended attributes"));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ast::BodylessInterface;
    use crate::syntax::token::TokenKind;
    use crate::syntax::writer::write_node;

    fn bodyless(t: &mut Tokeniser<'_>) -> PResult<Definition> {
        let start = t.position();
        let (Some(base), Some(name), Some(termination)) = (
            t.consume(&["interface"]),
            t.consume_kind(TokenKind::Identifier),
            t.consume(&[";"]),
        ) else {
            t.unconsume(start);
            return Ok(None);
        };
        Ok(Some(Definition::BodylessInterface(BodylessInterface {
            base,
            name,
            termination,
        })))
    }

    fn shadow_enum(t: &mut Tokeniser<'_>) -> PResult<Definition> {
        // Claims bare `enum Name;` declarations
        let start = t.position();
        let (Some(base), Some(name), Some(termination)) = (
            t.consume(&["enum"]),
            t.consume_kind(TokenKind::Identifier),
            t.consume(&[";"]),
        ) else {
            t.unconsume(start);
            return Ok(None);
        };
        Ok(Some(Definition::BodylessInterface(BodylessInterface {
            base,
            name,
            termination,
        })))
    }

    #[test]
    fn test_baseline_round_trip() {
        let source = "// header\n[Exposed=Window]\ninterface Foo {\n  attribute long x;\n};\n\n\
                      enum E { \"a\" };\n/* trailing */\n";
        let root = ProductionRegistry::new().parse(source, "Foo.webidl").unwrap();
        assert_eq!(root.definitions.len(), 2);
        assert!(root.definitions[0].has_ext_attr("Exposed"));
        assert_eq!(root.eof.trivia, "\n/* trailing */\n");
        assert_eq!(write_node(&root), source);
    }

    #[test]
    fn test_wrong_variant_without_fallback_is_a_syntax_error() {
        let err = ProductionRegistry::new()
            .parse("interface Foo;", "Foo.webidl")
            .unwrap_err();
        assert_eq!(err.message, "Bodyless interface");
        assert_eq!(err.source_name, "Foo.webidl");
    }

    #[test]
    fn test_fallback_handles_wrong_variant() {
        let registry = ProductionRegistry::new().with_fallback(WrongVariant::Bodyless, bodyless);
        let root = registry.parse("[Pref]\ninterface Foo;", "Foo.webidl").unwrap();
        assert_eq!(root.definitions[0].node.kind(), "bodyless interface");
        assert!(root.definitions[0].has_ext_attr("Pref"));
        assert_eq!(write_node(&root), "[Pref]\ninterface Foo;");
    }

    #[test]
    fn test_unmatched_fallback_reports_first_error() {
        let registry = ProductionRegistry::new().with_fallback(WrongVariant::Bodyless, bodyless);
        let err = registry.parse("interface Foo : Bar;", "Foo.webidl").unwrap_err();
        assert_eq!(err.message, "Bodyless interface");
    }

    #[test]
    fn test_dialect_definitions_come_first() {
        let registry = ProductionRegistry::new().with_definition(shadow_enum);
        let root = registry.parse("enum E;", "E.webidl").unwrap();
        assert_eq!(root.definitions[0].node.kind(), "bodyless interface");
        // Without a match the baseline still gets its turn
        let root = registry.parse("enum E { \"a\" };", "E.webidl").unwrap();
        assert_eq!(root.definitions[0].node.kind(), "enum");
    }

    #[test]
    fn test_root_errors() {
        let registry = ProductionRegistry::new();
        assert_eq!(
            registry.parse("[Exposed=Window]", "a.webidl").unwrap_err().message,
            "Stray extended attributes"
        );
        assert_eq!(
            registry.parse("interface A {};\n}", "a.webidl").unwrap_err().message,
            "Unrecognised tokens"
        );
    }

    #[test]
    fn test_empty_source() {
        let root = ProductionRegistry::new().parse("\n  // nothing\n", "a.webidl").unwrap();
        assert!(root.definitions.is_empty());
        assert_eq!(write_node(&root), "\n  // nothing\n");
    }
}
