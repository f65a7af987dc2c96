//! Tree mutations attached to diagnostics
//!
//! An [`Autofix`] is data, not a closure: it names its target by token id or
//! definition index, both of which stay valid while other fixes insert or
//! replace tokens elsewhere in the tree. Inserted tokens come from
//! [`parse_fragment`] and carry no id, so they can never be targeted.

use serde::{Deserialize, Serialize};

use crate::error::IdlfixError;
use crate::result::Result;
use crate::syntax::ast::{Argument, Root, Separated, Syntax};
use crate::syntax::grammar::arguments::default_value;
use crate::syntax::grammar::extended::{extended_attribute, extended_attributes};
use crate::syntax::{Token, TokenId, TokenKind, parse_fragment};

/// One mutation of a parsed tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Autofix {
    /// Replace a token's text, keeping its trivia
    ReplaceToken { token: TokenId, text: String },

    /// Add an extended attribute such as `Exposed=Window` to a top-level
    /// definition, creating the `[...]` list when there is none
    AddExtendedAttribute { definition: usize, attribute: String },

    /// Insert `optional` before the argument's type and add `default`
    ///
    /// The argument is addressed by its name token.
    MakeArgumentOptional { argument: TokenId, default: String },

    /// Add `default` (e.g. ` = {}`) to an optional argument
    AddDefault { argument: TokenId, default: String },
}

impl Autofix {
    /// Short human-readable summary
    pub fn description(&self) -> String {
        match self {
            Autofix::ReplaceToken { text, .. } => format!("replace with `{text}`"),
            Autofix::AddExtendedAttribute { attribute, .. } => format!("add [{attribute}]"),
            Autofix::MakeArgumentOptional { default, .. } => {
                format!("make optional with default `{}`", default.trim())
            }
            Autofix::AddDefault { default, .. } => format!("add default `{}`", default.trim()),
        }
    }

    /// Apply the mutation to `root`
    ///
    /// Fails when the target no longer exists or already has what the fix
    /// would add; the tree is left untouched in that case.
    pub fn apply(&self, root: &mut Root) -> Result<()> {
        match self {
            Autofix::ReplaceToken { token, text } => {
                let found = root.edit_token(*token, &mut |target| target.set_raw(text.as_str()));
                if !found {
                    return Err(IdlfixError::autofix_error(format!("token {token} not found")));
                }
                Ok(())
            }
            Autofix::AddExtendedAttribute {
                definition,
                attribute,
            } => add_extended_attribute(root, *definition, attribute),
            Autofix::MakeArgumentOptional { argument, default } => {
                let target = find_argument(root, *argument)?;
                if target.optional.is_some() {
                    return Err(IdlfixError::autofix_error(format!(
                        "argument {} is already optional",
                        target.name.value()
                    )));
                }
                let default = parse_fragment(default, default_value)?;
                make_optional(target);
                target.default = Some(default);
                Ok(())
            }
            Autofix::AddDefault { argument, default } => {
                let target = find_argument(root, *argument)?;
                if target.default.is_some() {
                    return Err(IdlfixError::autofix_error(format!(
                        "argument {} already has a default",
                        target.name.value()
                    )));
                }
                target.default = Some(parse_fragment(default, default_value)?);
                Ok(())
            }
        }
    }
}

fn find_argument(root: &mut Root, name: TokenId) -> Result<&mut Argument> {
    root.argument_mut(name)
        .ok_or_else(|| IdlfixError::autofix_error(format!("argument {name} not found")))
}

/// `Dict dict` becomes `optional Dict dict`; the keyword takes over the
/// type's leading trivia
fn make_optional(argument: &mut Argument) {
    let mut trivia = String::new();
    argument
        .idl_type
        .edit_first_token(&mut |token| trivia = std::mem::replace(&mut token.trivia, " ".to_string()));
    argument.optional = Some(Token::synthetic(TokenKind::Inline, "optional", trivia));
}

fn add_extended_attribute(root: &mut Root, definition: usize, attribute: &str) -> Result<()> {
    let item = root.definitions.get_mut(definition).ok_or_else(|| {
        IdlfixError::autofix_error(format!("no definition at index {definition}"))
    })?;

    match &mut item.ext_attrs {
        Some(attrs) => {
            let added = parse_fragment(attribute, extended_attribute)?;
            if let Some(existing) = attrs.items.first_mut()
                && !existing.item.name.trivia.starts_with(char::is_whitespace)
            {
                existing.item.name.trivia.insert(0, ' ');
            }
            attrs.items.insert(
                0,
                Separated {
                    item: added,
                    separator: Some(Token::synthetic(TokenKind::Inline, ",", "")),
                },
            );
        }
        None => {
            // The new list sits where the definition started; the definition
            // moves to the next line.
            let mut attrs = parse_fragment(&format!("[{attribute}]"), extended_attributes)?;
            let mut trivia = String::new();
            item.node.edit_first_token(&mut |token| {
                trivia = std::mem::replace(&mut token.trivia, "\n".to_string());
            });
            attrs.open.trivia = trivia;
            item.ext_attrs = Some(attrs);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, write};

    fn token_id(root: &Root, raw: &str) -> TokenId {
        let mut found = None;
        root.visit_tokens(&mut |token| {
            if found.is_none() && token.raw == raw {
                found = token.id;
            }
        });
        found.unwrap_or_else(|| panic!("no token {raw:?}"))
    }

    #[test]
    fn test_replace_token_keeps_trivia() {
        let mut root = parse("interface A {\n  void f();\n};\n", "A.webidl").unwrap();
        let fix = Autofix::ReplaceToken {
            token: token_id(&root, "void"),
            text: "undefined".to_string(),
        };
        fix.apply(&mut root).unwrap();
        assert_eq!(write(&root), "interface A {\n  undefined f();\n};\n");
    }

    #[test]
    fn test_add_extended_attribute_to_bare_definition() {
        let mut root = parse("// A\n\ninterface A {};", "A.webidl").unwrap();
        let fix = Autofix::AddExtendedAttribute {
            definition: 0,
            attribute: "Exposed=Window".to_string(),
        };
        fix.apply(&mut root).unwrap();
        insta::assert_snapshot!(write(&root), @r"
        // A

        [Exposed=Window]
        interface A {};
        ");
    }

    #[test]
    fn test_add_extended_attribute_to_existing_list() {
        let mut root = parse("[Pref=\"x\"]\ninterface A {};", "A.webidl").unwrap();
        Autofix::AddExtendedAttribute {
            definition: 0,
            attribute: "Exposed=Window".to_string(),
        }
        .apply(&mut root)
        .unwrap();
        assert_eq!(write(&root), "[Exposed=Window, Pref=\"x\"]\ninterface A {};");
        assert!(root.definitions[0].has_ext_attr("Exposed"));
    }

    #[test]
    fn test_make_argument_optional() {
        let mut root =
            parse("dictionary D {};\ninterface A { undefined f(D  dict); };", "A.webidl").unwrap();
        let fix = Autofix::MakeArgumentOptional {
            argument: token_id(&root, "dict"),
            default: " = {}".to_string(),
        };
        fix.apply(&mut root).unwrap();
        assert_eq!(
            write(&root),
            "dictionary D {};\ninterface A { undefined f(optional D  dict = {}); };"
        );
        // A second application has nothing left to do
        assert!(fix.apply(&mut root).is_err());
    }

    #[test]
    fn test_add_default() {
        let mut root =
            parse("interface A { undefined f(optional D d, long x); };", "A.webidl").unwrap();
        let fix = Autofix::AddDefault {
            argument: token_id(&root, "d"),
            default: " = {}".to_string(),
        };
        fix.apply(&mut root).unwrap();
        assert_eq!(
            write(&root),
            "interface A { undefined f(optional D d = {}, long x); };"
        );
    }

    #[test]
    fn test_missing_targets_fail() {
        let mut root = parse("interface A {};", "A.webidl").unwrap();
        let fix = Autofix::ReplaceToken {
            token: TokenId(999),
            text: "x".to_string(),
        };
        assert!(fix.apply(&mut root).is_err());
        let fix = Autofix::AddExtendedAttribute {
            definition: 3,
            attribute: "Exposed=Window".to_string(),
        };
        assert!(fix.apply(&mut root).is_err());
        assert_eq!(write(&root), "interface A {};");
    }
}
