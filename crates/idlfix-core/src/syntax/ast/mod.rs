//! Lossless syntax tree
//!
//! Every node keeps the exact tokens it was parsed from, in named fields
//! declared in grammar order. Writing a node is nothing more than visiting
//! those tokens in order and emitting `trivia + raw` for each, which is why
//! an unmodified tree always writes back to its source byte for byte.
//!
//! The [`Syntax`] trait is the one capability all nodes share. Structs get it
//! from `impl_syntax!`, which lists fields in grammar order; enums implement it
//! by delegating to their variant.

use super::dialect::SourceTweak;
use super::token::{Token, TokenId};

/// A node that owns tokens
pub trait Syntax {
    /// Visit every token in source order
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token));

    /// Visit every token in source order, mutably
    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token));

    fn first_token(&self) -> Option<&Token> {
        let mut first = None;
        self.visit_tokens(&mut |token| {
            if first.is_none() {
                first = Some(token);
            }
        });
        first
    }

    /// Run `f` on the first token, if the node has any
    fn edit_first_token(&mut self, f: &mut dyn FnMut(&mut Token)) {
        let mut done = false;
        self.visit_tokens_mut(&mut |token| {
            if !done {
                done = true;
                f(token);
            }
        });
    }

    /// Run `f` on the token with `id`; returns whether it was found
    fn edit_token(&mut self, id: TokenId, f: &mut dyn FnMut(&mut Token)) -> bool {
        let mut found = false;
        self.visit_tokens_mut(&mut |token| {
            if !found && token.id == Some(id) {
                found = true;
                f(token);
            }
        });
        found
    }
}

/// Implement [`Syntax`] for a struct by listing its fields in grammar order
macro_rules! impl_syntax {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::syntax::ast::Syntax for $ty {
            fn visit_tokens<'a>(
                &'a self,
                f: &mut dyn FnMut(&'a $crate::syntax::token::Token),
            ) {
                $( $crate::syntax::ast::Syntax::visit_tokens(&self.$field, f); )*
            }

            fn visit_tokens_mut(
                &mut self,
                f: &mut dyn FnMut(&mut $crate::syntax::token::Token),
            ) {
                $( $crate::syntax::ast::Syntax::visit_tokens_mut(&mut self.$field, f); )*
            }
        }
    };
}

mod arguments;
mod definitions;
mod extended;
mod members;
mod types;

pub use arguments::{Argument, DefaultValue};
pub use definitions::{
    BodylessInterface, CallbackConstructor, CallbackFunction, CallbackInterface, Container,
    Definition, Dictionary, Enum, Includes, Inheritance, Interface, InterfaceMixin, Namespace,
    Typedef, Utf8StringTypedef,
};
pub use extended::{ExtendedAttribute, ExtendedAttributeParams, ExtendedAttributes};
pub use members::{Attribute, Constant, Constructor, Field, IterableLike, Member, Operation, Utf8StringField};
pub use types::{Type, TypeBody, Utf8StringRecord};

impl Syntax for Token {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        f(self);
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        f(self);
    }
}

impl<T: Syntax> Syntax for Option<T> {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        if let Some(inner) = self {
            inner.visit_tokens(f);
        }
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        if let Some(inner) = self {
            inner.visit_tokens_mut(f);
        }
    }
}

impl<T: Syntax> Syntax for Vec<T> {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        for item in self {
            item.visit_tokens(f);
        }
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        for item in self {
            item.visit_tokens_mut(f);
        }
    }
}

impl<T: Syntax> Syntax for Box<T> {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        (**self).visit_tokens(f);
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        (**self).visit_tokens_mut(f);
    }
}

/// A list element followed by its `,` or `or`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separated<T> {
    pub item: T,
    pub separator: Option<Token>,
}

impl<T: Syntax> Syntax for Separated<T> {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        self.item.visit_tokens(f);
        self.separator.visit_tokens(f);
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        self.item.visit_tokens_mut(f);
        self.separator.visit_tokens_mut(f);
    }
}

/// A definition or member with its extended-attribute prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    pub ext_attrs: Option<ExtendedAttributes>,
    pub node: T,
}

impl<T> Item<T> {
    pub fn has_ext_attr(&self, name: &str) -> bool {
        self.ext_attrs.as_ref().is_some_and(|attrs| attrs.contains(name))
    }
}

impl<T: Syntax> Syntax for Item<T> {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        self.ext_attrs.visit_tokens(f);
        self.node.visit_tokens(f);
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        self.ext_attrs.visit_tokens_mut(f);
        self.node.visit_tokens_mut(f);
    }
}

/// One parsed source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub source_name: String,
    pub definitions: Vec<Item<Definition>>,
    /// Holds the trivia after the last definition
    pub eof: Token,
    /// Tweaks applied before tokenising, undone by the writer
    pub tweaks: Vec<SourceTweak>,
}

impl_syntax!(Root { definitions, eof });

impl Root {
    /// Every argument list in the file, in source order
    ///
    /// Lists inside extended attributes (`[LegacyFactoryFunction=Image(long w)]`)
    /// are included.
    pub fn argument_lists(&self) -> Vec<&[Argument]> {
        let mut lists = Vec::new();
        for item in &self.definitions {
            lists.extend(item.ext_attrs.iter().flat_map(|attrs| attrs.argument_lists()));
            if let Some(arguments) = item.node.arguments() {
                lists.push(arguments.as_slice());
            }
            for member in item.node.members() {
                lists.extend(member.ext_attrs.iter().flat_map(|attrs| attrs.argument_lists()));
                if let Some(arguments) = member.node.arguments() {
                    lists.push(arguments.as_slice());
                }
            }
        }
        lists
    }

    /// Find the argument whose name token is `name`
    pub fn argument_mut(&mut self, name: TokenId) -> Option<&mut Argument> {
        for item in &mut self.definitions {
            if let Some(found) = find_attribute_argument(item.ext_attrs.as_mut(), name) {
                return Some(found);
            }
            let (own, members) = item.node.arguments_and_members_mut();
            if let Some(found) = own.and_then(|args| find_argument(args, name)) {
                return Some(found);
            }
            for member in members {
                if let Some(found) = find_attribute_argument(member.ext_attrs.as_mut(), name) {
                    return Some(found);
                }
                if let Some(found) = member.node.arguments_mut().and_then(|args| find_argument(args, name)) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Definitions named `name`, partials included
    pub fn definitions_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Item<Definition>> {
        self.definitions
            .iter()
            .filter(move |item| item.node.name() == Some(name))
    }
}

fn find_argument(arguments: &mut [Argument], name: TokenId) -> Option<&mut Argument> {
    arguments.iter_mut().find(|arg| arg.name.id == Some(name))
}

fn find_attribute_argument(
    attrs: Option<&mut ExtendedAttributes>,
    name: TokenId,
) -> Option<&mut Argument> {
    attrs?
        .argument_lists_mut()
        .find_map(|arguments| find_argument(arguments, name))
}
