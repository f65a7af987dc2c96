use super::{Argument, Separated, Syntax};
use crate::syntax::token::Token;

/// `[A, B=c, D(long x)]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedAttributes {
    pub open: Token,
    pub items: Vec<Separated<ExtendedAttribute>>,
    pub close: Token,
}

impl_syntax!(ExtendedAttributes { open, items, close });

impl ExtendedAttributes {
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ExtendedAttribute> {
        self.iter().find(|attr| attr.name.value() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtendedAttribute> {
        self.items.iter().map(|s| &s.item)
    }

    /// Argument lists of `Name(args)` and `Name=Ident(args)` attributes
    pub fn argument_lists(&self) -> impl Iterator<Item = &[Argument]> {
        self.iter().filter_map(|attr| match &attr.params {
            Some(ExtendedAttributeParams::Arguments { arguments, .. }) => Some(arguments.as_slice()),
            _ => None,
        })
    }

    pub fn argument_lists_mut(&mut self) -> impl Iterator<Item = &mut Vec<Argument>> {
        self.items.iter_mut().filter_map(|s| match &mut s.item.params {
            Some(ExtendedAttributeParams::Arguments { arguments, .. }) => Some(arguments),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedAttribute {
    pub name: Token,
    pub assign: Option<Token>,
    /// Right-hand side value, `*`, or the identifier in `Name=Ident(args)`
    pub rhs: Option<Token>,
    pub params: Option<ExtendedAttributeParams>,
}

impl_syntax!(ExtendedAttribute {
    name,
    assign,
    rhs,
    params
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedAttributeParams {
    /// `Name=(a, b)`
    List {
        open: Token,
        items: Vec<Separated<Token>>,
        close: Token,
    },
    /// `Name(args)` or `Name=Ident(args)`
    Arguments {
        open: Token,
        arguments: Vec<Argument>,
        close: Token,
    },
}

impl Syntax for ExtendedAttributeParams {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        match self {
            ExtendedAttributeParams::List { open, items, close } => {
                open.visit_tokens(f);
                items.visit_tokens(f);
                close.visit_tokens(f);
            }
            ExtendedAttributeParams::Arguments {
                open,
                arguments,
                close,
            } => {
                open.visit_tokens(f);
                arguments.visit_tokens(f);
                close.visit_tokens(f);
            }
        }
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        match self {
            ExtendedAttributeParams::List { open, items, close } => {
                open.visit_tokens_mut(f);
                items.visit_tokens_mut(f);
                close.visit_tokens_mut(f);
            }
            ExtendedAttributeParams::Arguments {
                open,
                arguments,
                close,
            } => {
                open.visit_tokens_mut(f);
                arguments.visit_tokens_mut(f);
                close.visit_tokens_mut(f);
            }
        }
    }
}
