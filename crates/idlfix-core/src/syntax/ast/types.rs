use super::{ExtendedAttributes, Separated, Syntax};
use crate::syntax::token::Token;

/// A type in any position: attribute, argument, return, typedef, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub ext_attrs: Option<ExtendedAttributes>,
    pub body: TypeBody,
    pub nullable: Option<Token>,
}

impl_syntax!(Type { ext_attrs, body, nullable });

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBody {
    /// `long`, `unsigned long long`, `unrestricted double`, `DOMString`, `Foo`
    Single {
        prefix: Option<Token>,
        base: Token,
        postfix: Option<Token>,
    },
    /// `sequence<T>`, `FrozenArray<T>`, `ObservableArray<T>`, `Promise<T>`,
    /// `record<K, V>`
    Generic {
        base: Token,
        open: Token,
        subtypes: Vec<Separated<Type>>,
        close: Token,
    },
    /// `(A or B or C)`
    Union {
        open: Token,
        subtypes: Vec<Separated<Type>>,
        close: Token,
    },
    Utf8StringRecord(Utf8StringRecord),
}

impl Syntax for TypeBody {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        match self {
            TypeBody::Single {
                prefix,
                base,
                postfix,
            } => {
                prefix.visit_tokens(f);
                base.visit_tokens(f);
                postfix.visit_tokens(f);
            }
            TypeBody::Generic {
                base,
                open,
                subtypes,
                close,
            } => {
                base.visit_tokens(f);
                open.visit_tokens(f);
                subtypes.visit_tokens(f);
                close.visit_tokens(f);
            }
            TypeBody::Union {
                open,
                subtypes,
                close,
            } => {
                open.visit_tokens(f);
                subtypes.visit_tokens(f);
                close.visit_tokens(f);
            }
            TypeBody::Utf8StringRecord(record) => record.visit_tokens(f),
        }
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        match self {
            TypeBody::Single {
                prefix,
                base,
                postfix,
            } => {
                prefix.visit_tokens_mut(f);
                base.visit_tokens_mut(f);
                postfix.visit_tokens_mut(f);
            }
            TypeBody::Generic {
                base,
                open,
                subtypes,
                close,
            } => {
                base.visit_tokens_mut(f);
                open.visit_tokens_mut(f);
                subtypes.visit_tokens_mut(f);
                close.visit_tokens_mut(f);
            }
            TypeBody::Union {
                open,
                subtypes,
                close,
            } => {
                open.visit_tokens_mut(f);
                subtypes.visit_tokens_mut(f);
                close.visit_tokens_mut(f);
            }
            TypeBody::Utf8StringRecord(record) => record.visit_tokens_mut(f),
        }
    }
}

/// `record<UTF8String, V>`, with its own nullable suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8StringRecord {
    pub base: Token,
    pub open: Token,
    pub key: Token,
    pub comma: Token,
    pub value: Box<Type>,
    pub close: Token,
    pub nullable: Option<Token>,
}

impl_syntax!(Utf8StringRecord {
    base,
    open,
    key,
    comma,
    value,
    close,
    nullable
});

impl Type {
    pub fn is_nullable(&self) -> bool {
        self.nullable.is_some()
            || matches!(&self.body, TypeBody::Utf8StringRecord(record) if record.nullable.is_some())
    }

    /// Referenced name for a plain identifier type such as `Foo` in `Foo? bar`
    pub fn reference_name(&self) -> Option<&str> {
        match &self.body {
            TypeBody::Single {
                prefix: None,
                base,
                postfix: None,
            } if base.kind == crate::syntax::token::TokenKind::Identifier => Some(base.value()),
            _ => None,
        }
    }

    /// Members of a union type, empty for anything else
    pub fn union_members(&self) -> impl Iterator<Item = &Type> {
        let subtypes: &[Separated<Type>] = match &self.body {
            TypeBody::Union { subtypes, .. } => subtypes,
            _ => &[],
        };
        subtypes.iter().map(|s| &s.item)
    }

    /// Keyword or identifier naming the outermost type (`sequence`, `long`, `Foo`)
    pub fn base_name(&self) -> Option<&str> {
        match &self.body {
            TypeBody::Single { base, .. } | TypeBody::Generic { base, .. } => Some(base.value()),
            TypeBody::Utf8StringRecord(record) => Some(record.base.value()),
            TypeBody::Union { .. } => None,
        }
    }
}
