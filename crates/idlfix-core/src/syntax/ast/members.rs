use super::{Argument, DefaultValue, Separated, Syntax, Type, Utf8StringRecord};
use crate::syntax::token::Token;

/// A member of an interface, mixin, callback interface, namespace or dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Constant(Constant),
    Constructor(Constructor),
    Attribute(Attribute),
    Operation(Operation),
    /// `legacycaller` followed by an operation; `special` holds the identifier
    LegacyCaller(Operation),
    IterableLike(IterableLike),
    Field(Field),
    Utf8StringField(Utf8StringField),
}

impl Syntax for Member {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        match self {
            Member::Constant(node) => node.visit_tokens(f),
            Member::Constructor(node) => node.visit_tokens(f),
            Member::Attribute(node) => node.visit_tokens(f),
            Member::Operation(node) | Member::LegacyCaller(node) => node.visit_tokens(f),
            Member::IterableLike(node) => node.visit_tokens(f),
            Member::Field(node) => node.visit_tokens(f),
            Member::Utf8StringField(node) => node.visit_tokens(f),
        }
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        match self {
            Member::Constant(node) => node.visit_tokens_mut(f),
            Member::Constructor(node) => node.visit_tokens_mut(f),
            Member::Attribute(node) => node.visit_tokens_mut(f),
            Member::Operation(node) | Member::LegacyCaller(node) => node.visit_tokens_mut(f),
            Member::IterableLike(node) => node.visit_tokens_mut(f),
            Member::Field(node) => node.visit_tokens_mut(f),
            Member::Utf8StringField(node) => node.visit_tokens_mut(f),
        }
    }
}

impl Member {
    pub fn kind(&self) -> &'static str {
        match self {
            Member::Constant(_) => "const",
            Member::Constructor(_) => "constructor",
            Member::Attribute(_) => "attribute",
            Member::Operation(_) => "operation",
            Member::LegacyCaller(_) => "legacycaller",
            Member::IterableLike(node) => node.kind(),
            Member::Field(_) => "field",
            Member::Utf8StringField(_) => "utf8string field",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Constant(node) => Some(node.name.value()),
            Member::Attribute(node) => Some(node.name.value()),
            Member::Operation(node) | Member::LegacyCaller(node) => {
                node.name.as_ref().map(Token::value)
            }
            Member::Field(node) => Some(node.name.value()),
            Member::Utf8StringField(node) => Some(node.name.value()),
            Member::Constructor(_) | Member::IterableLike(_) => None,
        }
    }

    pub fn arguments(&self) -> Option<&Vec<Argument>> {
        match self {
            Member::Constructor(node) => Some(&node.arguments),
            Member::Operation(node) | Member::LegacyCaller(node) => Some(&node.arguments),
            Member::IterableLike(node) => Some(&node.arguments),
            _ => None,
        }
    }

    pub fn arguments_mut(&mut self) -> Option<&mut Vec<Argument>> {
        match self {
            Member::Constructor(node) => Some(&mut node.arguments),
            Member::Operation(node) | Member::LegacyCaller(node) => Some(&mut node.arguments),
            Member::IterableLike(node) => Some(&mut node.arguments),
            _ => None,
        }
    }
}

/// `const long A = 1;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub base: Token,
    pub idl_type: Type,
    pub name: Token,
    pub assign: Token,
    pub value: Token,
    pub termination: Token,
}

impl_syntax!(Constant {
    base,
    idl_type,
    name,
    assign,
    value,
    termination
});

/// `constructor(long a);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub base: Token,
    pub open: Token,
    pub arguments: Vec<Argument>,
    pub close: Token,
    pub termination: Token,
}

impl_syntax!(Constructor {
    base,
    open,
    arguments,
    close,
    termination
});

/// `static readonly attribute long x;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// `static`, `stringifier` or `inherit`
    pub special: Option<Token>,
    pub readonly: Option<Token>,
    pub base: Token,
    pub idl_type: Type,
    pub name: Token,
    pub termination: Token,
}

impl_syntax!(Attribute {
    special,
    readonly,
    base,
    idl_type,
    name,
    termination
});

impl Attribute {
    pub fn is_readonly(&self) -> bool {
        self.readonly.is_some()
    }
}

/// A regular or special operation
///
/// A bare `stringifier;` has neither return type nor parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// `getter`, `setter`, `deleter`, `static`, `stringifier` or `legacycaller`
    pub special: Option<Token>,
    pub return_type: Option<Type>,
    pub name: Option<Token>,
    pub open: Option<Token>,
    pub arguments: Vec<Argument>,
    pub close: Option<Token>,
    pub termination: Token,
}

impl_syntax!(Operation {
    special,
    return_type,
    name,
    open,
    arguments,
    close,
    termination
});

/// `iterable<K, V>`, `async iterable<V>(args)`, `readonly maplike<K, V>`, `setlike<T>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterableLike {
    pub readonly: Option<Token>,
    pub asynchronous: Option<Token>,
    pub base: Token,
    pub open: Token,
    pub idl_types: Vec<Separated<Type>>,
    pub close: Token,
    pub args_open: Option<Token>,
    pub arguments: Vec<Argument>,
    pub args_close: Option<Token>,
    pub termination: Token,
}

impl_syntax!(IterableLike {
    readonly,
    asynchronous,
    base,
    open,
    idl_types,
    close,
    args_open,
    arguments,
    args_close,
    termination
});

impl IterableLike {
    pub fn kind(&self) -> &'static str {
        match self.base.raw.as_str() {
            "maplike" => "maplike",
            "setlike" => "setlike",
            _ => "iterable",
        }
    }
}

/// Dictionary member: `required long x;`, `long y = 0;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub required: Option<Token>,
    pub idl_type: Type,
    pub name: Token,
    pub default: Option<DefaultValue>,
    pub termination: Token,
}

impl_syntax!(Field {
    required,
    idl_type,
    name,
    default,
    termination
});

/// Dictionary member typed `record<UTF8String, V>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8StringField {
    pub required: Option<Token>,
    pub idl_type: Utf8StringRecord,
    pub name: Token,
    pub default: Option<DefaultValue>,
    pub termination: Token,
}

impl_syntax!(Utf8StringField {
    required,
    idl_type,
    name,
    default,
    termination
});
