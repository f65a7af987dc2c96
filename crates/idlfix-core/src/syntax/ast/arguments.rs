use super::{ExtendedAttributes, Type};
use crate::syntax::token::Token;

/// One argument, including the `,` that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub ext_attrs: Option<ExtendedAttributes>,
    pub optional: Option<Token>,
    pub idl_type: Type,
    pub variadic: Option<Token>,
    pub name: Token,
    pub default: Option<DefaultValue>,
    pub separator: Option<Token>,
}

impl_syntax!(Argument {
    ext_attrs,
    optional,
    idl_type,
    variadic,
    name,
    default,
    separator
});

impl Argument {
    pub fn is_optional(&self) -> bool {
        self.optional.is_some()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }
}

/// `= value`; `[]` and `{}` keep their closing token in `close`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValue {
    pub assign: Token,
    pub value: Token,
    pub close: Option<Token>,
}

impl_syntax!(DefaultValue {
    assign,
    value,
    close
});
