use super::{Argument, Item, Member, Separated, Syntax, Type, Utf8StringRecord};
use crate::syntax::token::Token;

/// A top-level definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Interface(Interface),
    InterfaceMixin(InterfaceMixin),
    CallbackInterface(CallbackInterface),
    Namespace(Namespace),
    Dictionary(Dictionary),
    CallbackFunction(CallbackFunction),
    Enum(Enum),
    Typedef(Typedef),
    Includes(Includes),
    BodylessInterface(BodylessInterface),
    CallbackConstructor(CallbackConstructor),
    Utf8StringTypedef(Utf8StringTypedef),
}

macro_rules! each_definition {
    ($value:expr, $node:ident => $body:expr) => {
        match $value {
            Definition::Interface($node) => $body,
            Definition::InterfaceMixin($node) => $body,
            Definition::CallbackInterface($node) => $body,
            Definition::Namespace($node) => $body,
            Definition::Dictionary($node) => $body,
            Definition::CallbackFunction($node) => $body,
            Definition::Enum($node) => $body,
            Definition::Typedef($node) => $body,
            Definition::Includes($node) => $body,
            Definition::BodylessInterface($node) => $body,
            Definition::CallbackConstructor($node) => $body,
            Definition::Utf8StringTypedef($node) => $body,
        }
    };
}

impl Syntax for Definition {
    fn visit_tokens<'a>(&'a self, f: &mut dyn FnMut(&'a Token)) {
        each_definition!(self, node => node.visit_tokens(f))
    }

    fn visit_tokens_mut(&mut self, f: &mut dyn FnMut(&mut Token)) {
        each_definition!(self, node => node.visit_tokens_mut(f))
    }
}

impl Definition {
    pub fn kind(&self) -> &'static str {
        match self {
            Definition::Interface(_) => "interface",
            Definition::InterfaceMixin(_) => "interface mixin",
            Definition::CallbackInterface(_) => "callback interface",
            Definition::Namespace(_) => "namespace",
            Definition::Dictionary(_) => "dictionary",
            Definition::CallbackFunction(_) => "callback",
            Definition::Enum(_) => "enum",
            Definition::Typedef(_) => "typedef",
            Definition::Includes(_) => "includes",
            Definition::BodylessInterface(_) => "bodyless interface",
            Definition::CallbackConstructor(_) => "callback constructor",
            Definition::Utf8StringTypedef(_) => "utf8string typedef",
        }
    }

    /// Defined name; `includes` statements define none
    pub fn name(&self) -> Option<&str> {
        match self {
            Definition::Interface(node) => Some(node.body.name.value()),
            Definition::InterfaceMixin(node) => Some(node.body.name.value()),
            Definition::CallbackInterface(node) => Some(node.body.name.value()),
            Definition::Namespace(node) => Some(node.body.name.value()),
            Definition::Dictionary(node) => Some(node.body.name.value()),
            Definition::CallbackFunction(node) => Some(node.name.value()),
            Definition::Enum(node) => Some(node.name.value()),
            Definition::Typedef(node) => Some(node.name.value()),
            Definition::Includes(_) => None,
            Definition::BodylessInterface(node) => Some(node.name.value()),
            Definition::CallbackConstructor(node) => Some(node.name.value()),
            Definition::Utf8StringTypedef(node) => Some(node.name.value()),
        }
    }

    /// Token naming the definition, used to locate diagnostics
    pub fn name_token(&self) -> &Token {
        match self {
            Definition::Interface(node) => &node.body.name,
            Definition::InterfaceMixin(node) => &node.body.name,
            Definition::CallbackInterface(node) => &node.body.name,
            Definition::Namespace(node) => &node.body.name,
            Definition::Dictionary(node) => &node.body.name,
            Definition::CallbackFunction(node) => &node.name,
            Definition::Enum(node) => &node.name,
            Definition::Typedef(node) => &node.name,
            Definition::Includes(node) => &node.target,
            Definition::BodylessInterface(node) => &node.name,
            Definition::CallbackConstructor(node) => &node.name,
            Definition::Utf8StringTypedef(node) => &node.name,
        }
    }

    pub fn is_partial(&self) -> bool {
        match self {
            Definition::Interface(node) => node.partial.is_some(),
            Definition::InterfaceMixin(node) => node.partial.is_some(),
            Definition::Namespace(node) => node.partial.is_some(),
            Definition::Dictionary(node) => node.partial.is_some(),
            _ => false,
        }
    }

    pub fn container(&self) -> Option<&Container> {
        match self {
            Definition::Interface(node) => Some(&node.body),
            Definition::InterfaceMixin(node) => Some(&node.body),
            Definition::CallbackInterface(node) => Some(&node.body),
            Definition::Namespace(node) => Some(&node.body),
            Definition::Dictionary(node) => Some(&node.body),
            _ => None,
        }
    }

    pub fn container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Definition::Interface(node) => Some(&mut node.body),
            Definition::InterfaceMixin(node) => Some(&mut node.body),
            Definition::CallbackInterface(node) => Some(&mut node.body),
            Definition::Namespace(node) => Some(&mut node.body),
            Definition::Dictionary(node) => Some(&mut node.body),
            _ => None,
        }
    }

    /// Members of a container; empty for other definitions
    pub fn members(&self) -> &[Item<Member>] {
        match self.container() {
            Some(body) => &body.members,
            None => &[],
        }
    }

    /// Arguments of a callback function or callback constructor
    pub fn arguments(&self) -> Option<&Vec<Argument>> {
        match self {
            Definition::CallbackFunction(node) => Some(&node.arguments),
            Definition::CallbackConstructor(node) => Some(&node.arguments),
            _ => None,
        }
    }

    /// Own arguments and container members, borrowed together
    pub fn arguments_and_members_mut(&mut self) -> (Option<&mut Vec<Argument>>, &mut [Item<Member>]) {
        match self {
            Definition::CallbackFunction(node) => (Some(&mut node.arguments), &mut []),
            Definition::CallbackConstructor(node) => (Some(&mut node.arguments), &mut []),
            other => match other.container_mut() {
                Some(body) => (None, &mut body.members),
                None => (None, &mut []),
            },
        }
    }
}

/// Name, inheritance and body shared by every container definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: Token,
    pub inheritance: Option<Inheritance>,
    pub open: Token,
    pub members: Vec<Item<Member>>,
    pub close: Token,
    pub termination: Token,
}

impl_syntax!(Container {
    name,
    inheritance,
    open,
    members,
    close,
    termination
});

/// `: Parent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inheritance {
    pub colon: Token,
    pub name: Token,
}

impl_syntax!(Inheritance { colon, name });

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub partial: Option<Token>,
    pub base: Token,
    pub body: Container,
}

impl_syntax!(Interface { partial, base, body });

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceMixin {
    pub partial: Option<Token>,
    pub base: Token,
    pub mixin: Token,
    pub body: Container,
}

impl_syntax!(InterfaceMixin {
    partial,
    base,
    mixin,
    body
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackInterface {
    pub callback: Token,
    pub base: Token,
    pub body: Container,
}

impl_syntax!(CallbackInterface {
    callback,
    base,
    body
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub partial: Option<Token>,
    pub base: Token,
    pub body: Container,
}

impl_syntax!(Namespace { partial, base, body });

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    pub partial: Option<Token>,
    pub base: Token,
    pub body: Container,
}

impl_syntax!(Dictionary { partial, base, body });

/// `callback Name = ReturnType (args);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackFunction {
    pub base: Token,
    pub name: Token,
    pub assign: Token,
    pub return_type: Type,
    pub open: Token,
    pub arguments: Vec<Argument>,
    pub close: Token,
    pub termination: Token,
}

impl_syntax!(CallbackFunction {
    base,
    name,
    assign,
    return_type,
    open,
    arguments,
    close,
    termination
});

/// `enum Name { "a", "b" };`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub base: Token,
    pub name: Token,
    pub open: Token,
    pub values: Vec<Separated<Token>>,
    pub close: Token,
    pub termination: Token,
}

impl_syntax!(Enum {
    base,
    name,
    open,
    values,
    close,
    termination
});

/// `typedef Type Name;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typedef {
    pub base: Token,
    pub idl_type: Type,
    pub name: Token,
    pub termination: Token,
}

impl_syntax!(Typedef {
    base,
    idl_type,
    name,
    termination
});

/// `Target includes Mixin;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Includes {
    pub target: Token,
    pub includes: Token,
    pub mixin: Token,
    pub termination: Token,
}

impl_syntax!(Includes {
    target,
    includes,
    mixin,
    termination
});

/// `interface Name;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodylessInterface {
    pub base: Token,
    pub name: Token,
    pub termination: Token,
}

impl_syntax!(BodylessInterface {
    base,
    name,
    termination
});

/// `callback constructor Name = ReturnType (args);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackConstructor {
    pub callback: Token,
    pub constructor: Token,
    pub name: Token,
    pub assign: Token,
    pub return_type: Type,
    pub open: Token,
    pub arguments: Vec<Argument>,
    pub close: Token,
    pub termination: Token,
}

impl_syntax!(CallbackConstructor {
    callback,
    constructor,
    name,
    assign,
    return_type,
    open,
    arguments,
    close,
    termination
});

/// `typedef record<UTF8String, V> Name;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8StringTypedef {
    pub base: Token,
    pub idl_type: Utf8StringRecord,
    pub name: Token,
    pub termination: Token,
}

impl_syntax!(Utf8StringTypedef {
    base,
    idl_type,
    name,
    termination
});
