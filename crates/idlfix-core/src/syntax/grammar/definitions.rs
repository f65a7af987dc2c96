//! Top-level definitions and the shared container algorithm
//!
//! Every container (interface, mixin, callback interface, namespace,
//! dictionary) is parsed by [`container`] with a priority-ordered member list.
//! The dialect's extension members for that container kind are tried first,
//! then the baseline list.

use super::arguments::argument_list;
use super::extended::extended_attributes;
use super::members::{
    attribute, constant, constructor, field, iterable_like, mixin_attribute, namespace_attribute,
    operation, regular_operation, static_member, stringifier,
};
use super::separated_list;
use super::types::{idl_type, return_type};
use crate::syntax::ast::{
    CallbackFunction, CallbackInterface, Container, Definition, Dictionary, Enum, Includes,
    Inheritance, Interface, InterfaceMixin, Item, Member, Namespace, Typedef,
};
use crate::syntax::error::{PResult, ProductionError, WrongVariant};
use crate::syntax::registry::Production;
use crate::syntax::token::{Token, TokenKind};
use crate::syntax::tokeniser::Tokeniser;

/// Baseline top-level productions, in the order they are tried
pub(crate) const DEFINITIONS: &[Production<Definition>] = &[
    callback,
    interface,
    partial,
    dictionary,
    enumeration,
    typedef,
    includes,
    namespace,
];

pub(crate) const INTERFACE_MEMBERS: &[Production<Member>] = &[
    constant,
    constructor,
    static_member,
    stringifier,
    iterable_like,
    attribute,
    operation,
];

pub(crate) const MIXIN_MEMBERS: &[Production<Member>] =
    &[constant, stringifier, mixin_attribute, regular_operation];

pub(crate) const CALLBACK_INTERFACE_MEMBERS: &[Production<Member>] = &[constant, regular_operation];

pub(crate) const NAMESPACE_MEMBERS: &[Production<Member>] =
    &[namespace_attribute, constant, regular_operation];

pub(crate) const DICTIONARY_MEMBERS: &[Production<Member>] = &[field];

/// How a container's body is parsed
struct ContainerKind<'a> {
    name: &'static str,
    inheritable: bool,
    /// Tag raised instead of a plain error when the body is missing
    bodyless: Option<WrongVariant>,
    extension: &'a [Production<Member>],
    baseline: &'a [Production<Member>],
}

/// Name, optional inheritance and `{ members };`
fn container(t: &mut Tokeniser<'_>, kind: ContainerKind<'_>) -> Result<Container, ProductionError> {
    let name = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error(format!("Missing name in {}", kind.name)))?;

    let inheritance = if kind.inheritable {
        match t.consume(&[":"]) {
            Some(colon) => {
                let parent = t
                    .consume_kind(TokenKind::Identifier)
                    .ok_or_else(|| t.error("Inheritance lacks a type"))?;
                Some(Inheritance {
                    colon,
                    name: parent,
                })
            }
            None => None,
        }
    } else {
        None
    };

    let Some(open) = t.consume(&["{"]) else {
        let message = format!("Bodyless {}", kind.name);
        return Err(match kind.bodyless {
            Some(variant) => t.wrong_variant(variant, message),
            None => t.error(message),
        });
    };

    let mut members = Vec::new();
    loop {
        if let Some(close) = t.consume(&["}"]) {
            let termination = t
                .consume(&[";"])
                .ok_or_else(|| t.error(format!("Missing semicolon after {}", kind.name)))?;
            return Ok(Container {
                name,
                inheritance,
                open,
                members,
                close,
                termination,
            });
        }

        let ext_attrs = extended_attributes(t)?;
        let mut member = None;
        for production in kind.extension.iter().chain(kind.baseline) {
            if let Some(found) = production(t)? {
                member = Some(found);
                break;
            }
        }
        let Some(node) = member else {
            return Err(t.error("Unknown member"));
        };
        tracing::trace!(kind = node.kind(), "matched member");
        members.push(Item { ext_attrs, node });
    }
}

/// `callback` function or `callback interface`
pub(crate) fn callback(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    let Some(base) = t.consume(&["callback"]) else {
        return Ok(None);
    };
    if t.probe("interface") {
        return callback_interface(t, base);
    }

    let name = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error("Callback lacks a name"))?;
    let assign = t
        .consume(&["="])
        .ok_or_else(|| t.error("Callback lacks an assignment"))?;
    let return_type = return_type(t)?.ok_or_else(|| t.error("Callback lacks a return type"))?;
    let open = t
        .consume(&["("])
        .ok_or_else(|| t.error("Callback lacks parentheses for arguments"))?;
    let arguments = argument_list(t)?;
    let close = t
        .consume(&[")"])
        .ok_or_else(|| t.error("Unterminated callback"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("Unterminated callback, expected `;`"))?;

    Ok(Some(Definition::CallbackFunction(CallbackFunction {
        base,
        name,
        assign,
        return_type,
        open,
        arguments,
        close,
        termination,
    })))
}

fn callback_interface(t: &mut Tokeniser<'_>, callback: Token) -> PResult<Definition> {
    let Some(base) = t.consume(&["interface"]) else {
        return Ok(None);
    };
    let extensions = t.extensions();
    let body = container(
        t,
        ContainerKind {
            name: "callback interface",
            inheritable: false,
            bodyless: None,
            extension: &extensions.callback_interface,
            baseline: CALLBACK_INTERFACE_MEMBERS,
        },
    )?;
    Ok(Some(Definition::CallbackInterface(CallbackInterface {
        callback,
        base,
        body,
    })))
}

/// `interface` or `interface mixin`
pub(crate) fn interface(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    interface_like(t, None)
}

fn interface_like(t: &mut Tokeniser<'_>, partial: Option<Token>) -> PResult<Definition> {
    let Some(base) = t.consume(&["interface"]) else {
        return Ok(None);
    };
    let extensions = t.extensions();

    if let Some(mixin) = t.consume(&["mixin"]) {
        let body = container(
            t,
            ContainerKind {
                name: "interface mixin",
                inheritable: false,
                bodyless: None,
                extension: &extensions.mixin,
                baseline: MIXIN_MEMBERS,
            },
        )?;
        return Ok(Some(Definition::InterfaceMixin(InterfaceMixin {
            partial,
            base,
            mixin,
            body,
        })));
    }

    let body = container(
        t,
        ContainerKind {
            name: "interface",
            inheritable: partial.is_none(),
            bodyless: partial.is_none().then_some(WrongVariant::Bodyless),
            extension: &extensions.interface,
            baseline: INTERFACE_MEMBERS,
        },
    )?;
    Ok(Some(Definition::Interface(Interface {
        partial,
        base,
        body,
    })))
}

/// `partial` dictionary, interface, mixin or namespace
pub(crate) fn partial(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    let Some(partial) = t.consume(&["partial"]) else {
        return Ok(None);
    };
    if let Some(definition) = dictionary_like(t, Some(partial.clone()))? {
        return Ok(Some(definition));
    }
    if let Some(definition) = interface_like(t, Some(partial.clone()))? {
        return Ok(Some(definition));
    }
    if let Some(definition) = namespace_like(t, Some(partial))? {
        return Ok(Some(definition));
    }
    Err(t.error("Partial doesn't apply to anything"))
}

pub(crate) fn dictionary(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    dictionary_like(t, None)
}

fn dictionary_like(t: &mut Tokeniser<'_>, partial: Option<Token>) -> PResult<Definition> {
    let Some(base) = t.consume(&["dictionary"]) else {
        return Ok(None);
    };
    let extensions = t.extensions();
    let body = container(
        t,
        ContainerKind {
            name: "dictionary",
            inheritable: partial.is_none(),
            bodyless: None,
            extension: &extensions.dictionary,
            baseline: DICTIONARY_MEMBERS,
        },
    )?;
    Ok(Some(Definition::Dictionary(Dictionary {
        partial,
        base,
        body,
    })))
}

pub(crate) fn namespace(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    namespace_like(t, None)
}

fn namespace_like(t: &mut Tokeniser<'_>, partial: Option<Token>) -> PResult<Definition> {
    let Some(base) = t.consume(&["namespace"]) else {
        return Ok(None);
    };
    let extensions = t.extensions();
    let body = container(
        t,
        ContainerKind {
            name: "namespace",
            inheritable: false,
            bodyless: None,
            extension: &extensions.namespace,
            baseline: NAMESPACE_MEMBERS,
        },
    )?;
    Ok(Some(Definition::Namespace(Namespace {
        partial,
        base,
        body,
    })))
}

/// `enum Name { "a", "b" };`
pub(crate) fn enumeration(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    let Some(base) = t.consume(&["enum"]) else {
        return Ok(None);
    };
    let name = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error("No name for enum"))?;
    let open = t
        .consume(&["{"])
        .ok_or_else(|| t.error("Bodyless enum"))?;
    let values = separated_list(t, enum_value, true, "enumeration")?;
    if t.probe_kind(TokenKind::String) {
        return Err(t.error("No comma between enum values"));
    }
    let close = t
        .consume(&["}"])
        .ok_or_else(|| t.error("Unexpected value in enum"))?;
    if values.is_empty() {
        return Err(t.error("No value in enum"));
    }
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("No semicolon after enum"))?;

    Ok(Some(Definition::Enum(Enum {
        base,
        name,
        open,
        values,
        close,
        termination,
    })))
}

fn enum_value(t: &mut Tokeniser<'_>) -> PResult<Token> {
    Ok(t.consume_kind(TokenKind::String))
}

/// `typedef Type Name;`
pub(crate) fn typedef(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    let Some(base) = t.consume(&["typedef"]) else {
        return Ok(None);
    };
    let idl_type = idl_type(t)?.ok_or_else(|| t.error("Typedef lacks a type"))?;
    let name = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error("Typedef lacks a name"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("Unterminated typedef, expected `;`"))?;

    Ok(Some(Definition::Typedef(Typedef {
        base,
        idl_type,
        name,
        termination,
    })))
}

/// `Target includes Mixin;`
pub(crate) fn includes(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    let start = t.position();
    let Some(target) = t.consume_kind(TokenKind::Identifier) else {
        return Ok(None);
    };
    let Some(includes) = t.consume(&["includes"]) else {
        t.unconsume(start);
        return Ok(None);
    };
    let mixin = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error("Incomplete includes statement"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("No terminating ; for includes statement"))?;

    Ok(Some(Definition::Includes(Includes {
        target,
        includes,
        mixin,
        termination,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::test_support::{round_trip, run};

    #[test]
    fn test_interface_with_members() {
        let source = "interface Foo : Bar {\n  const long A = 1;\n  constructor();\n  \
                      [Throws] static Foo create();\n  stringifier;\n  iterable<long>;\n  \
                      attribute long x;\n  undefined f(optional long a = 0);\n};";
        let definition = round_trip(source, interface);
        assert_eq!(definition.kind(), "interface");
        assert_eq!(definition.name(), Some("Foo"));
        assert_eq!(definition.members().len(), 7);
        assert!(definition.members()[2].has_ext_attr("Throws"));
    }

    #[test]
    fn test_mixin_and_partials() {
        let definition = round_trip("interface mixin M { attribute long x; };", interface);
        assert_eq!(definition.kind(), "interface mixin");

        let definition = round_trip("partial interface mixin M { };", partial);
        assert!(definition.is_partial());
        round_trip("partial dictionary D { long x; };", partial);
        round_trip("partial namespace N { readonly attribute long x; };", partial);
        assert_eq!(run("partial enum E {};", partial).unwrap_err(), "Partial doesn't apply to anything");
    }

    #[test]
    fn test_missing_body_is_a_wrong_variant() {
        let extensions = crate::syntax::registry::Extensions::default();
        let mut t = Tokeniser::new("interface Foo;", "test.webidl", &extensions);
        let err = interface(&mut t).unwrap_err();
        assert_eq!(err.variant(), Some(WrongVariant::Bodyless));
        assert_eq!(err.parse_error().message, "Bodyless interface");

        let mut t = Tokeniser::new("dictionary Foo;", "test.webidl", &extensions);
        assert_eq!(dictionary(&mut t).unwrap_err().variant(), None);
    }

    #[test]
    fn test_callbacks() {
        let definition = round_trip("callback Fn = void (DOMString s);", callback);
        assert_eq!(definition.kind(), "callback");
        let definition = round_trip("callback interface L { undefined handle(); };", callback);
        assert_eq!(definition.kind(), "callback interface");
        assert_eq!(
            run("callback interface L { attribute long x; };", callback).unwrap_err(),
            "Missing return type"
        );
    }

    #[test]
    fn test_enum_typedef_includes() {
        let definition = round_trip("enum E { \"a\", \"b\", };", enumeration);
        assert!(matches!(definition, Definition::Enum(ref e) if e.values.len() == 2));
        assert_eq!(run("enum E { \"a\" \"b\" };", enumeration).unwrap_err(), "No comma between enum values");
        assert_eq!(run("enum E { };", enumeration).unwrap_err(), "No value in enum");

        round_trip("typedef (long or DOMString)? T;", typedef);
        round_trip("Window includes WindowOrWorkerGlobalScope;", includes);
        assert_eq!(run("Window;", includes).unwrap(), None);
    }

    #[test]
    fn test_container_errors() {
        assert_eq!(run("interface {", interface).unwrap_err(), "Missing name in interface");
        assert_eq!(
            run("interface Foo { }", interface).unwrap_err(),
            "Missing semicolon after interface"
        );
        assert_eq!(run("dictionary D { ; };", dictionary).unwrap_err(), "Dictionary member lacks a type");
        assert_eq!(run("namespace N { constructor(); };", namespace).unwrap_err(), "Missing return type");
    }
}
