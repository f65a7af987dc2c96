//! Container members
//!
//! Member lists are priority ordered; see [`super::definitions`] for which
//! container admits which production.

use super::arguments::{argument_list, const_value, default_value};
use super::types::{idl_type, primitive_type, return_type};
use crate::syntax::ast::{
    Attribute, Constant, Constructor, Field, IterableLike, Member, Operation, Separated, Type,
    TypeBody,
};
use crate::syntax::error::PResult;
use crate::syntax::token::{Token, TokenKind};
use crate::syntax::tokeniser::Tokeniser;

#[derive(Debug, Clone, Copy, Default)]
struct AttributeOptions {
    no_inherit: bool,
    readonly: bool,
}

/// Attribute, `inherit` allowed
pub(crate) fn attribute(t: &mut Tokeniser<'_>) -> PResult<Member> {
    Ok(parse_attribute(t, None, AttributeOptions::default())?.map(Member::Attribute))
}

/// Attribute inside a mixin
pub(crate) fn mixin_attribute(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let options = AttributeOptions {
        no_inherit: true,
        readonly: false,
    };
    Ok(parse_attribute(t, None, options)?.map(Member::Attribute))
}

/// Attribute inside a namespace, which must be `readonly`
pub(crate) fn namespace_attribute(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let options = AttributeOptions {
        no_inherit: true,
        readonly: true,
    };
    Ok(parse_attribute(t, None, options)?.map(Member::Attribute))
}

fn parse_attribute(
    t: &mut Tokeniser<'_>,
    special: Option<Token>,
    options: AttributeOptions,
) -> PResult<Attribute> {
    let start = t.position();
    let mut special = special;
    if special.is_none() && !options.no_inherit {
        special = t.consume(&["inherit"]);
    }
    if special.as_ref().is_some_and(|s| s.is("inherit")) && t.probe("readonly") {
        return Err(t.error("Inherited attributes cannot be read-only"));
    }
    let readonly = t.consume(&["readonly"]);
    if options.readonly && readonly.is_none() && t.probe("attribute") {
        return Err(t.error("Attributes must be readonly in this context"));
    }
    let Some(base) = t.consume(&["attribute"]) else {
        t.unconsume(start);
        return Ok(None);
    };

    let idl_type = idl_type(t)?.ok_or_else(|| t.error("Attribute lacks a type"))?;
    let name = t
        .consume_kind(TokenKind::Identifier)
        .or_else(|| t.consume(&["async", "required"]))
        .ok_or_else(|| t.error("Attribute lacks a name"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("Unterminated attribute, expected `;`"))?;

    Ok(Some(Attribute {
        special,
        readonly,
        base,
        idl_type,
        name,
        termination,
    }))
}

/// Operation, possibly `getter`, `setter` or `deleter`
pub(crate) fn operation(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let special = t.consume(&["getter", "setter", "deleter"]);
    Ok(operation_body(t, special)?.map(Member::Operation))
}

/// Operation without special keywords
pub(crate) fn regular_operation(t: &mut Tokeniser<'_>) -> PResult<Member> {
    Ok(operation_body(t, None)?.map(Member::Operation))
}

/// Everything after an operation's special keyword
///
/// Once called the operation is committed: a missing return type is an
/// error, not a mismatch.
pub(crate) fn operation_body(t: &mut Tokeniser<'_>, special: Option<Token>) -> PResult<Operation> {
    if special.as_ref().is_some_and(|s| s.is("stringifier"))
        && let Some(termination) = t.consume(&[";"])
    {
        return Ok(Some(Operation {
            special,
            return_type: None,
            name: None,
            open: None,
            arguments: Vec::new(),
            close: None,
            termination,
        }));
    }

    let return_type = return_type(t)?.ok_or_else(|| t.error("Missing return type"))?;
    let name = t
        .consume_kind(TokenKind::Identifier)
        .or_else(|| t.consume(&["includes"]));
    let open = t
        .consume(&["("])
        .ok_or_else(|| t.error("Invalid operation"))?;
    let arguments = argument_list(t)?;
    let close = t
        .consume(&[")"])
        .ok_or_else(|| t.error("Unterminated operation"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("Unterminated operation, expected `;`"))?;

    Ok(Some(Operation {
        special,
        return_type: Some(return_type),
        name,
        open: Some(open),
        arguments,
        close: Some(close),
        termination,
    }))
}

/// `static` attribute or operation
pub(crate) fn static_member(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let Some(special) = t.consume(&["static"]) else {
        return Ok(None);
    };
    special_member(t, special, "No body in static member")
}

/// `stringifier` attribute or operation, or a bare `stringifier;`
pub(crate) fn stringifier(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let Some(special) = t.consume(&["stringifier"]) else {
        return Ok(None);
    };
    special_member(t, special, "Unterminated stringifier")
}

fn special_member(t: &mut Tokeniser<'_>, special: Token, message: &str) -> PResult<Member> {
    if let Some(attribute) = parse_attribute(t, Some(special.clone()), AttributeOptions::default())? {
        return Ok(Some(Member::Attribute(attribute)));
    }
    match operation_body(t, Some(special))? {
        Some(operation) => Ok(Some(Member::Operation(operation))),
        None => Err(t.error(message)),
    }
}

/// `const Type Name = Value;`
pub(crate) fn constant(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let Some(base) = t.consume(&["const"]) else {
        return Ok(None);
    };
    let body = match primitive_type(t)? {
        Some(body) => body,
        None => {
            let base = t
                .consume_kind(TokenKind::Identifier)
                .ok_or_else(|| t.error("Const lacks a type"))?;
            TypeBody::Single {
                prefix: None,
                base,
                postfix: None,
            }
        }
    };
    if t.probe("?") {
        return Err(t.error("Unexpected nullable constant type"));
    }
    let name = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error("Const lacks a name"))?;
    let assign = t
        .consume(&["="])
        .ok_or_else(|| t.error("Const lacks value assignment"))?;
    let value = const_value(t).ok_or_else(|| t.error("Const lacks a value"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("Unterminated const, expected `;`"))?;

    Ok(Some(Member::Constant(Constant {
        base,
        idl_type: Type {
            ext_attrs: None,
            body,
            nullable: None,
        },
        name,
        assign,
        value,
        termination,
    })))
}

/// `constructor(args);`
pub(crate) fn constructor(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let Some(base) = t.consume(&["constructor"]) else {
        return Ok(None);
    };
    let open = t
        .consume(&["("])
        .ok_or_else(|| t.error("No argument list in constructor"))?;
    let arguments = argument_list(t)?;
    let close = t
        .consume(&[")"])
        .ok_or_else(|| t.error("Unterminated constructor"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("No semicolon after constructor"))?;

    Ok(Some(Member::Constructor(Constructor {
        base,
        open,
        arguments,
        close,
        termination,
    })))
}

/// `iterable`, `async iterable`, `maplike` and `setlike` declarations
pub(crate) fn iterable_like(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let start = t.position();
    let readonly = t.consume(&["readonly"]);
    let asynchronous = if readonly.is_none() {
        t.consume(&["async"])
    } else {
        None
    };
    let base = if readonly.is_some() {
        t.consume(&["maplike", "setlike"])
    } else if asynchronous.is_some() {
        t.consume(&["iterable"])
    } else {
        t.consume(&["iterable", "maplike", "setlike"])
    };
    let Some(base) = base else {
        t.unconsume(start);
        return Ok(None);
    };

    let kind = base.raw.clone();
    let second_required = kind == "maplike";
    let second_allowed = second_required || kind == "iterable";
    let arguments_allowed = asynchronous.is_some() && kind == "iterable";

    let open = t
        .consume(&["<"])
        .ok_or_else(|| t.error(format!("Missing less-than sign `<` in {kind} declaration")))?;
    let first = idl_type(t)?
        .ok_or_else(|| t.error(format!("Missing a type argument in {kind} declaration")))?;

    let mut idl_types = Vec::new();
    let separator = if second_allowed {
        t.consume(&[","])
    } else {
        None
    };
    let has_second = separator.is_some();
    idl_types.push(Separated {
        item: first,
        separator,
    });
    if has_second {
        let second = idl_type(t)?.ok_or_else(|| {
            t.error(format!("Missing second type argument in {kind} declaration"))
        })?;
        idl_types.push(Separated {
            item: second,
            separator: None,
        });
    } else if second_required {
        return Err(t.error(format!("Missing second type argument in {kind} declaration")));
    }

    let close = t
        .consume(&[">"])
        .ok_or_else(|| t.error(format!("Missing greater-than sign `>` in {kind} declaration")))?;

    let mut args_open = None;
    let mut arguments = Vec::new();
    let mut args_close = None;
    if t.probe("(") {
        if !arguments_allowed {
            return Err(t.error("Arguments are only allowed for `async iterable`"));
        }
        args_open = t.consume(&["("]);
        arguments = argument_list(t)?;
        args_close = Some(
            t.consume(&[")"])
                .ok_or_else(|| t.error("Unterminated async iterable argument list"))?,
        );
    }

    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error(format!("Missing semicolon after {kind} declaration")))?;

    Ok(Some(Member::IterableLike(IterableLike {
        readonly,
        asynchronous,
        base,
        open,
        idl_types,
        close,
        args_open,
        arguments,
        args_close,
        termination,
    })))
}

/// Dictionary member
pub(crate) fn field(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let required = t.consume(&["required"]);
    let idl_type = idl_type(t)?.ok_or_else(|| t.error("Dictionary member lacks a type"))?;
    let name = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error("Dictionary member lacks a name"))?;
    let default = default_value(t)?;
    if required.is_some() && default.is_some() {
        return Err(t.error("Required member must not have a default"));
    }
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("Unterminated dictionary member, expected `;`"))?;

    Ok(Some(Member::Field(Field {
        required,
        idl_type,
        name,
        default,
        termination,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::test_support::{round_trip, run};

    #[test]
    fn test_attributes() {
        round_trip("readonly attribute DOMString name;", attribute);
        round_trip("inherit attribute EventHandler onclick;", attribute);
        round_trip("attribute long required;", attribute);
        assert_eq!(run("readonly long x;", attribute).unwrap(), None);
        assert_eq!(
            run("inherit readonly attribute long x;", attribute).unwrap_err(),
            "Inherited attributes cannot be read-only"
        );
        assert_eq!(
            run("attribute long x;", namespace_attribute).unwrap_err(),
            "Attributes must be readonly in this context"
        );
    }

    #[test]
    fn test_operations() {
        round_trip("getter any (unsigned long index);", operation);
        round_trip("Promise<void> includes(optional Foo foo = {});", operation);
        assert_eq!(run("long ;", operation).unwrap_err(), "Invalid operation");
        assert_eq!(
            run("void f()", operation).unwrap_err(),
            "Unterminated operation, expected `;`"
        );
    }

    #[test]
    fn test_specials() {
        let member = round_trip("stringifier;", stringifier);
        assert!(matches!(member, Member::Operation(ref op) if op.return_type.is_none()));
        let member = round_trip("static readonly attribute long count;", static_member);
        assert!(matches!(member, Member::Attribute(_)));
        round_trip("static Foo create();", static_member);
    }

    #[test]
    fn test_constants_and_constructors() {
        round_trip("const unsigned short NONE = 0;", constant);
        round_trip("const double X = -Infinity;", constant);
        round_trip("constructor(optional long x = 1);", constructor);
        assert_eq!(run("const long X;", constant).unwrap_err(), "Const lacks value assignment");
    }

    #[test]
    fn test_iterable_likes() {
        round_trip("iterable<DOMString, long>;", iterable_like);
        round_trip("async iterable<long>(optional Opts opts = {});", iterable_like);
        round_trip("readonly maplike<DOMString, Foo>;", iterable_like);
        round_trip("setlike<long>;", iterable_like);
        assert_eq!(run("readonly attribute long x;", iterable_like).unwrap(), None);
        assert_eq!(
            run("maplike<long>;", iterable_like).unwrap_err(),
            "Missing second type argument in maplike declaration"
        );
        assert_eq!(
            run("iterable<long>(long a);", iterable_like).unwrap_err(),
            "Arguments are only allowed for `async iterable`"
        );
    }

    #[test]
    fn test_fields() {
        round_trip("required long x;", field);
        round_trip("sequence<long> values = [];", field);
        assert_eq!(
            run("required long x = 1;", field).unwrap_err(),
            "Required member must not have a default"
        );
    }
}
