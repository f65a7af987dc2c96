//! Gecko grammar extensions
//!
//! Constructs found in Gecko's `.webidl` files that standard WebIDL does not
//! have, registered on top of the baseline grammar by [`registry`].

use super::ast::{
    BodylessInterface, CallbackConstructor, Definition, Member, Type, TypeBody, Utf8StringField,
    Utf8StringRecord, Utf8StringTypedef,
};
use super::error::{PResult, WrongVariant};
use super::grammar::arguments::{argument_list, default_value};
use super::grammar::members::{attribute, operation_body};
use super::grammar::types::{idl_type, return_type, type_suffix};
use super::registry::{Extensions, ProductionRegistry};
use super::token::TokenKind;
use super::tokeniser::Tokeniser;

/// Baseline grammar with every Gecko production registered
pub(crate) fn registry() -> ProductionRegistry {
    ProductionRegistry::new()
        .with_definition(callback_constructor)
        .with_definition(utf8string_typedef)
        .with_fallback(WrongVariant::Bodyless, bodyless_interface)
        .with_extensions(Extensions {
            interface: vec![legacy_caller],
            callback_interface: vec![attribute],
            namespace: vec![attribute],
            dictionary: vec![utf8string_field],
            types: vec![utf8string_record],
            ..Extensions::default()
        })
}

/// `interface Name;`
pub(crate) fn bodyless_interface(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    let start = t.position();
    let Some(base) = t.consume(&["interface"]) else {
        return Ok(None);
    };
    let (Some(name), Some(termination)) = (
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

/// `callback constructor Name = ReturnType (arguments);`
pub(crate) fn callback_constructor(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    let start = t.position();
    let Some(callback) = t.consume(&["callback"]) else {
        return Ok(None);
    };
    let Some(constructor) = t.consume(&["constructor"]) else {
        t.unconsume(start);
        return Ok(None);
    };

    let name = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error("Callback lacks a name"))?;
    let assign = t
        .consume(&["="])
        .ok_or_else(|| t.error("Callback constructor lacks an assignment"))?;
    let return_type =
        return_type(t)?.ok_or_else(|| t.error("Callback constructor lacks a return type"))?;
    let open = t
        .consume(&["("])
        .ok_or_else(|| t.error("Callback constructor lacks parentheses for arguments"))?;
    let arguments = argument_list(t)?;
    let close = t
        .consume(&[")"])
        .ok_or_else(|| t.error("Unterminated callback constructor"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("Unterminated callback constructor, expected `;`"))?;

    Ok(Some(Definition::CallbackConstructor(CallbackConstructor {
        callback,
        constructor,
        name,
        assign,
        return_type,
        open,
        arguments,
        close,
        termination,
    })))
}

/// `legacycaller ReturnType name?(arguments);`
pub(crate) fn legacy_caller(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let Some(special) = t.consume_identifier("legacycaller") else {
        return Ok(None);
    };
    Ok(operation_body(t, Some(special))?.map(Member::LegacyCaller))
}

/// `record<UTF8String, V>` in any type position
pub(crate) fn utf8string_record(t: &mut Tokeniser<'_>) -> PResult<Type> {
    Ok(record(t)?.map(|record| Type {
        ext_attrs: None,
        body: TypeBody::Utf8StringRecord(record),
        nullable: None,
    }))
}

fn record(t: &mut Tokeniser<'_>) -> PResult<Utf8StringRecord> {
    let start = t.position();
    let (Some(base), Some(open), Some(key)) = (
        t.consume(&["record"]),
        t.consume(&["<"]),
        t.consume_identifier("UTF8String"),
    ) else {
        t.unconsume(start);
        return Ok(None);
    };

    let comma = t
        .consume(&[","])
        .ok_or_else(|| t.error("Missing comma after record key type"))?;
    let value = idl_type(t)?.ok_or_else(|| t.error("Error parsing generic type record"))?;
    let close = t
        .consume(&[">"])
        .ok_or_else(|| t.error("Missing closing bracket after record"))?;
    let nullable = type_suffix(t)?;

    Ok(Some(Utf8StringRecord {
        base,
        open,
        key,
        comma,
        value: Box::new(value),
        close,
        nullable,
    }))
}

/// Dictionary member typed `record<UTF8String, V>`
pub(crate) fn utf8string_field(t: &mut Tokeniser<'_>) -> PResult<Member> {
    let start = t.position();
    let required = t.consume(&["required"]);
    let Some(idl_type) = record(t)? else {
        t.unconsume(start);
        return Ok(None);
    };

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

    Ok(Some(Member::Utf8StringField(Utf8StringField {
        required,
        idl_type,
        name,
        default,
        termination,
    })))
}

/// `typedef record<UTF8String, V> Name;`
pub(crate) fn utf8string_typedef(t: &mut Tokeniser<'_>) -> PResult<Definition> {
    let start = t.position();
    let Some(base) = t.consume(&["typedef"]) else {
        return Ok(None);
    };
    let Some(idl_type) = record(t)? else {
        t.unconsume(start);
        return Ok(None);
    };

    let name = t
        .consume_kind(TokenKind::Identifier)
        .ok_or_else(|| t.error("Typedef lacks a name"))?;
    let termination = t
        .consume(&[";"])
        .ok_or_else(|| t.error("Unterminated typedef, expected `;`"))?;

    Ok(Some(Definition::Utf8StringTypedef(Utf8StringTypedef {
        base,
        idl_type,
        name,
        termination,
    })))
}
